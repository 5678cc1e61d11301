//! Browser 2D canvas surface

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Surface, UiText};
use crate::assets::{SpriteKind, Visual, VisualTable};

/// Draws sprites and text onto an `HtmlCanvasElement`
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteKind, HtmlImageElement>,
}

impl CanvasSurface {
    /// Grab the 2D context and start loading every image in the table
    pub fn new(canvas: HtmlCanvasElement, visuals: &VisualTable) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_fill_style_str("#FFFFFF");
        ctx.set_text_align("center");

        let mut images = HashMap::new();
        for (kind, entry) in visuals.iter() {
            let image =
                HtmlImageElement::new_with_width_and_height(entry.width as u32, entry.height as u32)?;
            image.set_src(&entry.path);
            images.insert(kind, image);
        }
        log::info!("Loading {} sprites", images.len());

        Ok(Self {
            canvas,
            ctx,
            images,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn draw_sprite(&mut self, visual: &Visual, pos: Vec2, rotation_deg: f32) {
        let Some(image) = self.images.get(&visual.sprite) else {
            return;
        };
        let w = visual.width as f64;
        let h = visual.height as f64;

        self.ctx.save();
        let drawn = self
            .ctx
            .translate(pos.x as f64, pos.y as f64)
            .and_then(|_| self.ctx.rotate(rotation_deg.to_radians() as f64))
            .and_then(|_| {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(image, -w / 2.0, -h / 2.0, w, h)
            });
        if let Err(err) = drawn {
            log::warn!("Drawing {} failed: {:?}", visual.sprite.as_str(), err);
        }
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &UiText) {
        self.ctx.set_font(&format!("{}px arial", text.font_px));
        if let Err(err) = self
            .ctx
            .fill_text(&text.text, text.pos.x as f64, text.pos.y as f64)
        {
            log::warn!("fillText failed for {:?}: {:?}", text.text, err);
        }
    }
}
