//! Astro Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use astro_drift::audio::{AudioReactor, SoundEffect};
    use astro_drift::consts::*;
    use astro_drift::platform::KeyboardState;
    use astro_drift::renderer::{CanvasSurface, Surface};
    use astro_drift::sim::{Bounds, GamePhase, World, tick};
    use astro_drift::{Settings, Tuning, VisualTable};

    /// Game instance holding all state
    struct Game {
        world: World,
        surface: CanvasSurface,
        keyboard: KeyboardState,
        audio: AudioReactor,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Run whole ticks for the elapsed frame time; returns the phase afterwards
        fn update(&mut self, dt: f32) -> GamePhase {
            let tick_secs = self.world.tuning.tick_secs();
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= tick_secs && substeps < MAX_SUBSTEPS {
                let input = self.keyboard.snapshot();
                let report = tick(&mut self.world, &input, &mut self.surface);
                self.audio.on_collisions(&report.collisions);
                self.accumulator -= tick_secs;
                substeps += 1;

                if report.phase == GamePhase::GameOver {
                    self.audio.play(SoundEffect::GameOver);
                    return GamePhase::GameOver;
                }
            }
            GamePhase::Running
        }
    }

    /// Read an inline JSON config block, falling back to defaults on any problem
    fn inline_config<T: Default>(
        document: &web_sys::Document,
        id: &str,
        parse: impl Fn(&str) -> Result<T, astro_drift::ConfigError>,
    ) -> T {
        let Some(json) = document.get_element_by_id(id).and_then(|el| el.text_content()) else {
            return T::default();
        };
        match parse(&json) {
            Ok(value) => {
                log::info!("Loaded #{} config", id);
                value
            }
            Err(err) => {
                log::warn!("Ignoring #{} config: {}", id, err);
                T::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Astro Drift starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = inline_config(&document, "tuning", Tuning::from_json);
        let settings = inline_config(&document, "settings", Settings::from_json);

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        let visuals = VisualTable::default_for_surface(width, height);
        let surface = CanvasSurface::new(canvas, &visuals)?;

        let seed = js_sys::Date::now() as u64;
        let world = World::new(seed, Bounds::new(surface.width(), surface.height()), tuning, visuals);

        let game = Rc::new(RefCell::new(Game {
            world,
            surface,
            keyboard: KeyboardState::new(),
            audio: AudioReactor::new(settings),
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Astro Drift running with seed {}", seed);
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if KeyboardState::is_game_key(&code) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keyboard.key_down(&code);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let phase = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt)
        };

        // Game over is terminal: stop scheduling frames
        if phase == GamePhase::GameOver {
            log::info!("Loop stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("Failed to start: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Astro Drift (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the playable game");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use astro_drift::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
    use astro_drift::renderer::RecordingSurface;
    use astro_drift::sim::{Bounds, GamePhase, TickInput, World, tick};
    use astro_drift::{Tuning, VisualTable};

    /// Stop the scripted session after this many ticks even if the ship survives
    const MAX_TICKS: u64 = 20_000;

    /// Tuning from the file named by `ASTRO_DRIFT_TUNING`, if set
    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("ASTRO_DRIFT_TUNING") else {
            return Tuning::default();
        };
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring tuning file {}: {}", path, err);
                Tuning::default()
            }
        }
    }

    /// Spin in place firing until something hits the ship
    pub fn run() {
        let (w, h) = (DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);
        let mut world = World::new(
            2024,
            Bounds::new(w, h),
            load_tuning(),
            VisualTable::default_for_surface(w, h),
        );
        let mut surface = RecordingSurface::new(w, h);
        let mut collisions = 0usize;
        let mut shots = 0usize;

        while world.time_ticks < MAX_TICKS {
            surface.begin_frame();
            // Drift in a slow square so the ship is not a sitting target
            let axis = match (world.time_ticks / 120) % 4 {
                0 => Vec2::X,
                1 => Vec2::Y,
                2 => Vec2::NEG_X,
                _ => Vec2::NEG_Y,
            };
            let input = TickInput {
                axis,
                fire: true,
                rotate_right: true,
                ..Default::default()
            };
            let report = tick(&mut world, &input, &mut surface);
            collisions += report.collisions.len();
            shots += report
                .spawned
                .iter()
                .filter(|id| world.arena.by_id(**id).is_some_and(|e| e.name() == "Projectile"))
                .count();
            if report.phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Session over: ticks={} score={} shots={} collisions={} entities={} draw calls={}",
            world.time_ticks,
            world.score(),
            shots,
            collisions,
            world.entity_count(),
            surface.total_calls()
        );
        println!(
            "ticks={} score={} game_over={}",
            world.time_ticks,
            world.score(),
            world.phase == GamePhase::GameOver
        );
    }
}
