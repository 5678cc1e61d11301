//! Audio reactor using Web Audio API
//!
//! Listens to each tick's collision events and plays procedurally generated
//! impact sounds. At most `MAX_VOICES` impacts sound at once; extra events are
//! dropped. Has no effect on game state.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{CollisionEvent, EntityKind};

/// Concurrent impact sounds allowed
pub const MAX_VOICES: usize = 5;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile destroys a hazard
    Impact,
    /// Something hits the ship
    ShipHit,
    /// Terminal sting
    GameOver,
}

impl SoundEffect {
    /// Which sound a collision makes
    pub fn for_collision(event: &CollisionEvent) -> Self {
        if event.involves(EntityKind::PLAYER) {
            SoundEffect::ShipHit
        } else {
            SoundEffect::Impact
        }
    }
}

/// Audio manager for the game
pub struct AudioReactor {
    ctx: Option<AudioContext>,
    settings: Settings,
    /// End times (context seconds) of the voices still sounding
    voices: Vec<f64>,
}

impl AudioReactor {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// React to one tick's collisions
    pub fn on_collisions(&mut self, events: &[CollisionEvent]) {
        for event in events {
            self.play(SoundEffect::for_collision(event));
        }
    }

    /// Play a sound effect if a voice is free
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.settings.effective_gain();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let now = ctx.current_time();
        self.voices.retain(|&end| end > now);
        if self.voices.len() >= MAX_VOICES {
            log::debug!("All {} voices busy, dropping {:?}", MAX_VOICES, effect);
            return;
        }

        let duration = match effect {
            SoundEffect::Impact => self.play_impact(&ctx, vol),
            SoundEffect::ShipHit => self.play_ship_hit(&ctx, vol),
            SoundEffect::GameOver => self.play_game_over(&ctx, vol),
        };
        self.voices.push(now + duration);
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Asteroid impact - short crunch
    fn play_impact(&self, ctx: &AudioContext, vol: f32) -> f64 {
        let t = ctx.current_time();
        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        // High frequency crack
        if let Some((osc2, gain2)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.15, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.1).ok();
        }
        0.3
    }

    /// Ship hit - low boom
    fn play_ship_hit(&self, ctx: &AudioContext, vol: f32) -> f64 {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return 0.0;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
        0.5
    }

    /// Game over - falling tone
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) -> f64 {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Triangle) else {
            return 0.0;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 1.0)
            .ok();
        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 1.0)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.1).ok();
        1.1
    }
}
