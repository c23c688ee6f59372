//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player impulse
    Flap,
    /// Obstacle cleared
    Score,
    /// Speed/cadence stepped up
    LevelUp,
    /// Run ended on a pillar, floor or ceiling
    Hit,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Effect gain before mute
    gain: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            gain: settings.sfx_gain(),
            muted: settings.muted,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.gain }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::Flap => self.play_flap(ctx, vol),
            SoundEffect::Score => self.play_score(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
        }
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

    /// Short falling chirp shaped by one oscillator
    fn play_sweep(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        duration: f64,
        vol: f32,
    ) {
        // Exponential ramps reject a zero start value
        if vol <= 0.0 {
            return;
        }
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(10.0, t + duration)
            .ok();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Flap - quick triangle chirp
    fn play_flap(&self, ctx: &AudioContext, vol: f32) {
        self.play_sweep(ctx, 400.0, OscillatorType::Triangle, 0.1, vol * 0.1);
    }

    /// Score - rising sine ding
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1100.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Level up - short rising arpeggio
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.12, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Hit - low sawtooth thud
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        self.play_sweep(ctx, 150.0, OscillatorType::Sawtooth, 0.3, vol * 0.1);
    }
}
