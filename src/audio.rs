//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a background drone - no external
//! files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Common trash collected
    Collect,
    /// Rare trash collected
    CollectRare,
    /// Round started
    GameStart,
    /// Time's up
    GameOver,
    /// Global progress reward earned
    Reward,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Background drone voices while playing
    music: Vec<(OscillatorNode, GainNode)>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sfx_volume: f32, music_volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music: Vec::new(),
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            music_volume: music_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let vol = self.effective_music_volume();
        for (_, gain) in &self.music {
            gain.gain().set_value(vol * 0.15);
        }
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Collect => self.play_collect(ctx, vol),
            SoundEffect::CollectRare => self.play_collect_rare(ctx, vol),
            SoundEffect::GameStart => self.play_game_start(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::Reward => self.play_reward(ctx, vol),
        }
    }

    /// Start the background drone (no-op if already playing)
    pub fn start_music(&mut self) {
        if !self.music.is_empty() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.effective_music_volume();
        // Soft open fifth with a slow beat between the voices
        for freq in [110.0, 165.0, 110.5] {
            if let Some((osc, gain)) = self.create_osc(&ctx, freq, OscillatorType::Sine) {
                gain.gain().set_value(vol * 0.15);
                if osc.start().is_ok() {
                    self.music.push((osc, gain));
                }
            }
        }
    }

    /// Stop the background drone and rewind (next start begins fresh)
    pub fn stop_music(&mut self) {
        for (osc, gain) in self.music.drain(..) {
            let _ = osc.stop();
            let _ = gain.disconnect();
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

    /// Play a rising arpeggio, one note every `spacing` seconds
    fn arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32], spacing: f64, osc_type: OscillatorType) {
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Common pickup - short blip
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(660.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(990.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Rare pickup - happy ding
    fn play_collect_rare(&self, ctx: &AudioContext, vol: f32) {
        self.arpeggio(ctx, vol, &[600.0, 800.0, 1000.0, 1200.0], 0.06, OscillatorType::Sine);
    }

    /// Round start - whoosh up
    fn play_game_start(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Reward - celebratory
    fn play_reward(&self, ctx: &AudioContext, vol: f32) {
        self.arpeggio(
            ctx,
            vol,
            &[500.0, 600.0, 700.0, 800.0, 1000.0],
            0.08,
            OscillatorType::Triangle,
        );
    }
}
