//! Sound effects using the Web Audio API
//!
//! Procedurally generated, no asset files: one-shot effects plus two looping
//! music beds faded by `Soundtrack` cues. Every call is best effort: a
//! missing or suspended context just means silence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;
use crate::soundtrack::{Fade, Soundtrack, Track};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run began
    RunStart,
    /// Renewable collected
    Collect,
    /// Player touched pollution
    Hit,
    /// Run over jingle, follows `Hit`
    GameOver,
}

impl SoundEffect {
    /// Effects for a game notification, in play order
    pub fn for_event(event: &GameEvent) -> &'static [SoundEffect] {
        match event {
            GameEvent::RunStarted => &[SoundEffect::RunStart],
            GameEvent::BonusCollected { .. } => &[SoundEffect::Collect],
            GameEvent::RunEnded { .. } => &[SoundEffect::Hit, SoundEffect::GameOver],
        }
    }
}

/// Voices and tremolo of one looping bed
struct BedSpec {
    voices: &'static [(f32, OscillatorType)],
    /// Gain at full track level
    peak: f32,
    tremolo_hz: f32,
    tremolo_depth: f32,
}

/// Slow, open chord under the start menu
const MENU_BED: BedSpec = BedSpec {
    voices: &[
        (220.0, OscillatorType::Sine),
        (277.18, OscillatorType::Sine),
        (329.63, OscillatorType::Sine),
    ],
    peak: 0.08,
    tremolo_hz: 0.25,
    tremolo_depth: 0.3,
};

/// Pulsing low drone during a run
const GAME_BED: BedSpec = BedSpec {
    voices: &[
        (110.0, OscillatorType::Triangle),
        (164.81, OscillatorType::Triangle),
        (220.0, OscillatorType::Sine),
    ],
    peak: 0.07,
    tremolo_hz: 2.0,
    tremolo_depth: 0.5,
};

/// A looping music bed: voices -> tremolo -> level. Runs silently until faded in.
struct MusicBed {
    level: GainNode,
    peak: f32,
    _voices: Vec<OscillatorNode>,
}

impl MusicBed {
    fn build(ctx: &AudioContext, out: &GainNode, spec: &BedSpec) -> Option<Self> {
        let level = ctx.create_gain().ok()?;
        level.gain().set_value(0.0);
        level.connect_with_audio_node(out).ok()?;

        let tremolo = ctx.create_gain().ok()?;
        tremolo.gain().set_value(1.0);
        tremolo.connect_with_audio_node(&level).ok()?;

        let lfo = ctx.create_oscillator().ok()?;
        lfo.frequency().set_value(spec.tremolo_hz);
        let depth = ctx.create_gain().ok()?;
        depth.gain().set_value(spec.tremolo_depth);
        lfo.connect_with_audio_node(&depth).ok()?;
        depth.connect_with_audio_param(&tremolo.gain()).ok()?;
        lfo.start().ok()?;

        let mut voices = vec![lfo];
        for &(freq, osc_type) in spec.voices {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&tremolo).ok()?;
            osc.start().ok()?;
            voices.push(osc);
        }

        Some(Self {
            level,
            peak: spec.peak,
            _voices: voices,
        })
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Everything routes through here; mute zeroes it
    master: Option<GainNode>,
    menu: Option<MusicBed>,
    game: Option<MusicBed>,
    soundtrack: Soundtrack,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }

        let master = ctx.as_ref().and_then(|ctx| {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(if settings.muted { 0.0 } else { 1.0 });
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        });
        let music_bus = ctx.as_ref().zip(master.as_ref()).and_then(|(ctx, master)| {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(settings.music_gain());
            gain.connect_with_audio_node(master).ok()?;
            Some(gain)
        });
        let (menu, game) = match (&ctx, &music_bus) {
            (Some(ctx), Some(bus)) => (
                MusicBed::build(ctx, bus, &MENU_BED),
                MusicBed::build(ctx, bus, &GAME_BED),
            ),
            _ => (None, None),
        };
        if ctx.is_some() && (menu.is_none() || game.is_none()) {
            log::warn!("Music setup failed - sound effects only");
        }

        Self {
            ctx,
            master,
            menu,
            game,
            soundtrack: Soundtrack::new(),
            sfx_volume: settings.sfx_gain(),
            muted: settings.muted,
        }
    }

    /// Resume audio context (browsers require a user gesture first)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// First user gesture: resume and bring in the menu music
    pub fn unlock(&mut self) {
        self.resume();
        if let Some(fade) = self.soundtrack.unlock() {
            self.apply_fade(fade);
        }
    }

    /// Sound effects and music fades for a game notification
    pub fn handle_event(&mut self, event: &GameEvent) {
        for effect in SoundEffect::for_event(event) {
            self.play(*effect);
        }
        for fade in self.soundtrack.on_event(event) {
            self.apply_fade(fade);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute for music and effects; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        if let (Some(ctx), Some(master)) = (&self.ctx, &self.master) {
            let t = ctx.current_time();
            master.gain().cancel_scheduled_values(t).ok();
            master
                .gain()
                .set_value_at_time(if self.muted { 0.0 } else { 1.0 }, t)
                .ok();
        }
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    fn bed(&self, track: Track) -> Option<&MusicBed> {
        match track {
            Track::Menu => self.menu.as_ref(),
            Track::Game => self.game.as_ref(),
        }
    }

    /// Ramp a bed linearly from wherever it is now
    fn apply_fade(&self, fade: Fade) {
        let (Some(ctx), Some(bed)) = (&self.ctx, self.bed(fade.track)) else {
            return;
        };
        let t = ctx.current_time();
        let gain = bed.level.gain();
        gain.cancel_scheduled_values(t).ok();
        gain.set_value_at_time(gain.value(), t).ok();
        let target = fade.level * bed.peak;
        gain.linear_ramp_to_value_at_time(target, t + fade.secs as f64).ok();
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::RunStart => self.play_run_start(ctx, vol),
            SoundEffect::Collect => self.play_collect(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Create an oscillator routed through its own gain node into the master bus
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let master = self.master.as_ref()?;
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(master).ok()?;

        Some((osc, gain))
    }

    /// Rising sweep
    fn play_run_start(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Bright two-note chime
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
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

    /// Low thump with a noisy edge
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(140.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Sad descending run, starts after the hit
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = 0.25 + i as f64 * 0.2;
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
}
