//! Sound hooks
//!
//! The simulation never touches audio. The shell drains `GameEvent`s after
//! each tick and hands them to an `AudioSink` through `dispatch`. Sinks are
//! fire-and-forget: they swallow their own failures.

use crate::sim::{GameEvent, SauceKind};

/// Audio collaborator
pub trait AudioSink {
    fn play_catch(&mut self, kind: SauceKind);
    fn play_miss(&mut self);
    fn play_level_up(&mut self);
    fn start_music(&mut self);

    fn stop_music(&mut self) {}
    fn play_extra_life(&mut self) {}
    fn play_life_lost(&mut self) {}
    fn play_game_over(&mut self) {}
}

/// Sink that plays nothing (native builds, muted shells)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_catch(&mut self, _kind: SauceKind) {}
    fn play_miss(&mut self) {}
    fn play_level_up(&mut self) {}
    fn start_music(&mut self) {}
}

/// Route one tick's events to a sink
pub fn dispatch(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        match *event {
            GameEvent::Caught { kind, .. } => sink.play_catch(kind),
            GameEvent::Missed { .. } => sink.play_miss(),
            GameEvent::LevelUp { .. } => sink.play_level_up(),
            GameEvent::ExtraLife { .. } => sink.play_extra_life(),
            GameEvent::LifeLost { lives } if lives > 0 => sink.play_life_lost(),
            GameEvent::GameOver { .. } => {
                sink.stop_music();
                sink.play_game_over();
            }
            _ => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Procedurally generated sounds on the Web Audio API - no asset files
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::AudioSink;
    use crate::settings::Settings;
    use crate::sim::SauceKind;

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        music: Vec<OscillatorNode>,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                music_volume: settings.music_volume.clamp(0.0, 1.0),
                muted: settings.muted,
                music: Vec::new(),
            }
        }

        /// Resume the context (browsers require a user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if muted {
                self.stop_music();
            }
        }

        fn sfx_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Context ready for playback, resumed if the browser suspended it
        fn live_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        /// Short enveloped blip
        fn blip(&self, freq: f32, osc_type: OscillatorType, level: f32, delay: f64, length: f64) {
            let vol = self.sfx_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Pitch sweep from `from` to `to`
        fn sweep(&self, from: f32, to: f32, osc_type: OscillatorType, level: f32, length: f64) {
            let vol = self.sfx_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + length)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play_catch(&mut self, kind: SauceKind) {
            match kind {
                // Soft pluck
                SauceKind::Mild => self.blip(520.0, OscillatorType::Sine, 0.35, 0.0, 0.12),
                // Brighter pluck with a sizzle on top
                SauceKind::Hot => {
                    self.blip(660.0, OscillatorType::Triangle, 0.35, 0.0, 0.14);
                    self.blip(2400.0, OscillatorType::Square, 0.05, 0.0, 0.06);
                }
                // Rising two-note chirp
                SauceKind::ExtraHot => {
                    self.blip(780.0, OscillatorType::Triangle, 0.35, 0.0, 0.1);
                    self.blip(1170.0, OscillatorType::Triangle, 0.3, 0.06, 0.14);
                }
            }
        }

        fn play_miss(&mut self) {
            self.sweep(220.0, 70.0, OscillatorType::Sawtooth, 0.25, 0.25);
        }

        fn play_level_up(&mut self) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
                self.blip(*freq, OscillatorType::Triangle, 0.3, i as f64 * 0.1, 0.4);
            }
        }

        fn play_extra_life(&mut self) {
            for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
                self.blip(*freq, OscillatorType::Sine, 0.25, i as f64 * 0.08, 0.15);
            }
        }

        fn play_life_lost(&mut self) {
            self.sweep(300.0, 40.0, OscillatorType::Sine, 0.4, 0.6);
        }

        fn play_game_over(&mut self) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                self.blip(*freq, OscillatorType::Sine, 0.3, i as f64 * 0.2, 0.3);
            }
        }

        /// Low two-voice drone under the game
        fn start_music(&mut self) {
            self.stop_music();
            let vol = if self.muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            };
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context().cloned() else { return };
            for (freq, level) in [(110.0, 0.08), (164.8, 0.05)] {
                let Some((osc, gain)) = Self::create_osc(&ctx, freq, OscillatorType::Triangle)
                else {
                    continue;
                };
                gain.gain().set_value(vol * level);
                if osc.start().is_ok() {
                    self.music.push(osc);
                }
            }
        }

        fn stop_music(&mut self) {
            for osc in self.music.drain(..) {
                let _ = osc.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that records what it was asked to play
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl AudioSink for Recorder {
        fn play_catch(&mut self, kind: SauceKind) {
            self.calls.push(kind.as_str());
        }
        fn play_miss(&mut self) {
            self.calls.push("miss");
        }
        fn play_level_up(&mut self) {
            self.calls.push("level");
        }
        fn start_music(&mut self) {
            self.calls.push("music");
        }
        fn stop_music(&mut self) {
            self.calls.push("stop");
        }
        fn play_game_over(&mut self) {
            self.calls.push("over");
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let events = [
            GameEvent::Caught {
                kind: SauceKind::Hot,
                points: 2,
            },
            GameEvent::Missed {
                kind: SauceKind::Mild,
            },
            GameEvent::MultiplierLost,
            GameEvent::LevelUp { level: 2 },
            GameEvent::GameOver { final_score: 9 },
        ];
        let mut sink = Recorder::default();
        dispatch(&events, &mut sink);
        assert_eq!(sink.calls, vec!["hot", "miss", "level", "stop", "over"]);
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let events = [GameEvent::LevelUp { level: 3 }, GameEvent::MaxLives];
        dispatch(&events, &mut NullAudio);
    }
}
