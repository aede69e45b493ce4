//! Session lifecycle: NotStarted -> Running <-> Paused -> GameOver
//!
//! `Session` is the only owner of `SessionState` and the seeded RNG. The
//! shell calls `tick` once per animation frame and drains events
//! afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, SessionPhase, SessionState};
use super::tick::{TickInput, apply_pointer, tick};
use crate::error::SessionError;
use crate::tuning::Tuning;

pub struct Session {
    state: SessionState,
    rng: Pcg32,
    tuning: Tuning,
    seed: u64,
    /// Latest pointer sample, overwritten by input and consumed by `tick`
    pointer: Option<Vec2>,
}

impl Session {
    pub fn new(seed: u64, field: Vec2, tuning: Tuning) -> Self {
        Self {
            state: SessionState::new(field, &tuning),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            seed,
            pointer: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn reject(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.state.phase,
        }
    }

    /// Leave the start screen; valid once
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::NotStarted {
            return Err(self.reject("start"));
        }
        self.state.phase = SessionPhase::Running;
        log::info!("Session started (seed {})", self.seed);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::Running {
            return Err(self.reject("pause"));
        }
        self.state.phase = SessionPhase::Paused;
        log::info!("Paused");
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::Paused {
            return Err(self.reject("resume"));
        }
        self.state.phase = SessionPhase::Running;
        log::info!("Resumed");
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), SessionError> {
        match self.state.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => Err(self.reject("toggle pause")),
        }
    }

    /// Start over after game over; field and tuning carry across
    pub fn restart(&mut self, seed: u64) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::GameOver {
            return Err(self.reject("restart"));
        }
        let field = self.state.field;
        self.state = SessionState::new(field, &self.tuning);
        self.state.phase = SessionPhase::Running;
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
        self.pointer = None;
        log::info!("Session restarted (seed {seed})");
        Ok(())
    }

    /// Record a pointer sample; the latest one wins
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let point = Vec2::new(x, y);
        if point.is_finite() {
            self.pointer = Some(point);
        }
    }

    /// Update the field bounds (viewport resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        let field = Vec2::new(width, height);
        if !field.is_finite() || field.x <= 0.0 || field.y <= 0.0 {
            log::warn!("Ignoring invalid field size {width}x{height}");
            return;
        }
        self.state.field = field;
        let center = self.state.catcher.pos + self.state.catcher.size / 2.0;
        apply_pointer(&mut self.state, center);
    }

    /// Advance one tick; returns false when not running
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let input = TickInput {
            pointer: self.pointer.take(),
        };
        tick(&mut self.state, &mut self.rng, &input, &self.tuning);
        true
    }

    /// Events produced by the latest tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == SessionPhase::GameOver
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::difficulty::SauceKind;
    use crate::sim::state::SauceDrop;

    fn field() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn quiet() -> Tuning {
        Tuning {
            base_drop_rate: 0.0,
            drop_rate_step: 0.0,
            heart_spawn_rate: 0.0,
            ..Tuning::default()
        }
    }

    fn missed_drop() -> SauceDrop {
        SauceDrop {
            kind: SauceKind::Hot,
            pos: Vec2::new(10.0, 599.0),
            size: Vec2::new(DROP_WIDTH, DROP_HEIGHT),
            speed: 4.0,
            points: 2,
        }
    }

    fn caught_drop() -> SauceDrop {
        SauceDrop {
            kind: SauceKind::Mild,
            pos: Vec2::new(420.0, 520.0),
            size: Vec2::new(DROP_WIDTH, DROP_HEIGHT),
            speed: 3.0,
            points: 1,
        }
    }

    /// Miss drops one per tick until the session ends
    fn run_to_game_over(session: &mut Session) {
        while !session.is_game_over() {
            session.state_mut().drops.push(missed_drop());
            assert!(session.tick());
        }
    }

    #[test]
    fn test_start_only_once() {
        let mut session = Session::new(1, field(), quiet());
        assert!(!session.tick());
        assert!(session.start().is_ok());
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(
            session.start(),
            Err(SessionError::InvalidTransition {
                action: "start",
                phase: SessionPhase::Running
            })
        );
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut session = Session::new(1, field(), quiet());
        session.start().unwrap();
        session.state_mut().drops.push(caught_drop());
        session.pause().unwrap();

        assert!(!session.tick());
        assert_eq!(session.state().time_ticks, 0);
        assert_eq!(session.state().drops[0].pos.y, 520.0);
        assert!(session.pause().is_err());

        session.toggle_pause().unwrap();
        assert!(session.tick());
        assert_eq!(session.state().score, 1);
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut session = Session::new(1, field(), quiet());
        assert!(session.resume().is_err());
        assert!(session.toggle_pause().is_err());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_game_over_freezes() {
        let mut session = Session::new(1, field(), quiet());
        session.start().unwrap();
        run_to_game_over(&mut session);

        assert_eq!(session.state().lives, 0);
        assert_eq!(session.state().time_ticks, 30);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));

        session.state_mut().drops.push(missed_drop());
        assert!(!session.tick());
        assert_eq!(session.state().time_ticks, 30);
        assert!(session.pause().is_err());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new(1, field(), quiet());
        assert!(session.restart(2).is_err());
        session.start().unwrap();

        for _ in 0..120 {
            session.state_mut().drops.push(caught_drop());
            session.tick();
        }
        assert!(session.state().streak >= 100);
        run_to_game_over(&mut session);

        session.restart(2).unwrap();
        let state = session.state();
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.streak, 0);
        assert_eq!(state.multiplier.factor(), 1);
        assert!(state.drops.is_empty());
        assert_eq!(session.seed(), 2);
    }

    #[test]
    fn test_pointer_is_last_write_wins() {
        let mut session = Session::new(1, field(), quiet());
        session.start().unwrap();
        session.set_pointer(100.0, 100.0);
        session.set_pointer(f32::NAN, 5.0);
        session.set_pointer(200.0, 300.0);
        session.tick();
        assert_eq!(session.state().catcher.pos, Vec2::new(160.0, 270.0));
    }

    #[test]
    fn test_resize_keeps_catcher_inside() {
        let mut session = Session::new(1, field(), quiet());
        session.resize(300.0, 200.0);
        let state = session.state();
        assert_eq!(state.field, Vec2::new(300.0, 200.0));
        let center = state.catcher.pos + state.catcher.size / 2.0;
        assert!(center.x <= 300.0 && center.y <= 200.0);

        session.resize(f32::NAN, 100.0);
        session.resize(0.0, 100.0);
        assert_eq!(session.state().field, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mut a = Session::new(42, field(), Tuning::default());
        let mut b = Session::new(42, field(), Tuning::default());
        a.start().unwrap();
        b.start().unwrap();
        for _ in 0..3000 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.state().drops, b.state().drops);
        assert_eq!(a.state().misses, b.state().misses);
        assert_eq!(a.state().lives, b.state().lives);
    }
}
