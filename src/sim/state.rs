//! Session state and core simulation types
//!
//! Everything the renderer reads lives here. The session owns one
//! `SessionState` and is its only mutator.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::{DifficultyProfile, SauceKind, compute_profile};
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start screen showing, nothing ticking
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen by the player or an auto-pause
    Paused,
    /// Out of lives; final score on display
    GameOver,
}

/// A falling sauce drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SauceDrop {
    pub kind: SauceKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub points: u32,
}

impl SauceDrop {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The player's catcher, placed by pointer/touch input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catcher {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Catcher {
    /// Initial placement for a field
    pub fn for_field(field: Vec2) -> Self {
        Self {
            pos: Vec2::new(field.x / 2.0, field.y - CATCHER_BOTTOM_OFFSET),
            size: Vec2::new(CATCHER_WIDTH, CATCHER_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Center the catcher on a pointer position
    pub fn center_on(&mut self, point: Vec2) {
        self.pos = point - self.size / 2.0;
    }
}

/// The rare heart that restores a life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartPowerUp {
    pub active: bool,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Default for HeartPowerUp {
    fn default() -> Self {
        Self {
            active: false,
            pos: Vec2::ZERO,
            size: Vec2::splat(HEART_SIZE),
            speed: HEART_SPEED,
        }
    }
}

impl HeartPowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Score multiplier unlocked by catch streaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiplier {
    pub active: bool,
    pub value: u32,
    /// Catches left before it expires
    pub remaining: u32,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self {
            active: false,
            value: 1,
            remaining: 0,
        }
    }
}

impl Multiplier {
    /// Factor applied to a catch
    pub fn factor(&self) -> u32 {
        if self.active { self.value } else { 1 }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Rolling miss counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissTracker {
    pub count: u32,
    /// Tick of the last counter reset
    pub window_start: u64,
}

/// What a floating callout says
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutKind {
    Points(u64),
    ExtraLife,
    MaxLives,
    MultiplierActivated(u32),
    MultiplierExpired,
    MultiplierLost,
}

impl fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalloutKind::Points(points) => write!(f, "+{points}"),
            CalloutKind::ExtraLife => write!(f, "+1 LIFE"),
            CalloutKind::MaxLives => write!(f, "MAX LIVES"),
            CalloutKind::MultiplierActivated(m) => write!(f, "{m}X MULTIPLIER!"),
            CalloutKind::MultiplierExpired => write!(f, "MULTIPLIER EXPIRED!"),
            CalloutKind::MultiplierLost => write!(f, "MULTIPLIER LOST!"),
        }
    }
}

/// Floating text that drifts up and fades (presentation only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub pos: Vec2,
    pub kind: CalloutKind,
    /// Opacity-like lifetime, removed at zero
    pub life: f32,
}

/// Flash shown after losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeWarning {
    pub lives_remaining: u8,
    pub timer: u32,
}

impl LifeWarning {
    pub fn opacity(&self) -> f32 {
        self.timer as f32 / LIFE_WARNING_TICKS as f32
    }

    pub fn message(&self) -> String {
        let noun = if self.lives_remaining == 1 { "LIFE" } else { "LIVES" };
        format!("{} {noun} REMAINING!", self.lives_remaining)
    }
}

/// "Level N!" banner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUpBanner {
    pub level: u32,
    pub life: f32,
}

/// Events produced during a tick, drained by the shell for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Caught { kind: SauceKind, points: u64 },
    Missed { kind: SauceKind },
    ExtraLife { lives: u8 },
    MaxLives,
    LifeLost { lives: u8 },
    MultiplierActivated { value: u32 },
    MultiplierExpired,
    MultiplierLost,
    LevelUp { level: u32 },
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub score: u64,
    /// 1-based level
    pub level: u32,
    /// Progress toward the next level
    pub level_score: i64,
    pub score_to_next_level: u64,
    pub lives: u8,
    pub misses: MissTracker,
    pub streak: u32,
    pub multiplier: Multiplier,
    /// Play field size in pixels
    pub field: Vec2,
    pub catcher: Catcher,
    pub drops: Vec<SauceDrop>,
    pub heart: HeartPowerUp,
    pub profile: DifficultyProfile,
    /// Ticks simulated since the session began
    pub time_ticks: u64,
    pub callouts: Vec<Callout>,
    pub life_warning: Option<LifeWarning>,
    pub level_banner: Option<LevelUpBanner>,
    /// Red overlay intensity from recent misses
    pub miss_overlay: f32,
    /// Events from the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// Fresh state for a field, waiting for `start`
    pub fn new(field: Vec2, tuning: &Tuning) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            score: 0,
            level: 1,
            level_score: 0,
            score_to_next_level: tuning.first_level_threshold,
            lives: START_LIVES,
            misses: MissTracker::default(),
            streak: 0,
            multiplier: Multiplier::default(),
            field,
            catcher: Catcher::for_field(field),
            drops: Vec::new(),
            heart: HeartPowerUp::default(),
            profile: compute_profile(1, tuning),
            time_ticks: 0,
            callouts: Vec::new(),
            life_warning: None,
            level_banner: None,
            miss_overlay: 0.0,
            events: Vec::new(),
        }
    }

    /// Center of the play field, where global callouts appear
    pub fn field_center(&self) -> Vec2 {
        self.field / 2.0
    }

    pub fn push_callout(&mut self, pos: Vec2, kind: CalloutKind, life: f32) {
        self.callouts.push(Callout { pos, kind, life });
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SessionState::new(Vec2::new(800.0, 600.0), &Tuning::default());
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.score_to_next_level, 200);
        assert_eq!(state.multiplier.factor(), 1);
        assert_eq!(state.catcher.pos, Vec2::new(400.0, 540.0));
    }

    #[test]
    fn test_callout_text() {
        assert_eq!(CalloutKind::Points(6).to_string(), "+6");
        assert_eq!(CalloutKind::MultiplierActivated(3).to_string(), "3X MULTIPLIER!");
        assert_eq!(CalloutKind::MaxLives.to_string(), "MAX LIVES");
    }

    #[test]
    fn test_life_warning_message() {
        let one = LifeWarning {
            lives_remaining: 1,
            timer: 60,
        };
        assert_eq!(one.message(), "1 LIFE REMAINING!");
        assert_eq!(one.opacity(), 1.0);

        let two = LifeWarning {
            lives_remaining: 2,
            timer: 30,
        };
        assert_eq!(two.message(), "2 LIVES REMAINING!");
        assert_eq!(two.opacity(), 0.5);
    }
}
