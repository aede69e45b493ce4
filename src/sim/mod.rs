//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (sauce tiers are an ordered list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod level;
pub mod lives;
pub mod scoring;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use difficulty::{DifficultyProfile, SauceKind, SauceProfile, SpeedRange, compute_profile};
pub use session::Session;
pub use state::{
    Callout, CalloutKind, Catcher, GameEvent, HeartPowerUp, LevelUpBanner, LifeWarning,
    MissTracker, Multiplier, SauceDrop, SessionPhase, SessionState,
};
pub use tick::{TickInput, tick};
