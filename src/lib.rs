//! Catch the Heat - a falling-sauce catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, lives, levels)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Sound hooks (Web Audio on the browser)
//! - `renderer`: Canvas 2D drawing
//! - `platform`: Pointer/touch input sampling

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, RenderError, SessionError};
pub use settings::{CatcherSkin, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate (one tick per animation frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Catcher defaults
    pub const CATCHER_WIDTH: f32 = 80.0;
    pub const CATCHER_HEIGHT: f32 = 60.0;
    /// Distance from the bottom edge to the catcher's top at spawn
    pub const CATCHER_BOTTOM_OFFSET: f32 = 60.0;

    /// Sauce drop dimensions
    pub const DROP_WIDTH: f32 = 20.0;
    pub const DROP_HEIGHT: f32 = 30.0;

    /// Heart power-up defaults
    pub const HEART_SIZE: f32 = 30.0;
    pub const HEART_SPEED: f32 = 2.0;

    /// Keep spawns this far from the right edge
    pub const SPAWN_MARGIN: f32 = 70.0;

    /// Lives
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Misses that cost one life
    pub const MISSES_PER_LIFE: u32 = 10;
    /// Misses older than this no longer count toward a life (30 seconds)
    pub const MISS_WINDOW_TICKS: u64 = 30 * TICKS_PER_SECOND as u64;
    /// Peak intensity of the red miss overlay
    pub const MISS_OVERLAY_MAX: f32 = 0.3;
    /// Overlay fade per tick
    pub const MISS_OVERLAY_FADE: f32 = 0.002;

    /// Consecutive catches needed per multiplier step
    pub const STREAK_STEP: u32 = 50;
    /// Multiplier lifetime, counted down once per catch
    pub const MULTIPLIER_DURATION: u32 = 30 * TICKS_PER_SECOND;

    /// Level-up banner lifetime and per-tick decay
    pub const LEVEL_BANNER_LIFE: f32 = 2.0;
    pub const LEVEL_BANNER_DECAY: f32 = 0.016;
    /// Life warning duration (about a second)
    pub const LIFE_WARNING_TICKS: u32 = 60;
}

/// Text posted when sharing a final score
pub fn share_message(score: u64) -> String {
    format!("I scored {score} points in Catch the Heat! Can you beat my score?")
}
