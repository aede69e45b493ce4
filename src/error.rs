//! Error types shared across the crate

use thiserror::Error;

use crate::sim::SessionPhase;

/// A state machine request that does not apply in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
}

/// Failure loading tuning or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure inside a renderer; never fatal to the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("rendering context unavailable")]
    ContextUnavailable,
    #[error("draw call failed: {0}")]
    Draw(String),
}
