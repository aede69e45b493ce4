//! Rendering module
//!
//! The simulation hands a `SessionState` to a `Renderer` after each frame.
//! Failures come back as `RenderError` and never affect the session.

pub mod hud;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use hud::{HudLayout, StatusLine};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::error::RenderError;
use crate::sim::SessionState;

/// Drawing collaborator
pub trait Renderer {
    fn draw(&mut self, state: &SessionState) -> Result<(), RenderError>;
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &SessionState) -> Result<(), RenderError> {
        Ok(())
    }
}
