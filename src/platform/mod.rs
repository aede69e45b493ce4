//! Platform abstraction layer
//!
//! Pointer and touch handlers run between ticks. They overwrite a shared
//! sample; the frame loop reads whatever is latest.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

/// Source of the current pointer position in field coordinates
pub trait InputSource {
    /// Latest position, if one arrived since the last sample
    fn sample(&mut self) -> Option<Vec2>;
}

/// Last-write-wins pointer cell shared between event handlers and the loop
#[derive(Debug, Clone, Default)]
pub struct PointerSample {
    latest: Rc<Cell<Option<Vec2>>>,
}

impl PointerSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position; non-finite coordinates are dropped
    pub fn write(&self, pos: Vec2) {
        if pos.is_finite() {
            self.latest.set(Some(pos));
        }
    }
}

impl InputSource for PointerSample {
    fn sample(&mut self) -> Option<Vec2> {
        self.latest.take()
    }
}

/// Map a client-space event position into the canvas's field space
pub fn client_to_field(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}
