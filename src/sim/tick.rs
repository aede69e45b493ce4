//! Fixed tick simulation
//!
//! One call advances the session by one animation frame: spawn, move,
//! resolve catches and misses, then check the level threshold.

use glam::Vec2;
use rand::Rng;

use super::level::update_level;
use super::lives::on_miss;
use super::scoring::{on_catch, on_heart_catch};
use super::spawn::spawn;
use super::state::{GameEvent, SessionState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer/touch position in field coordinates
    pub pointer: Option<Vec2>,
}

/// Move the catcher under a pointer, ignoring non-finite samples
pub fn apply_pointer(state: &mut SessionState, point: Vec2) {
    if !point.is_finite() {
        log::debug!("Ignoring non-finite pointer sample {point:?}");
        return;
    }
    let clamped = point.clamp(Vec2::ZERO, state.field.max(Vec2::ZERO));
    state.catcher.center_on(clamped);
}

/// Advance the session by one tick; does nothing unless running
pub fn tick<R: Rng>(state: &mut SessionState, rng: &mut R, input: &TickInput, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    if let Some(point) = input.pointer {
        apply_pointer(state, point);
    }

    spawn(state, rng, tuning.heart_spawn_rate);

    // Physics
    if state.heart.active {
        state.heart.pos.y += state.heart.speed;
    }
    for drop in &mut state.drops {
        drop.pos.y += drop.speed;
    }

    // Age the current warning before collisions so a new one is drawn
    // at full strength on its first frame
    decay_life_warning(state);

    // Collisions
    let catcher = state.catcher.rect();
    if state.heart.active {
        if state.heart.rect().overlaps(&catcher) {
            on_heart_catch(state);
        } else if state.heart.pos.y >= state.field.y {
            // Missed hearts carry no penalty
            state.heart.active = false;
        }
    }

    let drops = std::mem::take(&mut state.drops);
    let mut falling = Vec::with_capacity(drops.len());
    for drop in drops {
        if !state.is_running() {
            // Game over earlier in this loop freezes the rest
            falling.push(drop);
        } else if drop.rect().overlaps(&catcher) {
            on_catch(state, &drop);
        } else if drop.pos.y >= state.field.y {
            state.events.push(GameEvent::Missed { kind: drop.kind });
            on_miss(state);
        } else {
            falling.push(drop);
        }
    }
    state.drops = falling;

    decay_presentation(state);

    if state.is_running() {
        update_level(state, tuning);
    }
}

fn decay_life_warning(state: &mut SessionState) {
    if let Some(warning) = &mut state.life_warning {
        warning.timer = warning.timer.saturating_sub(1);
        if warning.timer == 0 {
            state.life_warning = None;
        }
    }
}

/// Fade callouts, banners and overlays
fn decay_presentation(state: &mut SessionState) {
    for callout in &mut state.callouts {
        callout.pos.y -= 1.0;
        callout.life -= 0.02;
    }
    state.callouts.retain(|c| c.life > 0.0);

    if let Some(banner) = &mut state.level_banner {
        banner.life -= LEVEL_BANNER_DECAY;
        if banner.life <= 0.0 {
            state.level_banner = None;
        }
    }

    state.miss_overlay = (state.miss_overlay - MISS_OVERLAY_FADE).max(0.0);
}
