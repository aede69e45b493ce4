//! Probabilistic spawning of sauce drops and hearts

use glam::Vec2;
use rand::Rng;

use super::difficulty::{DifficultyProfile, SauceKind};
use super::state::{SauceDrop, SessionState};
use crate::consts::*;

/// Pick a tier for a uniform draw in [0, 1) by walking cumulative mass
///
/// Returns the first tier whose cumulative probability reaches `roll`,
/// or `Mild` if rounding leaves the draw unmatched.
pub fn pick_kind(profile: &DifficultyProfile, roll: f32) -> SauceKind {
    let mut cumulative = 0.0;
    for sauce in &profile.sauces {
        cumulative += sauce.probability;
        if roll <= cumulative {
            return sauce.kind;
        }
    }
    SauceKind::Mild
}

/// Random x for an entity of `width`, kept clear of the right margin
fn spawn_x<R: Rng>(rng: &mut R, field_width: f32, width: f32) -> f32 {
    let span = (field_width - width - SPAWN_MARGIN).max(0.0);
    rng.random::<f32>() * span
}

/// Run both spawn rolls for one tick
pub fn spawn<R: Rng>(state: &mut SessionState, rng: &mut R, heart_spawn_rate: f32) {
    if !state.heart.active && rng.random::<f32>() < heart_spawn_rate {
        let x = spawn_x(rng, state.field.x, state.heart.size.x);
        state.heart.active = true;
        state.heart.pos = Vec2::new(x, 0.0);
        log::debug!("Heart spawned at x={x:.0}");
    }

    if rng.random::<f32>() < state.profile.drop_rate {
        if let Some(drop) = make_drop(&state.profile, state.field.x, rng) {
            state.drops.push(drop);
        }
    }
}

/// Build a drop at the top of the field
pub fn make_drop<R: Rng>(profile: &DifficultyProfile, field_width: f32, rng: &mut R) -> Option<SauceDrop> {
    let kind = pick_kind(profile, rng.random::<f32>());
    let sauce = profile.get(kind).or_else(|| profile.sauces.first())?;
    let x = spawn_x(rng, field_width, sauce.size.x);
    Some(SauceDrop {
        kind: sauce.kind,
        pos: Vec2::new(x, 0.0),
        size: sauce.size,
        speed: sauce.speed.lerp(rng.random::<f32>()),
        points: sauce.points,
    })
}
