//! Catch resolution: streaks, multipliers and points

use super::state::{CalloutKind, GameEvent, SauceDrop, SessionState};
use crate::consts::*;

/// Multiplier earned by a streak milestone, if `streak` is one
pub fn milestone_multiplier(streak: u32) -> Option<u32> {
    (streak >= STREAK_STEP && streak.is_multiple_of(STREAK_STEP)).then(|| 1 + streak / STREAK_STEP)
}

/// Apply a caught drop and return the points awarded
pub fn on_catch(state: &mut SessionState, drop: &SauceDrop) -> u64 {
    state.streak += 1;

    if let Some(value) = milestone_multiplier(state.streak) {
        state.multiplier.active = true;
        state.multiplier.value = value;
        state.multiplier.remaining = MULTIPLIER_DURATION;
        let center = state.field_center();
        state.push_callout(center, CalloutKind::MultiplierActivated(value), 2.0);
        state.events.push(GameEvent::MultiplierActivated { value });
        log::info!("{value}x multiplier at streak {}", state.streak);
    }

    if state.multiplier.active {
        state.multiplier.remaining = state.multiplier.remaining.saturating_sub(1);
        if state.multiplier.remaining == 0 {
            state.multiplier.reset();
            let center = state.field_center();
            state.push_callout(center, CalloutKind::MultiplierExpired, 1.0);
            state.events.push(GameEvent::MultiplierExpired);
        }
    }

    let points = drop.points as u64 * state.multiplier.factor() as u64;
    state.score += points;
    state.push_callout(drop.pos, CalloutKind::Points(points), 1.0);
    state.events.push(GameEvent::Caught {
        kind: drop.kind,
        points,
    });
    points
}

/// Apply a caught heart
pub fn on_heart_catch(state: &mut SessionState) {
    let pos = state.heart.pos;
    if state.lives < MAX_LIVES {
        state.lives += 1;
        state.push_callout(pos, CalloutKind::ExtraLife, 1.0);
        state.events.push(GameEvent::ExtraLife { lives: state.lives });
    } else {
        state.push_callout(pos, CalloutKind::MaxLives, 1.0);
        state.events.push(GameEvent::MaxLives);
    }
    state.heart.active = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::SauceKind;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> SessionState {
        SessionState::new(Vec2::new(800.0, 600.0), &Tuning::default())
    }

    fn mild(points: u32) -> SauceDrop {
        SauceDrop {
            kind: SauceKind::Mild,
            pos: Vec2::new(100.0, 500.0),
            size: Vec2::new(DROP_WIDTH, DROP_HEIGHT),
            speed: 3.0,
            points,
        }
    }

    #[test]
    fn test_single_catch() {
        let mut state = state();
        assert_eq!(on_catch(&mut state, &mild(1)), 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.callouts[0].kind, CalloutKind::Points(1));
        assert_eq!(state.callouts[0].pos, Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_milestones() {
        assert_eq!(milestone_multiplier(49), None);
        assert_eq!(milestone_multiplier(50), Some(2));
        assert_eq!(milestone_multiplier(75), None);
        assert_eq!(milestone_multiplier(100), Some(3));
        assert_eq!(milestone_multiplier(0), None);
    }

    #[test]
    fn test_streak_of_fifty_doubles() {
        let mut state = state();
        for _ in 0..49 {
            on_catch(&mut state, &mild(1));
        }
        assert!(!state.multiplier.active);
        assert_eq!(state.score, 49);

        assert_eq!(on_catch(&mut state, &mild(1)), 2);
        assert!(state.multiplier.active);
        assert_eq!(state.multiplier.value, 2);
        assert_eq!(state.multiplier.remaining, MULTIPLIER_DURATION - 1);
        assert!(state.events.contains(&GameEvent::MultiplierActivated { value: 2 }));
    }

    #[test]
    fn test_streak_of_hundred_triples() {
        let mut state = state();
        for _ in 0..100 {
            on_catch(&mut state, &mild(1));
        }
        assert_eq!(state.multiplier.value, 3);
        // 49 singles, 50 doubles, then the tripled 100th catch
        assert_eq!(state.score, 49 + 50 * 2 + 3);
    }

    #[test]
    fn test_multiplier_expires() {
        let mut state = state();
        state.multiplier.active = true;
        state.multiplier.value = 2;
        state.multiplier.remaining = 1;
        state.streak = 10;

        assert_eq!(on_catch(&mut state, &mild(1)), 1);
        assert!(!state.multiplier.active);
        assert_eq!(state.multiplier.value, 1);
        assert!(state.events.contains(&GameEvent::MultiplierExpired));
    }

    #[test]
    fn test_heart_below_cap() {
        let mut state = state();
        state.heart.active = true;
        on_heart_catch(&mut state);
        assert_eq!(state.lives, 4);
        assert!(!state.heart.active);
        assert_eq!(state.callouts[0].kind, CalloutKind::ExtraLife);
    }

    #[test]
    fn test_heart_at_cap() {
        let mut state = state();
        state.lives = MAX_LIVES;
        state.heart.active = true;
        on_heart_catch(&mut state);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.callouts[0].kind, CalloutKind::MaxLives);
        assert_eq!(state.events, vec![GameEvent::MaxLives]);
    }
}
