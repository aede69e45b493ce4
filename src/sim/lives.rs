//! Miss tracking, life loss and game over

use super::state::{CalloutKind, GameEvent, LifeWarning, SessionPhase, SessionState};
use crate::consts::*;

/// Handle a drop that reached the bottom of the field
///
/// Window expiry is checked before counting, so the miss that lands after
/// a quiet 30 seconds starts a fresh count of one.
pub fn on_miss(state: &mut SessionState) {
    if state.phase == SessionPhase::GameOver {
        return;
    }

    if state.multiplier.active {
        let center = state.field_center();
        state.push_callout(center, CalloutKind::MultiplierLost, 1.0);
        state.events.push(GameEvent::MultiplierLost);
    }
    state.streak = 0;
    state.multiplier.reset();

    let now = state.time_ticks;
    if now.saturating_sub(state.misses.window_start) >= MISS_WINDOW_TICKS {
        state.misses.count = 0;
        state.misses.window_start = now;
    }

    state.misses.count += 1;
    state.miss_overlay =
        (state.misses.count as f32 / MISSES_PER_LIFE as f32).min(1.0) * MISS_OVERLAY_MAX;

    if state.misses.count >= MISSES_PER_LIFE {
        state.misses.count = 0;
        state.misses.window_start = now;
        lose_life(state);
    }
}

fn lose_life(state: &mut SessionState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        state.phase = SessionPhase::GameOver;
        state.life_warning = None;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!("Game over at level {} with {} points", state.level, state.score);
    } else {
        state.life_warning = Some(LifeWarning {
            lives_remaining: state.lives,
            timer: LIFE_WARNING_TICKS,
        });
        log::info!("Life lost, {} remaining", state.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running() -> SessionState {
        let mut state = SessionState::new(Vec2::new(800.0, 600.0), &Tuning::default());
        state.phase = SessionPhase::Running;
        state
    }

    #[test]
    fn test_miss_resets_streak_and_multiplier() {
        let mut state = running();
        state.streak = 60;
        state.multiplier.active = true;
        state.multiplier.value = 2;
        state.multiplier.remaining = 500;

        on_miss(&mut state);
        assert_eq!(state.streak, 0);
        assert!(!state.multiplier.active);
        assert_eq!(state.multiplier.value, 1);
        assert_eq!(state.callouts[0].kind, CalloutKind::MultiplierLost);
        assert_eq!(state.misses.count, 1);
    }

    #[test]
    fn test_miss_without_multiplier_is_quiet() {
        let mut state = running();
        on_miss(&mut state);
        assert!(state.callouts.is_empty());
        assert!(!state.events.contains(&GameEvent::MultiplierLost));
    }

    #[test]
    fn test_overlay_grows_with_misses() {
        let mut state = running();
        for _ in 0..5 {
            on_miss(&mut state);
        }
        assert!((state.miss_overlay - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_ten_misses_cost_one_life() {
        let mut state = running();
        for _ in 0..9 {
            on_miss(&mut state);
        }
        assert_eq!(state.lives, 3);

        on_miss(&mut state);
        assert_eq!(state.lives, 2);
        assert_eq!(state.misses.count, 0);
        let warning = state.life_warning.unwrap();
        assert_eq!(warning.message(), "2 LIVES REMAINING!");
        assert!(state.events.contains(&GameEvent::LifeLost { lives: 2 }));
    }

    #[test]
    fn test_stale_misses_expire() {
        let mut state = running();
        for _ in 0..9 {
            on_miss(&mut state);
        }
        state.time_ticks += MISS_WINDOW_TICKS;

        on_miss(&mut state);
        assert_eq!(state.lives, 3);
        assert_eq!(state.misses.count, 1);
        assert_eq!(state.misses.window_start, MISS_WINDOW_TICKS);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = running();
        state.lives = 1;
        state.score = 42;
        for _ in 0..10 {
            on_miss(&mut state);
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert!(state.life_warning.is_none());
        assert!(state.events.contains(&GameEvent::GameOver { final_score: 42 }));

        // Further misses change nothing
        on_miss(&mut state);
        assert_eq!(state.misses.count, 0);
        assert_eq!(state.lives, 0);
    }
}
