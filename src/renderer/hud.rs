//! HUD layout, independent of the drawing backend

use glam::Vec2;

use crate::consts::*;
use crate::sim::SessionState;

const PADDING: f32 = 15.0;
const SCORE_Y: f32 = 30.0;
const LEVEL_Y: f32 = 60.0;
const LIVES_Y: f32 = 110.0;
const LIVES_X: f32 = 10.0;
const HEART_SPACING: f32 = 30.0;
const HEARTS_PER_ROW: usize = 10;
const STATUS_Y: f32 = 140.0;
/// Streak hint appears once the streak passes this
const STREAK_HINT_FROM: u32 = 30;

/// Line under the hearts: active multiplier or the run-up to one
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    Multiplier { text: String },
    Streak { text: String },
}

/// Text and positions for one frame of HUD
#[derive(Debug, Clone, PartialEq)]
pub struct HudLayout {
    pub score: (String, Vec2),
    pub level: (String, Vec2),
    pub hearts: Vec<Vec2>,
    pub status: Option<(StatusLine, Vec2)>,
}

impl HudLayout {
    pub fn build(state: &SessionState) -> Self {
        let hearts = (0..state.lives as usize)
            .map(|i| {
                let row = (i / HEARTS_PER_ROW) as f32;
                let col = (i % HEARTS_PER_ROW) as f32;
                Vec2::new(LIVES_X + col * HEART_SPACING, LIVES_Y + row * HEART_SPACING)
            })
            .collect();

        let status = if state.multiplier.active {
            let seconds = state.multiplier.remaining.div_ceil(TICKS_PER_SECOND);
            Some(StatusLine::Multiplier {
                text: format!("{}X MULTIPLIER! ({seconds}s)", state.multiplier.value),
            })
        } else if state.streak > STREAK_HINT_FROM {
            Some(StatusLine::Streak {
                text: format!("Streak: {}/{STREAK_STEP}", state.streak),
            })
        } else {
            None
        };

        Self {
            score: (format!("Score: {}", state.score), Vec2::new(PADDING, SCORE_Y)),
            level: (format!("Level {}", state.level), Vec2::new(PADDING, LEVEL_Y)),
            hearts,
            status: status.map(|s| (s, Vec2::new(LIVES_X, STATUS_Y))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> SessionState {
        SessionState::new(Vec2::new(800.0, 600.0), &Tuning::default())
    }

    #[test]
    fn test_basic_layout() {
        let mut state = state();
        state.score = 17;
        let hud = HudLayout::build(&state);
        assert_eq!(hud.score.0, "Score: 17");
        assert_eq!(hud.level.0, "Level 1");
        assert_eq!(hud.hearts.len(), 3);
        assert_eq!(hud.hearts[2], Vec2::new(70.0, 110.0));
        assert!(hud.status.is_none());
    }

    #[test]
    fn test_streak_hint() {
        let mut state = state();
        state.streak = 31;
        let hud = HudLayout::build(&state);
        let (line, _) = hud.status.unwrap();
        assert_eq!(
            line,
            StatusLine::Streak {
                text: "Streak: 31/50".into()
            }
        );
    }

    #[test]
    fn test_multiplier_countdown() {
        let mut state = state();
        state.multiplier.active = true;
        state.multiplier.value = 2;
        state.multiplier.remaining = 61;
        let (line, _) = HudLayout::build(&state).status.unwrap();
        assert_eq!(
            line,
            StatusLine::Multiplier {
                text: "2X MULTIPLIER! (2s)".into()
            }
        );
    }
}
