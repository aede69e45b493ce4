//! Level thresholds and level-up

use super::difficulty::compute_profile;
use super::state::{GameEvent, LevelUpBanner, SessionState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Check the score against the current threshold; returns true on level-up
///
/// Progress is measured as `score - threshold * (level - 1)` against the
/// current threshold, which grows by `threshold_growth` each level.
pub fn update_level(state: &mut SessionState, tuning: &Tuning) -> bool {
    let threshold = state.score_to_next_level as i64;
    let relative = state.score as i64 - threshold * (state.level as i64 - 1);

    if relative < threshold {
        state.level_score = relative;
        return false;
    }

    state.level += 1;
    state.level_score = relative - threshold;
    state.score_to_next_level =
        (state.score_to_next_level as f64 * tuning.threshold_growth as f64).floor() as u64;
    state.profile = compute_profile(state.level, tuning);
    state.level_banner = Some(LevelUpBanner {
        level: state.level,
        life: LEVEL_BANNER_LIFE,
    });
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!(
        "Level {} (next threshold {}, drop rate {:.3})",
        state.level,
        state.score_to_next_level,
        state.profile.drop_rate
    );
    true
}
