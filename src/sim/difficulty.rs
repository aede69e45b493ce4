//! Per-level difficulty derived from the base balance table
//!
//! Everything here is a pure function of the level; no randomness.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Sauce tiers, ordered by value and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SauceKind {
    Mild,
    Hot,
    ExtraHot,
}

impl SauceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SauceKind::Mild => "mild",
            SauceKind::Hot => "hot",
            SauceKind::ExtraHot => "extraHot",
        }
    }

    /// Fallback fill color when the drop sprite is missing
    pub fn color(&self) -> &'static str {
        match self {
            SauceKind::Mild => "#ff6b6b",
            SauceKind::Hot => "#ff2d2d",
            SauceKind::ExtraHot => "#cc0000",
        }
    }
}

/// Fall speed bounds in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interpolate within the range, `t` in [0, 1)
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }
}

/// Derived parameters for one sauce tier at the current level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SauceProfile {
    pub kind: SauceKind,
    pub speed: SpeedRange,
    pub points: u32,
    pub probability: f32,
    pub size: Vec2,
}

/// Spawn parameters for the current level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub level: u32,
    /// Chance per tick of emitting a drop
    pub drop_rate: f32,
    /// Tiers in sampling order, lowest first
    pub sauces: Vec<SauceProfile>,
}

impl DifficultyProfile {
    pub fn get(&self, kind: SauceKind) -> Option<&SauceProfile> {
        self.sauces.iter().find(|s| s.kind == kind)
    }

    /// Sum of spawn probabilities (1.0 for every valid profile)
    pub fn total_probability(&self) -> f32 {
        self.sauces.iter().map(|s| s.probability).sum()
    }
}

/// Build the profile for a 1-based `level`
pub fn compute_profile(level: u32, base: &Tuning) -> DifficultyProfile {
    let level = level.max(1);
    let steps = (level - 1) as f32;
    let speed_factor = (1.0 + steps * base.speed_growth).min(base.max_speed_factor);
    let points_factor = 1.0 + steps * base.points_growth;

    let mut sauces: Vec<SauceProfile> = base
        .sauces
        .iter()
        .map(|sauce| SauceProfile {
            kind: sauce.kind,
            speed: SpeedRange::new(sauce.speed.min * speed_factor, sauce.speed.max * speed_factor),
            points: (sauce.points as f32 * points_factor).floor() as u32,
            probability: if level > 1 {
                sauce.shift.apply(sauce.probability, level)
            } else {
                sauce.probability
            },
            size: Vec2::new(DROP_WIDTH, DROP_HEIGHT),
        })
        .collect();

    // Level 1 keeps the base table as-is; it already sums to one.
    if level > 1 {
        let total: f32 = sauces.iter().map(|s| s.probability).sum();
        if total > 0.0 {
            for sauce in &mut sauces {
                sauce.probability /= total;
            }
        }
    }

    DifficultyProfile {
        level,
        drop_rate: (base.base_drop_rate + steps * base.drop_rate_step).min(base.max_drop_rate),
        sauces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_matches_base() {
        let profile = compute_profile(1, &Tuning::default());
        assert_eq!(profile.drop_rate, 0.006);
        let mild = profile.get(SauceKind::Mild).unwrap();
        assert_eq!(mild.speed, SpeedRange::new(3.0, 4.0));
        assert_eq!(mild.points, 1);
        assert_eq!(mild.probability, 0.6);
        assert_eq!(profile.get(SauceKind::ExtraHot).unwrap().points, 3);
    }

    #[test]
    fn test_level_two_scaling() {
        let profile = compute_profile(2, &Tuning::default());
        assert!((profile.drop_rate - 0.007).abs() < 1e-6);

        let hot = profile.get(SauceKind::Hot).unwrap();
        assert!((hot.speed.min - 4.6).abs() < 1e-4);
        assert!((hot.speed.max - 6.325).abs() < 1e-4);
        assert_eq!(hot.points, 2);

        // 0.55 / 0.33 / 0.12 before normalising (total 1.0)
        let mild = profile.get(SauceKind::Mild).unwrap();
        assert!((mild.probability - 0.55).abs() < 1e-4);
    }

    #[test]
    fn test_speed_and_rate_caps() {
        let profile = compute_profile(100, &Tuning::default());
        let extra = profile.get(SauceKind::ExtraHot).unwrap();
        assert!((extra.speed.min - 12.5).abs() < 1e-4);
        assert!((extra.speed.max - 17.5).abs() < 1e-4);
        assert_eq!(profile.drop_rate, 0.03);
    }

    #[test]
    fn test_points_growth() {
        let profile = compute_profile(8, &Tuning::default());
        let points: Vec<u32> = profile.sauces.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![2, 4, 6]);
    }

    #[test]
    fn test_sampling_order_is_stable() {
        let profile = compute_profile(5, &Tuning::default());
        let kinds: Vec<SauceKind> = profile.sauces.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SauceKind::Mild, SauceKind::Hot, SauceKind::ExtraHot]);
    }

    proptest! {
        #[test]
        fn prop_probabilities_sum_to_one(level in 1u32..500) {
            let profile = compute_profile(level, &Tuning::default());
            prop_assert!((profile.total_probability() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn prop_difficulty_is_monotonic(a in 1u32..200, b in 1u32..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let tuning = Tuning::default();
            let easy = compute_profile(lo, &tuning);
            let hard = compute_profile(hi, &tuning);
            for (e, h) in easy.sauces.iter().zip(&hard.sauces) {
                prop_assert!(h.speed.min >= e.speed.min);
                prop_assert!(h.speed.max >= e.speed.max);
                prop_assert!(h.points >= e.points);
            }
            prop_assert!(hard.drop_rate >= easy.drop_rate);
        }
    }
}
