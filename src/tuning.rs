//! Data-driven game balance
//!
//! `Tuning::default()` is the shipped balance. A page can override any
//! subset of it with JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::difficulty::{SauceKind, SpeedRange};

/// Per-level drift of a sauce's spawn probability
///
/// A negative `per_level` lowers the probability toward `bound` (a floor);
/// a positive one raises it toward `bound` (a cap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityShift {
    pub per_level: f32,
    pub bound: f32,
}

impl ProbabilityShift {
    /// Shifted probability for a 1-based level
    pub fn apply(&self, base: f32, level: u32) -> f32 {
        let shifted = base + level.saturating_sub(1) as f32 * self.per_level;
        if self.per_level < 0.0 {
            shifted.max(self.bound)
        } else {
            shifted.min(self.bound)
        }
    }
}

/// Level-1 parameters for one sauce tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SauceTuning {
    pub kind: SauceKind,
    pub speed: SpeedRange,
    pub points: u32,
    pub probability: f32,
    pub shift: ProbabilityShift,
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Sauce tiers, lowest first. Order drives weighted sampling.
    pub sauces: Vec<SauceTuning>,
    /// Chance per tick of a drop at level 1
    pub base_drop_rate: f32,
    /// Drop chance added per level
    pub drop_rate_step: f32,
    /// Drop chance never exceeds this
    pub max_drop_rate: f32,
    /// Fractional speed gain per level
    pub speed_growth: f32,
    /// Speeds never exceed base times this factor
    pub max_speed_factor: f32,
    /// Fractional point gain per level
    pub points_growth: f32,
    /// Chance per tick of a heart while none is falling
    pub heart_spawn_rate: f32,
    /// Points needed to leave level 1
    pub first_level_threshold: u64,
    /// Threshold multiplier applied at each level-up
    pub threshold_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sauces: vec![
                SauceTuning {
                    kind: SauceKind::Mild,
                    speed: SpeedRange::new(3.0, 4.0),
                    points: 1,
                    probability: 0.6,
                    shift: ProbabilityShift {
                        per_level: -0.05,
                        bound: 0.3,
                    },
                },
                SauceTuning {
                    kind: SauceKind::Hot,
                    speed: SpeedRange::new(4.0, 5.5),
                    points: 2,
                    probability: 0.3,
                    shift: ProbabilityShift {
                        per_level: 0.03,
                        bound: 0.5,
                    },
                },
                SauceTuning {
                    kind: SauceKind::ExtraHot,
                    speed: SpeedRange::new(5.0, 7.0),
                    points: 3,
                    probability: 0.1,
                    shift: ProbabilityShift {
                        per_level: 0.02,
                        bound: 0.2,
                    },
                },
            ],
            base_drop_rate: 0.006,
            drop_rate_step: 0.001,
            max_drop_rate: 0.03,
            speed_growth: 0.15,
            max_speed_factor: 2.5,
            points_growth: 0.15,
            heart_spawn_rate: 0.0003,
            first_level_threshold: 200,
            threshold_growth: 2.5,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-tuning";

    /// Balance overrides embedded in `<script id="game-tuning">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json.map(|j| Self::from_json(&j)) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring page tuning: {e}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Reject tables the simulation cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sauces.is_empty() {
            return Err(ConfigError::Invalid("at least one sauce tier is required".into()));
        }
        for (i, sauce) in self.sauces.iter().enumerate() {
            if self.sauces[..i].iter().any(|s| s.kind == sauce.kind) {
                return Err(ConfigError::Invalid(format!("duplicate sauce {:?}", sauce.kind)));
            }
            if !(sauce.speed.min > 0.0 && sauce.speed.min <= sauce.speed.max) {
                return Err(ConfigError::Invalid(format!(
                    "{:?} speed range {}..{} is not ascending and positive",
                    sauce.kind, sauce.speed.min, sauce.speed.max
                )));
            }
            if !(0.0..=1.0).contains(&sauce.probability) {
                return Err(ConfigError::Invalid(format!(
                    "{:?} probability {} outside 0..=1",
                    sauce.kind, sauce.probability
                )));
            }
        }
        let total: f32 = self.sauces.iter().map(|s| s.probability).sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(ConfigError::Invalid(format!(
                "sauce probabilities sum to {total}, expected 1"
            )));
        }
        for (name, rate) in [
            ("base_drop_rate", self.base_drop_rate),
            ("max_drop_rate", self.max_drop_rate),
            ("heart_spawn_rate", self.heart_spawn_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!("{name} {rate} outside 0..=1")));
            }
        }
        if self.first_level_threshold == 0 {
            return Err(ConfigError::Invalid("first_level_threshold must be positive".into()));
        }
        if self.threshold_growth < 1.0 || self.max_speed_factor < 1.0 {
            return Err(ConfigError::Invalid(
                "threshold_growth and max_speed_factor must be at least 1".into(),
            ));
        }
        if self.speed_growth < 0.0 || self.points_growth < 0.0 || self.drop_rate_step < 0.0 {
            return Err(ConfigError::Invalid("growth rates must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_drop_rate": 0.01 }"#).unwrap();
        assert_eq!(tuning.base_drop_rate, 0.01);
        assert_eq!(tuning.sauces.len(), 3);
        assert_eq!(tuning.first_level_threshold, 200);
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let mut tuning = Tuning::default();
        tuning.sauces[0].probability = 0.9;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_duplicate_kind() {
        let mut tuning = Tuning::default();
        tuning.sauces[1].kind = SauceKind::Mild;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_probability_shift_bounds() {
        let floor = ProbabilityShift {
            per_level: -0.05,
            bound: 0.3,
        };
        assert_eq!(floor.apply(0.6, 1), 0.6);
        assert_eq!(floor.apply(0.6, 20), 0.3);

        let cap = ProbabilityShift {
            per_level: 0.02,
            bound: 0.2,
        };
        assert_eq!(cap.apply(0.1, 50), 0.2);
    }
}
