//! Data-driven game balance
//!
//! Spawn rates and difficulty curve. Every field has a default, so a partial
//! JSON object only overrides what it names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick pollution spawn chance at difficulty 1
    pub hazard_spawn_base: f32,
    /// Per-tick renewable spawn chance at difficulty 1
    pub bonus_spawn_base: f32,
    /// Score needed to add 1.0 to the difficulty factor
    pub score_per_difficulty: f32,
    /// Difficulty ceiling
    pub max_difficulty: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hazard_spawn_base: 0.02,
            bonus_spawn_base: 0.015,
            score_per_difficulty: 100.0,
            max_difficulty: 4.0,
        }
    }
}

impl Tuning {
    /// Tuning with both spawn rates zeroed (scripted scenarios, tests)
    pub fn no_spawns() -> Self {
        Self {
            hazard_spawn_base: 0.0,
            bonus_spawn_base: 0.0,
            ..Self::default()
        }
    }

    /// Difficulty factor for a score: `min(1 + score / step, max)`
    pub fn difficulty(&self, score: u64) -> f32 {
        let step = self.score_per_difficulty.max(f32::EPSILON);
        (1.0 + score as f32 / step).min(self.max_difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_scenarios() {
        let tuning = Tuning::default();
        assert_eq!(tuning.difficulty(0), 1.0);
        assert_eq!(tuning.difficulty(100), 2.0);
        assert_eq!(tuning.difficulty(150), 2.5);
        assert_eq!(tuning.difficulty(350), 4.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = serde_json::from_str::<Tuning>(r#"{ "hazard_spawn_base": 0.05 }"#).unwrap();
        assert_eq!(tuning.hazard_spawn_base, 0.05);
        assert_eq!(tuning.bonus_spawn_base, 0.015);
        assert_eq!(tuning.max_difficulty, 4.0);
    }

    proptest! {
        #[test]
        fn difficulty_is_monotonic(a in 0u64..10_000, b in 0u64..10_000) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tuning.difficulty(lo) <= tuning.difficulty(hi));
        }

        #[test]
        fn difficulty_caps_at_four(score in 300u64..1_000_000) {
            prop_assert_eq!(Tuning::default().difficulty(score), 4.0);
        }
    }
}
