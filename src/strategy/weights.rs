//! Tunable constants of the heuristic strategy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Weights and thresholds used by the strategy phases.
///
/// Any field missing from a weights file keeps its default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyWeights {
    /// Cyborgs spent by one production upgrade (default: 10).
    pub upgrade_cost: u32,
    /// Highest production factor a factory can reach (default: 3).
    pub max_production: u32,
    /// A bomb is launched when the strongest enemy projects more than this
    /// multiple of our strongest garrison (default: 2.0).
    pub bomb_trigger: f64,
    /// Attack value of a target with no production (default: 0.25).
    pub attack_base: f64,
    /// Attack value added per production level (default: 2.0).
    pub attack_production: f64,
    /// Attack multiplier for enemy-owned targets (default: 1.2).
    pub attack_enemy: f64,
    /// Numerator of the per-ally proximity term (default: 9.0).
    pub attack_distance: f64,
    /// Support value of a factory with no production (default: 0.1).
    pub support_production_base: f64,
    /// Support value added per production level (default: 2.5).
    pub support_production_scale: f64,
    /// Weight of a factory's share of all cyborgs in its support value (default: 10.0).
    pub support_share_scale: f64,
    /// Mean distance assumed when the enemy owns no factory (default: 10.0).
    pub empty_faction_distance: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            upgrade_cost: 10,
            max_production: 3,
            bomb_trigger: 2.0,
            attack_base: 0.25,
            attack_production: 2.0,
            attack_enemy: 1.2,
            attack_distance: 9.0,
            support_production_base: 0.1,
            support_production_scale: 2.5,
            support_share_scale: 10.0,
            empty_faction_distance: 10.0,
        }
    }
}

impl StrategyWeights {
    /// Parse weights from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of known fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load weights from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.display().to_string(),
            error,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let weights = StrategyWeights::from_json(r#"{"upgrade_cost": 12, "bomb_trigger": 3.5}"#)
            .unwrap();
        assert_eq!(weights.upgrade_cost, 12);
        assert!((weights.bomb_trigger - 3.5).abs() < f64::EPSILON);
        assert_eq!(weights.max_production, 3);
        assert!((weights.attack_enemy - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = StrategyWeights::from_json(r#"{"upgrade_costs": 12}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_object_is_default() {
        let weights = StrategyWeights::from_json("{}").unwrap();
        assert_eq!(weights, StrategyWeights::default());
    }
}
