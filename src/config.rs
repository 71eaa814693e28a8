use serde::{Deserialize, Serialize};

use crate::county::PatchId;
use crate::utils::validation::validate_parameters;

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General run settings (seed, logging)
    #[serde(default)]
    pub general: GeneralConfig,
    /// Parameters handed to the simulation core
    #[serde(default)]
    pub simulation: Parameters,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.general.log_level {
            if level.trim().is_empty() {
                return Err(ConfigError::InvalidGeneral(
                    "log_level cannot be empty".to_string(),
                ));
            }
        }

        validate_parameters(&self.simulation)
    }
}

/// General run settings that never influence simulation semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Seed for the run's random number generator; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Default env_logger filter (e.g. "info", "debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Simulation parameters consumed by `initialize` and `advance`.
///
/// `num_turns` is the number of turns the *next* call adds, not the length of
/// the timeline. `manual_override` is consumed by the call that applies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Side length of the county; the county holds `county_size²` glens
    pub county_size: usize,
    /// Topology shape name: "grid", "hex", anything else is a random tree
    pub topology: String,
    /// Number of flocks placed at initialization
    pub num_flocks: usize,
    /// Sheep per flock at initialization
    pub initial_flock_size: usize,
    /// Turns added by the next initialize/advance call
    pub num_turns: usize,
    /// Multiplier applied to every glen's abundance each turn (capped at 1)
    pub glen_growth_rate: f64,
    /// Abundance a sheep removes from its glen when it eats
    pub sheep_greed: f64,
    /// Consecutive unfed turns a sheep survives
    pub sheep_endurance: u32,
    /// Probability that a fed sheep produces a lamb
    pub sheep_reproduction_rate: f64,
    /// Movement strategy name
    pub strategy: String,
    /// Single-use destination for manual flocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<PatchId>,
}

impl Parameters {
    /// Number of glens the county holds for these parameters.
    pub fn node_count(&self) -> usize {
        self.county_size.saturating_mul(self.county_size)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            county_size: 8,
            topology: "grid".to_string(),
            num_flocks: 32,
            initial_flock_size: 16,
            num_turns: 25,
            glen_growth_rate: 1.5,
            sheep_greed: 0.05,
            sheep_endurance: 3,
            sheep_reproduction_rate: 0.25,
            strategy: "random".to_string(),
            manual_override: None,
        }
    }
}

/// Configuration errors. Raised before any simulation state is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown movement strategy '{0}' (expected one of: random, maxAbundance, weighted, fleeLowGrass)")]
    UnknownStrategy(String),
    #[error("Parameter '{field}' is not a number")]
    NotANumber { field: &'static str },
    #[error("Parameter '{field}' = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Manual override patch {patch} does not exist (county has {count} glens)")]
    UnknownPatch { patch: PatchId, count: usize },
    #[error("Flock {flock} does not exist (simulation has {count} flocks)")]
    UnknownFlock { flock: usize, count: usize },
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let params = Parameters::default();
        assert_eq!(params.county_size, 8);
        assert_eq!(params.node_count(), 64);
        assert_eq!(params.strategy, "random");
        assert!(params.manual_override.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
simulation:
  county_size: 3
  strategy: weighted
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.simulation.county_size, 3);
        assert_eq!(config.simulation.strategy, "weighted");
        assert_eq!(config.simulation.num_flocks, 32);
        assert!(config.general.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_numeric_turns_rejected_by_parser() {
        let yaml = r#"
simulation:
  num_turns: "lots"
"#;
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let mut config = Config::default();
        config.general.log_level = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGeneral(_))));
    }
}
