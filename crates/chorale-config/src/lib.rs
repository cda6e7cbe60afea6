//! Configuration system for chorale.
//!
//! Load search configuration from TOML or YAML to control termination,
//! exploration and value selection without code changes.
//!
//! # Examples
//!
//! ```
//! use chorale_config::{ExplorationType, SolverConfig, ValueSelection};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [search]
//!     exploration_type = "branch_and_bound"
//!     value_selection = "random"
//!
//!     [search.restart]
//!     base_failure_limit = 100
//!     growth_factor = 1.5
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.search.exploration_type, ExplorationType::BranchAndBound);
//! assert_eq!(config.search.value_selection, ValueSelection::Random);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use chorale_config::SolverConfig;
//!
//! let config = SolverConfig::load("chorale.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible randomised value selection.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Search strategy configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(restart) = &self.search.restart {
            if restart.base_failure_limit == 0 {
                return Err(ConfigError::Invalid(
                    "restart base_failure_limit must be positive".to_string(),
                ));
            }
            if restart.growth_factor.is_nan() || restart.growth_factor <= 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "restart growth_factor must be greater than 1.0, got {}",
                    restart.growth_factor
                )));
            }
        }
        if let Some(TerminationConfig {
            solution_count_limit: Some(0),
            ..
        }) = &self.termination
        {
            return Err(ConfigError::Invalid(
                "solution_count_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Stops after the given number of reported solutions.
    pub fn with_solution_count_limit(mut self, count: u64) -> Self {
        self.termination = Some(TerminationConfig {
            solution_count_limit: Some(count),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Stops after the given number of explored search nodes.
    pub fn with_node_count_limit(mut self, count: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(count),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_exploration_type(mut self, exploration_type: ExplorationType) -> Self {
        self.search.exploration_type = exploration_type;
        self
    }

    pub fn with_value_selection(mut self, value_selection: ValueSelection) -> Self {
        self.search.value_selection = value_selection;
        self
    }

    pub fn with_restart(mut self, restart: RestartConfig) -> Self {
        self.search.restart = Some(restart);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the other time limits.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes to explore.
    pub node_count_limit: Option<u64>,

    /// Maximum number of solutions to report.
    pub solution_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.millis_spent_limit.unwrap_or(0)
            + self.seconds_spent_limit.unwrap_or(0) * 1_000
            + self.minutes_spent_limit.unwrap_or(0) * 60_000;
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Search strategy configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    #[serde(default)]
    pub exploration_type: ExplorationType,

    #[serde(default)]
    pub value_selection: ValueSelection,

    /// Restart policy. Restarts only make sense together with random
    /// value selection, otherwise every run retraces the same tree.
    #[serde(default)]
    pub restart: Option<RestartConfig>,
}

/// How the search tree is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationType {
    /// Each reported solution is strictly better than the previous one.
    #[default]
    BranchAndBound,

    /// Every solution is reported, in tree order.
    DepthFirst,
}

/// Which value of the branching variable is tried first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSelection {
    /// Smallest value in the domain.
    Min,

    /// Largest value in the domain.
    Max,

    /// Uniformly random value, driven by `random_seed`.
    Random,

    /// Value closest to the branching hint, or the domain median.
    #[default]
    Nearest,
}

/// Geometric restart policy: run `i` stops after
/// `base_failure_limit * growth_factor^i` failures.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RestartConfig {
    pub base_failure_limit: u64,

    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
}

fn default_growth_factor() -> f64 {
    2.0
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            base_failure_limit: 64,
            growth_factor: default_growth_factor(),
        }
    }
}

#[cfg(test)]
mod tests;
