//! Service configuration.
//!
//! Validation uses Stillwater's `Validation` to report every problem in one
//! pass instead of stopping at the first.

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Confidence threshold used when none is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("confidence threshold {0} is not a finite percentage in 0..=100")]
    ConfidenceThresholdOutOfRange(f32),

    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration is invalid: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of [`SecurityConfig::validate`].
pub type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Tunables for [`SecurityService`](crate::service::SecurityService).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum detector confidence, as a percentage, for a cat to count.
    pub confidence_threshold: f32,

    /// Number of alarm transitions retained in history.
    pub history_limit: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SecurityConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Check every field, accumulating all violations.
    pub fn validate(&self) -> ConfigCheck {
        let threshold = self.confidence_threshold;
        let threshold_check: ConfigCheck = if (0.0..=100.0).contains(&threshold) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::ConfidenceThresholdOutOfRange(threshold))
        };

        let history_check: ConfigCheck = if self.history_limit > 0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::ZeroHistoryLimit)
        };

        Validation::all_vec(vec![threshold_check, history_check]).map(|_| ())
    }

    /// Consume the config, returning it if valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(violations) => {
                Err(ConfigError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }
}
