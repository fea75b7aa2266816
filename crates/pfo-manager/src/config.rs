//! Pipeline configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use pfo_pool::{PoolConfig, PoolError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`PipelineConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Pool configuration is invalid.
    Pool(PoolError),
    /// The input algorithm name is empty.
    EmptyInputAlgorithmName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(e) => write!(f, "pool: {e}"),
            Self::EmptyInputAlgorithmName => write!(f, "input_algorithm_name must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(e) => Some(e),
            Self::EmptyInputAlgorithmName => None,
        }
    }
}

impl From<PoolError> for ConfigError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

// ── PipelineConfig ─────────────────────────────────────────────────

/// Builder input for [`PfoPipeline`](crate::PfoPipeline).
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Object pool sizing and nesting limits.
    pub pool: PoolConfig,
    /// Name recorded for the construction phase's algorithm id.
    /// Default: `"Input"`.
    pub input_algorithm_name: String,
}

impl PipelineConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pool.validate()?;
        if self.input_algorithm_name.trim().is_empty() {
            return Err(ConfigError::EmptyInputAlgorithmName);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            input_algorithm_name: "Input".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn blank_input_name_rejected() {
        let config = PipelineConfig {
            input_algorithm_name: "  ".into(),
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyInputAlgorithmName));
    }

    #[test]
    fn pool_error_is_wrapped_with_source() {
        let mut config = PipelineConfig::default();
        config.pool.max_algorithm_depth = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Pool(PoolError::InvalidConfig { .. })));
        assert!(err.source().is_some());
    }
}
