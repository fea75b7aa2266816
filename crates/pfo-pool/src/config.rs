//! Pool configuration parameters.

use crate::error::PoolError;

/// Configuration for [`AlgorithmObjectPool`](crate::AlgorithmObjectPool).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of object slots reserved up front. Default: 64.
    pub initial_capacity: usize,

    /// Maximum nesting of running algorithms (parent algorithms invoking
    /// daughter algorithms). Default: 32. Must be at least 1.
    pub max_algorithm_depth: usize,
}

impl PoolConfig {
    /// Default slot reservation.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

    /// Default algorithm nesting limit.
    pub const DEFAULT_MAX_ALGORITHM_DEPTH: usize = 32;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.max_algorithm_depth == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "max_algorithm_depth must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_algorithm_depth: Self::DEFAULT_MAX_ALGORITHM_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PoolConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_depth_rejected() {
        let config = PoolConfig {
            max_algorithm_depth: 0,
            ..PoolConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }
}
