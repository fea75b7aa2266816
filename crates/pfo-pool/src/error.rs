//! Pool-specific error types.

use std::error::Error;
use std::fmt;

use pfo_core::{AlgorithmId, PfoError};

/// Errors that can occur during pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// A key that does not refer to a live object.
    StaleHandle {
        /// Slot index encoded in the key.
        slot: u32,
        /// Generation encoded in the key.
        generation: u32,
    },
    /// Registration was requested while no algorithm is running.
    NoCurrentAlgorithm,
    /// Starting another algorithm would exceed the configured nesting depth.
    AlgorithmDepthExceeded {
        /// The configured maximum depth.
        max_depth: usize,
    },
    /// The algorithm is already on the stack.
    AlgorithmAlreadyRunning {
        /// The algorithm that was started twice.
        algorithm: AlgorithmId,
    },
    /// `end_algorithm` did not name the innermost running algorithm.
    AlgorithmMismatch {
        /// The algorithm the caller tried to end.
        requested: AlgorithmId,
        /// The algorithm actually on top of the stack, if any.
        current: Option<AlgorithmId>,
    },
    /// Every algorithm id has been handed out.
    AlgorithmIdsExhausted,
    /// A configuration value is out of range.
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle { slot, generation } => {
                write!(f, "stale handle: slot {slot}, generation {generation}")
            }
            Self::NoCurrentAlgorithm => write!(f, "no algorithm is currently running"),
            Self::AlgorithmDepthExceeded { max_depth } => {
                write!(f, "algorithm nesting exceeds maximum depth {max_depth}")
            }
            Self::AlgorithmAlreadyRunning { algorithm } => {
                write!(f, "{algorithm} is already running")
            }
            Self::AlgorithmMismatch { requested, current } => match current {
                Some(current) => {
                    write!(f, "cannot end {requested}: innermost algorithm is {current}")
                }
                None => write!(f, "cannot end {requested}: no algorithm is running"),
            },
            Self::AlgorithmIdsExhausted => write!(f, "algorithm id space exhausted"),
            Self::InvalidConfig { reason } => write!(f, "invalid pool config: {reason}"),
        }
    }
}

impl Error for PoolError {}

impl From<PoolError> for PfoError {
    fn from(e: PoolError) -> Self {
        PfoError::InvalidParameter {
            reason: e.to_string(),
        }
    }
}
