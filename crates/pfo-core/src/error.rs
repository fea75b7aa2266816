//! Outcome taxonomy for structural PFO mutations.
//!
//! Every mutation returns [`PfoResult`]. The four failure kinds are the
//! only observable results besides success; callers branch on them and
//! nothing is retried internally. [`StatusCode`] gives the same taxonomy
//! as stable integer codes for callers that prefer a flat status value.

use std::error::Error;
use std::fmt;

/// Result alias used by every PFO mutation.
pub type PfoResult<T> = Result<T, PfoError>;

/// Why a structural mutation was refused.
///
/// No variant is ever produced after partial mutation: when an operation
/// fails the object graph is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PfoError {
    /// Input is stale, unknown, self-referential or malformed.
    ///
    /// A caller bug; never retried.
    InvalidParameter {
        /// Description of the offending input.
        reason: String,
    },
    /// The referenced constituent or hierarchy edge does not exist on
    /// the target PFO.
    NotFound {
        /// Description of what was looked up.
        what: String,
    },
    /// The operation would break the non-emptiness invariant (or leave a
    /// dangling constituent reference). The caller must take a different
    /// action, usually deleting the PFO instead.
    NotAllowed {
        /// Description of the guarded invariant.
        reason: String,
    },
    /// The constituent or hierarchy edge is already present.
    AlreadyAssociated {
        /// Description of the existing association.
        what: String,
    },
}

impl PfoError {
    /// The flat status code for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::from(self)
    }
}

impl fmt::Display for PfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::NotFound { what } => write!(f, "not found: {what}"),
            Self::NotAllowed { reason } => write!(f, "not allowed: {reason}"),
            Self::AlreadyAssociated { what } => write!(f, "already associated: {what}"),
        }
    }
}

impl Error for PfoError {}

/// Stable integer status codes for PFO operations.
///
/// `Success` = 0, all failures are negative. Values never change.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The operation was applied.
    Success = 0,
    /// See [`PfoError::InvalidParameter`].
    InvalidParameter = -1,
    /// See [`PfoError::NotFound`].
    NotFound = -2,
    /// See [`PfoError::NotAllowed`].
    NotAllowed = -3,
    /// See [`PfoError::AlreadyAssociated`].
    AlreadyAssociated = -4,
}

impl StatusCode {
    /// Collapse an operation result into its status code.
    pub fn of<T>(result: &PfoResult<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::from(e),
        }
    }

    /// Whether this code reports success.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<&PfoError> for StatusCode {
    fn from(e: &PfoError) -> Self {
        match e {
            PfoError::InvalidParameter { .. } => Self::InvalidParameter,
            PfoError::NotFound { .. } => Self::NotFound,
            PfoError::NotAllowed { .. } => Self::NotAllowed,
            PfoError::AlreadyAssociated { .. } => Self::AlreadyAssociated,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "STATUS_CODE_SUCCESS",
            Self::InvalidParameter => "STATUS_CODE_INVALID_PARAMETER",
            Self::NotFound => "STATUS_CODE_NOT_FOUND",
            Self::NotAllowed => "STATUS_CODE_NOT_ALLOWED",
            Self::AlreadyAssociated => "STATUS_CODE_ALREADY_ASSOCIATED",
        };
        f.write_str(name)
    }
}
