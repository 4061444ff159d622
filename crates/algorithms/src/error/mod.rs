//! Error handling for the primitive layer

use std::borrow::Cow;
use std::fmt;

use dsig_api::Error as CoreError;

/// The error type for primitive operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// `gcd(a, m) != 1`, so `a` has no inverse modulo `m`
    InverseNotFound,

    /// A search loop ran out of candidates
    Exhausted {
        /// Operation that gave up
        operation: &'static str,
        /// Number of attempts made
        attempts: usize,
    },

    /// A cancel token was triggered
    Cancelled {
        /// Operation that observed the cancellation
        operation: &'static str,
    },

    /// Processing error during a primitive operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::InverseNotFound => write!(f, "Modular inverse does not exist"),
            Error::Exhausted {
                operation,
                attempts,
            } => {
                write!(f, "{} gave up after {} attempts", operation, attempts)
            }
            Error::Cancelled { operation } => write!(f, "{} was cancelled", operation),
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

// Implement conversion to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: "primitives",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidParameter {
                context,
                message: format!("invalid length (expected {}, got {})", expected, actual),
            },
            Error::InverseNotFound => CoreError::InverseNotFound,
            Error::Exhausted {
                operation,
                attempts,
            } => CoreError::KeyGenerationFailed {
                algorithm: operation,
                details: format!("gave up after {} attempts", attempts),
            },
            Error::Cancelled { operation } => CoreError::Cancelled { context: operation },
            Error::Processing { operation, details } => CoreError::InvalidParameter {
                context: operation,
                message: details.to_string(),
            },
        }
    }
}

// Include the validation submodule
pub mod validate;
