//! Error type definitions for signature operations

use thiserror::Error as ThisError;

/// Primary error type for the signature engine
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Prime search or inverse computation exhausted its retry budget
    #[error("{algorithm} key generation failed: {details}")]
    KeyGenerationFailed {
        algorithm: &'static str,
        details: String,
    },

    /// Signing gave up after exhausting its internal redraw budget
    #[error("{algorithm} signing failed: {details}")]
    SigningFailed {
        algorithm: &'static str,
        details: String,
    },

    /// Signature bytes could not be parsed (bad DER, missing components)
    #[error("Invalid signature format: {context}: {message}")]
    InvalidSignatureFormat {
        context: &'static str,
        message: String,
    },

    /// Signature was well-formed but did not verify
    #[error("Invalid signature: {context}: {message}")]
    InvalidSignature {
        context: &'static str,
        message: String,
    },

    /// Key material is out of range or malformed
    #[error("Invalid key: {context}: {message}")]
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// `gcd(a, m) != 1`
    #[error("Modular inverse does not exist")]
    InverseNotFound,

    /// Invalid parameter or violated arithmetic precondition
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Algorithm name not recognised by the registry
    #[error("Unknown signature algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Long-running operation was interrupted through its cancel token
    #[error("Operation cancelled: {context}")]
    Cancelled { context: &'static str },
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidSignatureFormat { message, .. } => {
                Self::InvalidSignatureFormat { context, message }
            }
            Self::InvalidSignature { message, .. } => Self::InvalidSignature { context, message },
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::Cancelled { .. } => Self::Cancelled { context },
            other => other,
        }
    }

    /// Shorthand for a failed verification
    pub fn invalid_signature(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSignature {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an unparseable signature
    pub fn invalid_format(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSignatureFormat {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for out-of-range key material
    pub fn invalid_key(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            context,
            message: message.into(),
        }
    }

    /// True when the error is a retryable operational failure rather than
    /// a cryptographic rejection.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::KeyGenerationFailed { .. } | Self::SigningFailed { .. } | Self::Cancelled { .. }
        )
    }
}
