//! Public API traits and types for the dsig signature engine
//!
//! This crate provides the public API surface shared by every dsig crate:
//! the error taxonomy, the `Signature` capability trait implemented by each
//! scheme, and the algorithm name registry consumed by callers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use types::Algorithm;

pub use traits::Signature;
pub use traits::signature;
