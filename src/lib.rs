//! # dsig
//!
//! RSA-PSS, DSA and ECDSA over secp256k1, built from big-integer arithmetic,
//! Miller-Rabin primality, RFC 6979 nonces and Jacobian point arithmetic.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dsig = "0.3"
//! ```
//!
//! ```no_run
//! use dsig::prelude::*;
//!
//! let scheme = SignatureScheme::new(Algorithm::Ecdsa);
//! let keys = scheme.generate_keys()?;
//! let signature = scheme.sign(b"Hello, ECDSA digital signature!", &keys)?;
//! assert!(scheme.verify(b"Hello, ECDSA digital signature!", &signature, &keys));
//! # Ok::<(), dsig::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `sign` (default): the three schemes and the engine facade
//! - `algorithms`: the arithmetic layer on its own (hashing, primes, nonces, secp256k1)
//! - `serde`: serialization of keys, signatures and configuration
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dsig-api`]: error type, `Algorithm` and the `Signature` trait
//! - [`dsig-internal`]: constant-time comparison
//! - [`dsig-params`]: standard sizes and limits
//! - [`dsig-algorithms`]: SHA-256, HMAC, MGF1, primes, RFC 6979, secp256k1
//! - [`dsig-sign`]: RSA-PSS, DSA, ECDSA and the engine

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use dsig_api as api;
pub use dsig_internal as internal;
pub use dsig_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use dsig_algorithms as algorithms;

#[cfg(feature = "sign")]
pub use dsig_sign as sign;

#[cfg(feature = "sign")]
pub use rand;

pub use zeroize;

/// Common imports for dsig users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Algorithm, Error, Result};

    // Re-export core traits
    pub use crate::api::Signature;

    #[cfg(feature = "algorithms")]
    pub use crate::algorithms::CancelToken;

    #[cfg(feature = "sign")]
    pub use crate::sign::{
        AlgorithmRegistry, Dsa, DsaConfig, Ecdsa, EcdsaConfig, EngineConfig, KeyPair, RsaConfig,
        RsaPss, SignatureResult, SignatureScheme,
    };
}
