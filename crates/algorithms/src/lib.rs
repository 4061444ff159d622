//! Primitive layer of the dsig signature engine
//!
//! This crate provides the building blocks the signature schemes are made
//! of, all implemented from primitive arithmetic:
//!
//! - SHA-256, HMAC and MGF1 (the hashing adapter)
//! - big-integer helpers: modular exponentiation, modular inverse and
//!   unbiased random sampling
//! - Miller-Rabin primality testing and prime sampling
//! - RFC 6979 deterministic nonce generation
//! - a bounded concurrent cache for memoization and nonce bookkeeping
//! - secp256k1 field and point arithmetic in affine and Jacobian form

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashFunction, Sha256};

// MAC implementations
pub mod mac;
pub use mac::Hmac;

// Mask generation
pub mod mgf;
pub use mgf::mgf1;

// Big-integer helpers
pub mod bigint;

// Primality
pub mod prime;
pub use prime::CancelToken;

// Deterministic nonces
pub mod nonce;
pub use nonce::Rfc6979;

// Bounded caches
pub mod cache;
pub use cache::BoundedCache;

// Elliptic curves
pub mod ec;
