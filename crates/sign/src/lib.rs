//! Digital signature schemes for dsig
//!
//! This crate implements RSA-PSS, DSA and ECDSA over secp256k1 on top of
//! `dsig-algorithms`, plus the engine facade that selects a scheme by name.
//!
//! ```no_run
//! use dsig_sign::engine::SignatureScheme;
//!
//! let scheme = SignatureScheme::from_name("ecdsa")?;
//! let keys = scheme.generate_keys()?;
//! let signature = scheme.sign("Hello, ECDSA digital signature!", &keys)?;
//! assert!(scheme.verify("Hello, ECDSA digital signature!", &signature, &keys));
//! # Ok::<(), dsig_api::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod encoding;
pub mod engine;
pub mod traditional;

pub use config::{DsaConfig, EcdsaConfig, EngineConfig, RsaConfig};
pub use engine::{AlgorithmRegistry, KeyPair, SignatureResult, SignatureScheme};

// Re-exports from traditional schemes
pub use traditional::dsa::Dsa;
pub use traditional::ecdsa::Ecdsa;
pub use traditional::rsa::RsaPss;
