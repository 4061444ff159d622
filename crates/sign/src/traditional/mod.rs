//! Traditional signature schemes
//!
//! RSA-PSS, DSA and ECDSA over secp256k1. The schemes share the primitive
//! layer but never depend on each other.

pub mod dsa;
pub mod ecdsa;
pub mod rsa;

// Re-export DSA types
pub use dsa::{Dsa, DsaDomainParameters, DsaKeyPair, DsaPublicKey, DsaSecretKey, DsaSignature};

// Re-export ECDSA types
pub use ecdsa::{Ecdsa, EcdsaKeyPair, EcdsaPublicKey, EcdsaSecretKey, EcdsaSignature};

// Re-export RSA types
pub use rsa::{RsaKeyPair, RsaPss, RsaPublicKey, RsaSecretKey, RsaSignature};
