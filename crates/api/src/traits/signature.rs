//! Digital signature traits for dsig
//!
//! This module defines the capability every signature scheme implements.
//! Schemes are values rather than bare types: an instance owns its
//! configuration, any lazily generated domain parameters and its bounded
//! caches, so two instances never share mutable state.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque types that are zeroized on drop and cannot be
/// mutated in place through this interface.
pub trait Signature: Send + Sync {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (the public half plus the secret half)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name(&self) -> &'static str;

    /// Generate a new key pair using the provided RNG
    ///
    /// Implementations must use the provided cryptographically secure RNG
    /// for all random number generation.
    fn keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key
    fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Only the message, the signature components and the public key take
    /// part in the decision; informational fields carried by the signature
    /// (digests, salts) are never trusted. Returns `Err` describing the
    /// rejection when the signature does not verify.
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
