//! Hash function implementations
//!
//! The schemes only ever see the `HashFunction` trait; the engine is
//! hash-agnostic beyond the digest size it reports.

pub mod sha2;

pub use sha2::Sha256;

use crate::error::Result;

/// Trait for cryptographic hash functions
pub trait HashFunction: Clone + Sized {
    /// Fixed-size digest produced by `finalize`
    type Output: AsRef<[u8]> + Clone;

    /// Creates a new instance of the hash function
    fn new() -> Self;

    /// Updates the hash function state with new data
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Finalizes the hash computation and returns the digest
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Returns the output size of the hash function in bytes
    fn output_size() -> usize;

    /// Returns the block size of the hash function in bytes
    fn block_size() -> usize;

    /// Returns the name of the hash function
    fn name() -> &'static str;

    /// Convenience method to hash data in a single call
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
