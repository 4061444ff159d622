//! HMAC (RFC 2104 / FIPS 198-1)
//!
//! Key-dependent work happens on stack-fixed buffers sized for the largest
//! supported block. The RFC 6979 DRBG is the main consumer.

use crate::error::{Error, Result};
use crate::hash::HashFunction;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

const MAX_BLOCK: usize = 128;

/// HMAC keyed with a fixed key over hash function `H`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hmac<H: HashFunction> {
    #[zeroize(skip)]
    hash: H,
    opad: [u8; MAX_BLOCK],
    block_size: usize,
    is_finalized: bool,
}

impl<H: HashFunction> Hmac<H> {
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5c;

    /// Create a new HMAC instance from `key`.
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        if bs > MAX_BLOCK {
            return Err(Error::param("hmac_block", "hash block size not supported"));
        }

        // Long keys are replaced by their digest
        let mut k_prime = [0u8; MAX_BLOCK];
        if key.len() > bs {
            let hashed = H::digest(key)?;
            let hashed = hashed.as_ref();
            k_prime[..hashed.len()].copy_from_slice(hashed);
        } else {
            k_prime[..key.len()].copy_from_slice(key);
        }

        let mut ipad = [0u8; MAX_BLOCK];
        let mut opad = [0u8; MAX_BLOCK];
        for i in 0..bs {
            ipad[i] = k_prime[i] ^ Self::IPAD_BYTE;
            opad[i] = k_prime[i] ^ Self::OPAD_BYTE;
        }
        k_prime.zeroize();

        let mut hash = H::new();
        hash.update(&ipad[..bs])?;
        ipad.zeroize();

        Ok(Self {
            hash,
            opad,
            block_size: bs,
            is_finalized: false,
        })
    }

    /// Feed additional `data` into the MAC.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.is_finalized {
            return Err(Error::param(
                "hmac_state",
                "Cannot update after finalization",
            ));
        }
        self.hash.update(data).map(|_| ())
    }

    /// Finalise and return the tag.
    pub fn finalize(&mut self) -> Result<H::Output> {
        if self.is_finalized {
            return Err(Error::param("hmac_state", "HMAC already finalized"));
        }
        self.is_finalized = true;

        let inner_hash = self.hash.finalize()?;

        let mut outer = H::new();
        outer.update(&self.opad[..self.block_size])?;
        outer.update(inner_hash.as_ref())?;
        outer.finalize()
    }

    /// One-shot MAC helper.
    pub fn mac(key: &[u8], data: &[u8]) -> Result<H::Output> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// MAC over several data segments without concatenating them first.
    pub fn mac_parts(key: &[u8], parts: &[&[u8]]) -> Result<H::Output> {
        let mut h = Self::new(key)?;
        for part in parts {
            h.update(part)?;
        }
        h.finalize()
    }

    /// Constant-time verification of `tag` against `key` / `data`.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;
        Ok(bool::from(expected.as_ref().ct_eq(tag)))
    }
}
