//! Deterministic nonce generation (RFC 6979, section 3.2)
//!
//! The HMAC-DRBG is seeded with `int2octets(x) || bits2octets(h1)` and run
//! without additional entropy, so the same key and digest always yield the
//! same sequence of candidates.

use core::marker::PhantomData;

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use tracing::debug;
use zeroize::Zeroizing;

use dsig_params::utils::limits::NONCE_REGISTRY_CAPACITY;

use crate::bigint::{bits2int, byte_len, to_fixed_be};
use crate::cache::BoundedCache;
use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sha256};
use crate::mac::Hmac;

/// Out-of-range candidates tolerated before the generator gives up.
const MAX_CANDIDATE_ROUNDS: usize = 256;

/// RFC 6979 nonce generator for a fixed group order `q`.
#[derive(Clone)]
pub struct Rfc6979<H: HashFunction = Sha256> {
    q: BigUint,
    qlen: usize,
    rlen: usize,
    _hash: PhantomData<H>,
}

impl<H: HashFunction> Rfc6979<H> {
    /// Generator for nonces in `[1, q - 1]`.
    pub fn new(q: &BigUint) -> Result<Self> {
        if q <= &BigUint::one() {
            return Err(Error::param("q", "group order must exceed one"));
        }
        let qlen = q.bits();
        Ok(Self {
            q: q.clone(),
            qlen,
            rlen: byte_len(qlen),
            _hash: PhantomData,
        })
    }

    /// The group order.
    pub fn order(&self) -> &BigUint {
        &self.q
    }

    /// Leftmost `qlen` bits of `bytes` as an integer.
    pub fn bits2int(&self, bytes: &[u8]) -> BigUint {
        bits2int(bytes, self.qlen)
    }

    /// `x` as exactly `rlen` big-endian bytes.
    pub fn int2octets(&self, x: &BigUint) -> Result<Vec<u8>> {
        to_fixed_be(x, self.rlen)
    }

    /// `bits2int(bytes) mod q` as `rlen` bytes.
    pub fn bits2octets(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let z = self.bits2int(bytes) % &self.q;
        self.int2octets(&z)
    }

    /// First nonce for private key `x` and message digest `h1`.
    pub fn generate_k(&self, x: &BigUint, h1: &[u8]) -> Result<BigUint> {
        self.stream(x, h1)?.next_k()
    }

    /// Candidate stream for `(x, h1)`. Signers pull further candidates when
    /// one yields `r = 0` or `s = 0`.
    pub fn stream(&self, x: &BigUint, h1: &[u8]) -> Result<NonceStream<'_, H>> {
        if x.is_zero() || x >= &self.q {
            return Err(Error::param("x", "private key outside [1, q-1]"));
        }

        let hlen = H::output_size();
        let seed = Zeroizing::new([self.int2octets(x)?, self.bits2octets(h1)?].concat());

        let mut v = Zeroizing::new(vec![0x01u8; hlen]);
        let mut k = Zeroizing::new(vec![0x00u8; hlen]);

        for separator in [0x00u8, 0x01] {
            let parts: [&[u8]; 3] = [v.as_slice(), &[separator], seed.as_slice()];
            let next_k = Hmac::<H>::mac_parts(&k, &parts)?;
            k.copy_from_slice(next_k.as_ref());
            let next_v = Hmac::<H>::mac(&k, &v)?;
            v.copy_from_slice(next_v.as_ref());
        }

        Ok(NonceStream {
            params: self,
            k,
            v,
            started: false,
        })
    }
}

impl<H: HashFunction> core::fmt::Debug for Rfc6979<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rfc6979")
            .field("hash", &H::name())
            .field("qlen", &self.qlen)
            .finish()
    }
}

/// Sequence of nonce candidates from one seeded HMAC-DRBG.
pub struct NonceStream<'a, H: HashFunction> {
    params: &'a Rfc6979<H>,
    k: Zeroizing<Vec<u8>>,
    v: Zeroizing<Vec<u8>>,
    started: bool,
}

impl<H: HashFunction> NonceStream<'_, H> {
    /// Next nonce in `[1, q - 1]`.
    pub fn next_k(&mut self) -> Result<BigUint> {
        if self.started {
            self.reseed()?;
        }
        self.started = true;

        for _ in 0..MAX_CANDIDATE_ROUNDS {
            let mut t = Zeroizing::new(Vec::with_capacity(self.params.rlen));
            while t.len() < self.params.rlen {
                let next = Hmac::<H>::mac(&self.k, &self.v)?;
                self.v.copy_from_slice(next.as_ref());
                t.extend_from_slice(&self.v);
            }

            let candidate = self.params.bits2int(&t);
            if !candidate.is_zero() && candidate < self.params.q {
                return Ok(candidate);
            }
            debug!("nonce candidate outside [1, q-1], drawing again");
            self.reseed()?;
        }

        Err(Error::Exhausted {
            operation: "nonce generation",
            attempts: MAX_CANDIDATE_ROUNDS,
        })
    }

    fn reseed(&mut self) -> Result<()> {
        let parts: [&[u8]; 2] = [self.v.as_slice(), &[0x00]];
        let k = Hmac::<H>::mac_parts(&self.k, &parts)?;
        self.k.copy_from_slice(k.as_ref());
        let v = Hmac::<H>::mac(&self.k, &self.v)?;
        self.v.copy_from_slice(v.as_ref());
        Ok(())
    }
}

/// Process-local record of issued nonces.
///
/// Maps a fingerprint of each nonce to a fingerprint of the `(key, digest)`
/// input that produced it. Re-deriving the same nonce for the same input is
/// expected; seeing it for a different input means reuse and is refused.
#[derive(Debug)]
pub struct NonceRegistry {
    seen: BoundedCache<[u8; 32], [u8; 32]>,
}

impl Default for NonceRegistry {
    fn default() -> Self {
        Self::new(NONCE_REGISTRY_CAPACITY)
    }
}

impl NonceRegistry {
    /// Registry remembering at most `capacity` nonces.
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: BoundedCache::new(capacity),
        }
    }

    /// Record `k` as issued for `(x, h1)`. Returns `false` when `k` was
    /// already issued for another input.
    pub fn claim(&self, k: &BigUint, x: &BigUint, h1: &[u8]) -> Result<bool> {
        let nonce_fp = Sha256::digest(&k.to_bytes_be())?;
        let mut input = Sha256::new();
        input.update(&x.to_bytes_be())?;
        input.update(&[0u8])?;
        input.update(h1)?;
        let input_fp = input.finalize()?;

        let stored = self.seen.get_or_insert(nonce_fp, input_fp);
        Ok(stored == input_fp)
    }

    /// Number of remembered nonces.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no nonce has been recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests;
