//! Big-integer helpers on top of `num-bigint-dig`
//!
//! Everything here works on non-negative `BigUint` values. Signed
//! intermediates only appear inside the extended Euclidean algorithm.

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Upper bound on rejection-sampling rounds. Each round succeeds with
/// probability above one half, so hitting this means the RNG is broken.
const MAX_SAMPLING_ROUNDS: usize = 256;

/// `base^exp mod modulus`.
///
/// A modulus of one yields zero. The base is reduced before exponentiation.
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::param("modulus", "must be non-zero"));
    }
    if modulus.is_one() {
        return Ok(BigUint::zero());
    }
    let reduced = base % modulus;
    Ok(reduced.modpow(exp, modulus))
}

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm.
///
/// Returns [`Error::InverseNotFound`] when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m <= &BigUint::one() {
        return Err(Error::param("modulus", "must be greater than one"));
    }

    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r0 = modulus.clone();
    let mut r1 = BigInt::from_biguint(Sign::Plus, a % m);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        r0 = core::mem::replace(&mut r1, r2);
        let t2 = &t0 - &q * &t1;
        t0 = core::mem::replace(&mut t1, t2);
    }

    if !r0.is_one() {
        return Err(Error::InverseNotFound);
    }

    let inv = t0.mod_floor(&modulus);
    inv.to_biguint().ok_or(Error::Processing {
        operation: "mod_inverse",
        details: "negative residue after reduction",
    })
}

/// Uniform sample from `[0, upper)`.
///
/// Draws `bitlen(upper)` random bits and rejects anything `>= upper`, so no
/// modulo bias is introduced.
pub fn random_below<R>(upper: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if upper.is_zero() {
        return Err(Error::param("upper", "range must be non-empty"));
    }
    if upper.is_one() {
        return Ok(BigUint::zero());
    }

    let bits = upper.bits();
    for _ in 0..MAX_SAMPLING_ROUNDS {
        let candidate = random_bits(bits, rng);
        if &candidate < upper {
            return Ok(candidate);
        }
    }
    Err(Error::Exhausted {
        operation: "random_below",
        attempts: MAX_SAMPLING_ROUNDS,
    })
}

/// Uniform sample from the inclusive range `[min, max]`.
pub fn random_in_range<R>(min: &BigUint, max: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if min > max {
        return Err(Error::param("range", "min exceeds max"));
    }
    let span = max - min + BigUint::one();
    Ok(min + random_below(&span, rng)?)
}

/// Random integer of at most `bits` bits (the top bits are not forced).
pub fn random_bits<R>(bits: usize, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bits == 0 {
        return BigUint::zero();
    }
    let len = bits.div_ceil(8);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    let excess = len * 8 - bits;
    buf[0] &= 0xffu8 >> excess;
    BigUint::from_bytes_be(&buf)
}

/// Big-endian encoding of `x` left-padded with zeros to exactly `len` bytes.
pub fn to_fixed_be(x: &BigUint, len: usize) -> Result<Vec<u8>> {
    let bytes = if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    };
    if bytes.len() > len {
        return Err(Error::Length {
            context: "fixed-width integer",
            expected: len,
            actual: bytes.len(),
        });
    }
    let mut out = vec![0u8; len];
    out[len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Minimal big-endian encoding; zero encodes as a single zero byte.
pub fn to_minimal_be(x: &BigUint) -> Vec<u8> {
    x.to_bytes_be()
}

/// Interpret `bytes` as a big-endian integer keeping only its leftmost
/// `qbits` bits (RFC 6979 section 2.3.2, FIPS 186-4 digest truncation).
pub fn bits2int(bytes: &[u8], qbits: usize) -> BigUint {
    let value = BigUint::from_bytes_be(bytes);
    let blen = bytes.len() * 8;
    if blen > qbits {
        value >> (blen - qbits)
    } else {
        value
    }
}

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}
