//! secp256k1 scalar arithmetic modulo the group order n

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bigint::{mod_inverse, to_fixed_be};
use crate::ec::k256::constants::K256_SCALAR_SIZE;
use crate::error::{Error, Result};
use dsig_params::traditional::ecdsa::SECP256K1_N;

pub(crate) static ORDER_N: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&SECP256K1_N));
static HALF_ORDER: Lazy<BigUint> = Lazy::new(|| &*ORDER_N >> 1usize);

/// Integer modulo the secp256k1 group order, always fully reduced.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(BigUint);

impl core::fmt::Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Scalar(..)")
    }
}

impl Scalar {
    /// Parse 32 big-endian bytes as a non-zero scalar below n.
    ///
    /// Values outside `[1, n - 1]` are rejected rather than reduced.
    pub fn new(data: [u8; K256_SCALAR_SIZE]) -> Result<Self> {
        Self::from_biguint(&BigUint::from_bytes_be(&data))
    }

    /// Checked conversion: `v` must lie in `[1, n - 1]`.
    pub fn from_biguint(v: &BigUint) -> Result<Self> {
        if v.is_zero() {
            return Err(Error::param("K256 Scalar", "Scalar cannot be zero"));
        }
        if v >= &*ORDER_N {
            return Err(Error::param("K256 Scalar", "Scalar not below the group order"));
        }
        Ok(Scalar(v.clone()))
    }

    /// `v mod n`; the result may be zero.
    pub fn reduce(v: &BigUint) -> Self {
        Scalar(v % &*ORDER_N)
    }

    /// The group order n.
    pub fn order() -> &'static BigUint {
        &ORDER_N
    }

    /// Zero scalar.
    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    /// Unit scalar.
    pub fn one() -> Self {
        Scalar(BigUint::one())
    }

    /// Integer representative in `[0, n)`.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Serialize this scalar to 32 big-endian bytes.
    pub fn serialize(&self) -> [u8; K256_SCALAR_SIZE] {
        let mut out = [0u8; K256_SCALAR_SIZE];
        if let Ok(bytes) = to_fixed_be(&self.0, K256_SCALAR_SIZE) {
            out.copy_from_slice(&bytes);
        }
        out
    }

    /// Check if this scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value exceeds n / 2 (a "high-S" signature component).
    pub fn is_high(&self) -> bool {
        self.0 > *HALF_ORDER
    }

    /// `self + rhs mod n`
    pub fn add(&self, rhs: &Self) -> Self {
        Scalar((&self.0 + &rhs.0) % &*ORDER_N)
    }

    /// `self * rhs mod n`
    pub fn mul(&self, rhs: &Self) -> Self {
        Scalar((&self.0 * &rhs.0) % &*ORDER_N)
    }

    /// `-self mod n`
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else {
            Scalar(&*ORDER_N - &self.0)
        }
    }

    /// `self^-1 mod n`; fails for zero.
    pub fn invert(&self) -> Result<Self> {
        mod_inverse(&self.0, &ORDER_N).map(Scalar)
    }

    /// Bits of the representative, most significant first, padded to 256.
    pub(crate) fn bits_msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        let bytes = self.serialize();
        (0..K256_SCALAR_SIZE * 8).map(move |i| (bytes[i / 8] >> (7 - (i % 8))) & 1 == 1)
    }

    /// Little-endian `width`-bit digits of the representative.
    pub(crate) fn windows_le(&self, width: usize) -> Vec<usize> {
        let bytes = self.serialize();
        let total = K256_SCALAR_SIZE * 8;
        let bit = |i: usize| ((bytes[K256_SCALAR_SIZE - 1 - i / 8] >> (i % 8)) & 1) as usize;
        (0..total.div_ceil(width))
            .map(|w| {
                (0..width)
                    .map(|j| w * width + j)
                    .filter(|&i| i < total)
                    .fold(0usize, |acc, i| acc | (bit(i) << (i - w * width)))
            })
            .collect()
    }
}
