//! secp256k1 field arithmetic modulo p = 2^256 - 2^32 - 977

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::bigint::{mod_exp, to_fixed_be};
use crate::ec::k256::constants::K256_FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};
use dsig_params::traditional::ecdsa::SECP256K1_P;

pub(crate) static FIELD_P: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&SECP256K1_P));

// (p - 2) for Fermat inversion, (p + 1) / 4 for square roots (p = 3 mod 4)
static P_MINUS_TWO: Lazy<BigUint> = Lazy::new(|| &*FIELD_P - BigUint::from(2u32));
static SQRT_EXP: Lazy<BigUint> = Lazy::new(|| (&*FIELD_P + BigUint::one()) >> 2usize);

/// Element of the secp256k1 base field, always fully reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) BigUint);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    /// Small constant.
    pub fn from_u32(v: u32) -> Self {
        FieldElement(BigUint::from(v) % &*FIELD_P)
    }

    /// Parse 32 big-endian bytes, rejecting values `>= p`.
    pub fn from_bytes(bytes: &[u8; K256_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let v = BigUint::from_bytes_be(bytes);
        if v >= *FIELD_P {
            return Err(Error::param("K256 FieldElement", "value not below p"));
        }
        Ok(FieldElement(v))
    }

    /// Reduce an arbitrary integer into the field.
    pub fn from_biguint(v: &BigUint) -> Self {
        FieldElement(v % &*FIELD_P)
    }

    /// 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; K256_FIELD_ELEMENT_SIZE];
        // reduced values always fit
        if let Ok(bytes) = to_fixed_be(&self.0, K256_FIELD_ELEMENT_SIZE) {
            out.copy_from_slice(&bytes);
        }
        out
    }

    /// The integer representative in `[0, p)`.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Whether this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the representative is odd.
    pub fn is_odd(&self) -> bool {
        self.0.is_odd()
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Self) -> Self {
        let sum = &self.0 + &rhs.0;
        if sum >= *FIELD_P {
            FieldElement(sum - &*FIELD_P)
        } else {
            FieldElement(sum)
        }
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            FieldElement(&self.0 - &rhs.0)
        } else {
            FieldElement(&*FIELD_P - &rhs.0 + &self.0)
        }
    }

    /// `self * rhs`
    pub fn mul(&self, rhs: &Self) -> Self {
        FieldElement((&self.0 * &rhs.0) % &*FIELD_P)
    }

    /// `self^2`
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// `2 * self`
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// `-self`
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else {
            FieldElement(&*FIELD_P - &self.0)
        }
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        mod_exp(&self.0, &P_MINUS_TWO, &FIELD_P).ok().map(FieldElement)
    }

    /// Square root, `None` if `self` is not a quadratic residue.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = FieldElement(mod_exp(&self.0, &SQRT_EXP, &FIELD_P).ok()?);
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }
}
