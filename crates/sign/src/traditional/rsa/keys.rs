//! RSA key and signature types

use core::fmt;

use dsig_algorithms::bigint::{mod_exp, mod_inverse};
use dsig_api::{Error, Result};
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoding::to_hex;

/// RSA public key `(n, e)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPublicKey {
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    n: BigUint,
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    e: BigUint,
}

impl RsaPublicKey {
    /// Public key from its modulus and exponent.
    ///
    /// The values are range-checked when the key is used for verification.
    pub fn new(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    /// The modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The public exponent `e`.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> usize {
        self.n.bits()
    }

    /// `n` as hex.
    pub fn n_hex(&self) -> String {
        to_hex(&self.n)
    }

    /// `e` as hex.
    pub fn e_hex(&self) -> String {
        to_hex(&self.e)
    }

    /// Reject keys no valid signature could be checked against: `e` must be
    /// odd and greater than one, `n` must be odd and larger than `e`.
    pub fn validate(&self) -> Result<()> {
        if self.e <= BigUint::one() || self.e.is_even() {
            return Err(Error::invalid_key(
                "RSA public key",
                "exponent must be odd and greater than one",
            ));
        }
        if self.n.is_zero() || self.n.is_even() || self.n <= self.e {
            return Err(Error::invalid_key(
                "RSA public key",
                "modulus must be odd and exceed the exponent",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSA-{} {{ e: {}, n: {} }}", self.modulus_bits(), self.e, self.n_hex())
    }
}

/// RSA private key
///
/// Keeps the prime factors and CRT exponents next to `d` so signing can
/// work modulo `p` and `q` separately. Every component is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RsaSecretKey {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl RsaSecretKey {
    /// Assemble a private key from its primes and public exponent.
    ///
    /// Fails with `InverseNotFound` when `e` is not invertible modulo
    /// `(p - 1)(q - 1)`.
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self> {
        if p <= BigUint::one() || q <= BigUint::one() || p == q {
            return Err(Error::invalid_key(
                "RSA private key",
                "primes must be distinct and greater than one",
            ));
        }
        let one = BigUint::one();
        let p1 = &p - &one;
        let q1 = &q - &one;
        let phi = &p1 * &q1;
        let d = mod_inverse(&e, &phi)?;
        let qinv = mod_inverse(&q, &p)?;

        Ok(Self {
            n: &p * &q,
            dp: &d % &p1,
            dq: &d % &q1,
            e,
            d,
            p,
            q,
            qinv,
        })
    }

    /// The modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The private exponent `d`.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// The prime factors `(p, q)`.
    pub fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.p, &self.q)
    }

    /// Euler's totient `(p - 1)(q - 1)`.
    pub fn phi(&self) -> BigUint {
        let one = BigUint::one();
        (&self.p - &one) * (&self.q - &one)
    }

    /// `d` as hex.
    pub fn d_hex(&self) -> String {
        to_hex(&self.d)
    }

    /// The matching public key.
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::new(self.n.clone(), self.e.clone())
    }

    /// `m^d mod n` through the CRT, checked by re-encrypting the result.
    pub(crate) fn sign_raw(&self, m: &BigUint) -> Result<BigUint> {
        if m >= &self.n {
            return Err(Error::InvalidParameter {
                context: "RSA private operation",
                message: "message representative out of range".to_string(),
            });
        }

        let m1 = mod_exp(m, &self.dp, &self.p)?;
        let m2 = mod_exp(m, &self.dq, &self.q)?;
        let diff = (&m1 + &self.p - (&m2 % &self.p)) % &self.p;
        let h = (&self.qinv * diff) % &self.p;
        let s = m2 + h * &self.q;

        if &mod_exp(&s, &self.e, &self.n)? != m {
            return Err(Error::SigningFailed {
                algorithm: "RSA-PSS",
                details: "CRT result failed the consistency check".to_string(),
            });
        }
        Ok(s)
    }
}

impl fmt::Debug for RsaSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSecretKey")
            .field("modulus_bits", &self.n.bits())
            .finish_non_exhaustive()
    }
}

/// Generated RSA key pair
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    /// Public half
    pub public: RsaPublicKey,
    /// Private half
    pub secret: RsaSecretKey,
}

/// RSA-PSS signature
///
/// Only `value` takes part in verification. The salt and digest are carried
/// for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaSignature {
    /// Signature representative `s = EM^d mod n`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    pub value: BigUint,
    /// Salt used in the encoding
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_bytes"))]
    pub salt: Vec<u8>,
    /// SHA-256 of the message
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_bytes"))]
    pub digest: Vec<u8>,
}

impl RsaSignature {
    /// Signature value as hex.
    pub fn to_hex(&self) -> String {
        to_hex(&self.value)
    }
}

impl fmt::Display for RsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RSA-PSS {{ signature: {}, salt: {}, digest: {} }}",
            self.to_hex(),
            hex::encode(&self.salt),
            hex::encode(&self.digest)
        )
    }
}
