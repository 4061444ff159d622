//! DSA key and signature types

use core::fmt;
use std::sync::Arc;

use dsig_api::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::One;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::params::DsaDomainParameters;
use crate::encoding::to_hex;

/// DSA public key `y = g^x mod p` with its domain parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsaPublicKey {
    params: Arc<DsaDomainParameters>,
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    y: BigUint,
}

impl DsaPublicKey {
    /// Public key from parameters and `y`; range-checked at verification.
    pub fn new(params: Arc<DsaDomainParameters>, y: BigUint) -> Self {
        Self { params, y }
    }

    /// Domain parameters.
    pub fn params(&self) -> &Arc<DsaDomainParameters> {
        &self.params
    }

    /// The public value `y`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// `y` as hex.
    pub fn y_hex(&self) -> String {
        to_hex(&self.y)
    }

    /// `1 < y < p`
    pub fn validate(&self) -> Result<()> {
        if self.y <= BigUint::one() || &self.y >= self.params.p() {
            return Err(Error::invalid_key(
                "DSA public key",
                "y must satisfy 1 < y < p",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} y: {}", self.params, self.y_hex())
    }
}

/// DSA private key `x` in `[1, q - 1]`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DsaSecretKey {
    #[zeroize(skip)]
    params: Arc<DsaDomainParameters>,
    x: BigUint,
}

impl DsaSecretKey {
    pub(crate) fn new(params: Arc<DsaDomainParameters>, x: BigUint) -> Self {
        Self { params, x }
    }

    /// Domain parameters.
    pub fn params(&self) -> &Arc<DsaDomainParameters> {
        &self.params
    }

    /// The private value `x`.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// `x` as hex.
    pub fn x_hex(&self) -> String {
        to_hex(&self.x)
    }
}

impl fmt::Debug for DsaSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsaSecretKey")
            .field("q_bits", &self.params.q().bits())
            .finish_non_exhaustive()
    }
}

/// Generated DSA key pair
#[derive(Debug, Clone)]
pub struct DsaKeyPair {
    /// Public half
    pub public: DsaPublicKey,
    /// Private half
    pub secret: DsaSecretKey,
}

/// DSA signature `(r, s)`
///
/// The digest and parameter sizes are informational.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsaSignature {
    /// `(g^k mod p) mod q`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    pub r: BigUint,
    /// `k^-1 (z + x r) mod q`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    pub s: BigUint,
    /// SHA-256 of the message
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_bytes"))]
    pub digest: Vec<u8>,
    /// Bit length of p
    pub p_bits: usize,
    /// Bit length of q
    pub q_bits: usize,
}

impl DsaSignature {
    /// `r` as hex.
    pub fn r_hex(&self) -> String {
        to_hex(&self.r)
    }

    /// `s` as hex.
    pub fn s_hex(&self) -> String {
        to_hex(&self.s)
    }
}

impl fmt::Display for DsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DSA-{}/{} {{ r: {}, s: {}, digest: {} }}",
            self.p_bits,
            self.q_bits,
            self.r_hex(),
            self.s_hex(),
            hex::encode(&self.digest)
        )
    }
}
