//! secp256k1 ECDSA key and signature types

use core::fmt;

use dsig_algorithms::ec::k256::{self as ec, K256_FIELD_ELEMENT_SIZE, K256_SCALAR_SIZE};
use dsig_api::error::ResultExt;
use dsig_api::{Error, Result};
use dsig_params::traditional::ecdsa::SECP256K1_NAME;
use num_bigint_dig::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::common::SignatureComponents;
use crate::encoding::{to_hex, to_hex_fixed};

/// Public key `Q = d * G`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    point: ec::Point,
}

impl EcdsaPublicKey {
    /// Wrap a curve point, rejecting infinity and off-curve points.
    pub fn new(point: ec::Point) -> Result<Self> {
        let key = Self { point };
        key.validate()?;
        Ok(key)
    }

    /// Parse a compressed or uncompressed SEC1 encoding.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        let point = ec::Point::deserialize(bytes).with_context("ECDSA public key")?;
        Self::new(point)
    }

    /// Uncompressed SEC1 encoding `0x04 || x || y`.
    pub fn to_sec1(&self) -> Vec<u8> {
        self.point.serialize_uncompressed().to_vec()
    }

    /// Compressed SEC1 encoding `0x02/0x03 || x`.
    pub fn to_sec1_compressed(&self) -> Vec<u8> {
        self.point.serialize_compressed().to_vec()
    }

    /// The underlying point.
    pub fn point(&self) -> &ec::Point {
        &self.point
    }

    /// Curve name.
    pub fn curve(&self) -> &'static str {
        SECP256K1_NAME
    }

    /// Affine `x` as 64 hex characters.
    pub fn x_hex(&self) -> String {
        hex::encode(self.point.x_coordinate_bytes())
    }

    /// Affine `y` as 64 hex characters.
    pub fn y_hex(&self) -> String {
        hex::encode(self.point.y_coordinate_bytes())
    }

    /// The point must be finite and satisfy the curve equation.
    pub fn validate(&self) -> Result<()> {
        if self.point.is_identity() {
            return Err(Error::invalid_key(
                "ECDSA public key",
                "point at infinity",
            ));
        }
        if !self.point.is_valid() {
            return Err(Error::invalid_key(
                "ECDSA public key",
                "point is not on secp256k1",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for EcdsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ECDSA-{} {{ x: {}, y: {} }}",
            self.curve(),
            self.x_hex(),
            self.y_hex()
        )
    }
}

#[cfg(feature = "serde")]
impl Serialize for EcdsaPublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.to_sec1()))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EcdsaPublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        use serde::de::Error as _;
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(D::Error::custom)?;
        Self::from_sec1(&bytes).map_err(D::Error::custom)
    }
}

/// Private scalar `d` in `[1, n - 1]`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EcdsaSecretKey {
    d: ec::Scalar,
}

impl EcdsaSecretKey {
    pub(crate) fn new(d: ec::Scalar) -> Self {
        Self { d }
    }

    /// Parse 32 big-endian bytes; zero and values `>= n` are rejected.
    pub fn from_bytes(bytes: &[u8; K256_SCALAR_SIZE]) -> Result<Self> {
        let d = ec::Scalar::new(*bytes)
            .map_err(|_| Error::invalid_key("ECDSA private key", "scalar outside [1, n-1]"))?;
        Ok(Self { d })
    }

    /// The private scalar.
    pub fn scalar(&self) -> &ec::Scalar {
        &self.d
    }

    /// `d` as 64 hex characters.
    pub fn d_hex(&self) -> String {
        hex::encode(self.d.serialize())
    }

    /// Curve name.
    pub fn curve(&self) -> &'static str {
        SECP256K1_NAME
    }

    /// Recompute `Q = d * G`.
    pub fn public_key(&self) -> Result<EcdsaPublicKey> {
        EcdsaPublicKey::new(ec::scalar_mult_base_g(&self.d)?)
    }
}

impl fmt::Debug for EcdsaSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSecretKey")
            .field("curve", &SECP256K1_NAME)
            .finish_non_exhaustive()
    }
}

/// Generated ECDSA key pair
#[derive(Debug, Clone)]
pub struct EcdsaKeyPair {
    /// Public half
    pub public: EcdsaPublicKey,
    /// Private half
    pub secret: EcdsaSecretKey,
}

/// ECDSA signature `(r, s)` with its DER framing
///
/// Verification reads `r` and `s` only; `der` and `digest` are for display
/// and transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EcdsaSignature {
    /// `R.x mod n`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    pub r: BigUint,
    /// `k^-1 (e + r d) mod n`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    pub s: BigUint,
    /// `SEQUENCE { INTEGER r, INTEGER s }`
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_bytes"))]
    pub der: Vec<u8>,
    /// SHA-256 of the message
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_bytes"))]
    pub digest: Vec<u8>,
}

impl EcdsaSignature {
    /// Signature from its components; the DER form is derived.
    pub fn from_components(r: BigUint, s: BigUint) -> Self {
        let der = SignatureComponents::new(r.clone(), s.clone()).to_der();
        Self {
            r,
            s,
            der,
            digest: Vec::new(),
        }
    }

    /// Parse a DER blob; the digest is left empty.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let SignatureComponents { r, s } = SignatureComponents::from_der(der)?;
        Ok(Self {
            r,
            s,
            der: der.to_vec(),
            digest: Vec::new(),
        })
    }

    /// Re-encode `(r, s)` as DER.
    pub fn to_der(&self) -> Vec<u8> {
        SignatureComponents::new(self.r.clone(), self.s.clone()).to_der()
    }

    /// `r` as 64 hex characters (wider if out of range).
    pub fn r_hex(&self) -> String {
        fixed_hex(&self.r)
    }

    /// `s` as 64 hex characters (wider if out of range).
    pub fn s_hex(&self) -> String {
        fixed_hex(&self.s)
    }
}

fn fixed_hex(x: &BigUint) -> String {
    to_hex_fixed(x, K256_FIELD_ELEMENT_SIZE).unwrap_or_else(|_| to_hex(x))
}

impl fmt::Display for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ECDSA {{ r: {}, s: {}, der: {} }}",
            self.r_hex(),
            self.s_hex(),
            hex::encode(&self.der)
        )
    }
}
