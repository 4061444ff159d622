//! secp256k1 elliptic curve point operations
//!
//! `Point` is the affine form exchanged with callers. Arithmetic runs on
//! `ProjectivePoint` in Jacobian coordinates (x = X/Z², y = Y/Z³) and only
//! converts back, with a single field inversion, at the end.

use crate::ec::k256::{
    constants::{
        K256_FIELD_ELEMENT_SIZE, K256_POINT_COMPRESSED_SIZE, K256_POINT_UNCOMPRESSED_SIZE,
    },
    field::FieldElement,
    scalar::Scalar,
};
use crate::error::{validate, Error, Result};
use dsig_params::traditional::ecdsa::SECP256K1_B;
use subtle::Choice;

/// Format of a serialized elliptic curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// The point at infinity (identity element)
    Identity,
    /// Uncompressed format: 0x04 || x || y
    Uncompressed,
    /// Compressed format: 0x02/0x03 || x
    Compressed,
}

/// A point on the secp256k1 elliptic curve in affine coordinates
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// A point in Jacobian coordinates; `Z = 0` marks the point at infinity.
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let self_is_identity: bool = self.is_identity.into();
        let other_is_identity: bool = other.is_identity.into();
        if self_is_identity || other_is_identity {
            return self_is_identity == other_is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Create a new point from uncompressed coordinates.
    ///
    /// Returns an error if the coordinates don't satisfy the curve equation.
    pub fn new_uncompressed(
        x: &[u8; K256_FIELD_ELEMENT_SIZE],
        y: &[u8; K256_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x)?;
        let y_fe = FieldElement::from_bytes(y)?;
        Self::from_affine(x_fe, y_fe)
    }

    /// Create a point from field coordinates, checking the curve equation.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self> {
        if !Self::is_on_curve(&x, &y) {
            return Err(Error::param(
                "K256 Point",
                "Point coordinates do not satisfy curve equation",
            ));
        }
        Ok(Self::from_affine_unchecked(x, y))
    }

    pub(crate) fn from_affine_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Point {
            is_identity: Choice::from(0),
            x,
            y,
        }
    }

    /// Create the identity point (point at infinity).
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Check if this point is the identity element.
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Check if this point is valid (on the curve).
    pub fn is_valid(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        Self::is_on_curve(&self.x, &self.y)
    }

    /// Affine x-coordinate.
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// Affine y-coordinate.
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Get the x-coordinate of this point as bytes.
    pub fn x_coordinate_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Get the y-coordinate of this point as bytes.
    pub fn y_coordinate_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Detect the format of a serialized point from its length and prefix.
    pub fn detect_format(bytes: &[u8]) -> Result<PointFormat> {
        if bytes.is_empty() {
            return Err(Error::param("K256 Point", "Empty point encoding"));
        }
        if bytes.iter().all(|&b| b == 0) {
            return Ok(PointFormat::Identity);
        }
        match (bytes.len(), bytes[0]) {
            (K256_POINT_UNCOMPRESSED_SIZE, 0x04) => Ok(PointFormat::Uncompressed),
            (K256_POINT_COMPRESSED_SIZE, 0x02 | 0x03) => Ok(PointFormat::Compressed),
            _ => Err(Error::param("K256 Point", "Unknown point encoding")),
        }
    }

    /// Serialize this point in uncompressed format.
    pub fn serialize_uncompressed(&self) -> [u8; K256_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; K256_POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize a point from uncompressed format.
    ///
    /// Returns an error if the bytes don't represent a valid point.
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "K256 Uncompressed Point",
            bytes.len(),
            K256_POINT_UNCOMPRESSED_SIZE,
        )?;

        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }
        if bytes[0] != 0x04 {
            return Err(Error::param(
                "K256 Point",
                "Invalid uncompressed point prefix (expected 0x04)",
            ));
        }

        let mut x_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        let mut y_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..33]);
        y_bytes.copy_from_slice(&bytes[33..65]);
        Self::new_uncompressed(&x_bytes, &y_bytes)
    }

    /// Serialize this point in compressed format.
    pub fn serialize_compressed(&self) -> [u8; K256_POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; K256_POINT_COMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Deserialize a point from compressed format.
    ///
    /// Returns an error if the bytes don't represent a valid point.
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "K256 Compressed Point",
            bytes.len(),
            K256_POINT_COMPRESSED_SIZE,
        )?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }
        let tag = bytes[0];
        if tag != 0x02 && tag != 0x03 {
            return Err(Error::param("K256 Point", "Invalid compressed point prefix"));
        }
        let mut x_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x_fe = FieldElement::from_bytes(&x_bytes)
            .map_err(|_| Error::param("K256 Point", "Invalid x-coordinate"))?;
        let y_fe = Self::curve_rhs(&x_fe)
            .sqrt()
            .ok_or_else(|| Error::param("K256 Point", "Invalid compressed point: no sqrt"))?;
        let y_final = if y_fe.is_odd() == (tag == 0x03) {
            y_fe
        } else {
            y_fe.negate()
        };
        Ok(Self::from_affine_unchecked(x_fe, y_final))
    }

    /// Decode either encoding.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        match Self::detect_format(bytes)? {
            PointFormat::Identity => Ok(Self::identity()),
            PointFormat::Uncompressed => Self::deserialize_uncompressed(bytes),
            PointFormat::Compressed => Self::deserialize_compressed(bytes),
        }
    }

    /// Add two points using the group law.
    pub fn add(&self, other: &Self) -> Self {
        self.to_projective().add(&other.to_projective()).to_affine()
    }

    /// Double a point (add it to itself).
    pub fn double(&self) -> Self {
        self.to_projective().double().to_affine()
    }

    /// The inverse point `-P = (x, -y)`.
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        Self::from_affine_unchecked(self.x.clone(), self.y.negate())
    }

    /// Scalar multiplication: compute scalar * self.
    ///
    /// Left-to-right double-and-add over all 256 scalar bits.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() || self.is_identity() {
            return Ok(Self::identity());
        }
        let base = self.to_projective();
        let mut result = ProjectivePoint::identity();
        for bit in scalar.bits_msb_first() {
            result = result.double();
            if bit {
                result = result.add(&base);
            }
        }
        Ok(result.to_affine())
    }

    fn curve_rhs(x: &FieldElement) -> FieldElement {
        // a = 0, so y^2 = x^3 + b
        x.square().mul(x).add(&FieldElement::from_u32(SECP256K1_B))
    }

    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        y.square() == Self::curve_rhs(x)
    }

    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        if self.is_identity() {
            return ProjectivePoint::identity();
        }
        ProjectivePoint {
            x: self.x.clone(),
            y: self.y.clone(),
            z: FieldElement::one(),
        }
    }
}

impl ProjectivePoint {
    pub fn identity() -> Self {
        ProjectivePoint {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let z1_sq = self.z.square();
        let z2_sq = other.z.square();
        let u1 = self.x.mul(&z2_sq);
        let u2 = other.x.mul(&z1_sq);
        let s1 = self.y.mul(&z2_sq).mul(&other.z);
        let s2 = other.y.mul(&z1_sq).mul(&self.z);

        let h = u2.sub(&u1);
        if h.is_zero() {
            if s1 == s2 {
                return self.double();
            }
            // P + (-P)
            return Self::identity();
        }

        let r = s2.sub(&s1);
        let h_sq = h.square();
        let h_cu = h_sq.mul(&h);
        let v = u1.mul(&h_sq);

        let x3 = r.square().sub(&h_cu).sub(&v.double());
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&h_cu));
        let z3 = self.z.mul(&other.z).mul(&h);

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Jacobian doubling for a = 0 (dbl-2009-l).
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        // D = 2 * ((X + B)^2 - A - C)
        let d = self.x.add(&b).square().sub(&a).sub(&c).double();
        let e = a.double().add(&a);
        let f = e.square();

        let x3 = f.sub(&d.double());
        let eight_c = c.double().double().double();
        let y3 = e.mul(&d.sub(&x3)).sub(&eight_c);
        let z3 = self.y.mul(&self.z).double();

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn to_affine(&self) -> Point {
        let z_inv = match self.z.invert() {
            Some(inv) => inv,
            None => return Point::identity(),
        };
        let z_inv_sq = z_inv.square();
        let z_inv_cu = z_inv_sq.mul(&z_inv);
        Point::from_affine_unchecked(self.x.mul(&z_inv_sq), self.y.mul(&z_inv_cu))
    }
}
