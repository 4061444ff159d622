//! Koblitz secp256k1 Elliptic Curve Primitives
//!
//! The curve equation is y² = x³ + 7 over the prime field F_p where:
//! - p = 2^256 - 2^32 - 977
//! - The curve order n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
//!
//! Field and scalar values are reduced `BigUint`s. Multiplications by the
//! generator go through a precomputed window table; `u1*G + u2*Q` uses
//! Shamir's trick.

mod constants;
mod field;
mod point;
mod scalar;
mod table;

pub use constants::{
    K256_FIELD_ELEMENT_SIZE, K256_POINT_COMPRESSED_SIZE, K256_POINT_UNCOMPRESSED_SIZE,
    K256_SCALAR_SIZE,
};
pub use field::FieldElement;
pub use point::{Point, PointFormat};
pub use scalar::Scalar;

use num_bigint_dig::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::bigint::random_in_range;
use crate::error::Result;
use dsig_params::traditional::ecdsa::{SECP256K1_GX, SECP256K1_GY};

use point::ProjectivePoint;

static BASE_POINT: Lazy<Point> = Lazy::new(|| {
    Point::from_affine_unchecked(
        FieldElement(BigUint::from_bytes_be(&SECP256K1_GX)),
        FieldElement(BigUint::from_bytes_be(&SECP256K1_GY)),
    )
});

/// Get the standard base point G of the secp256k1 curve
pub fn base_point_g() -> Point {
    BASE_POINT.clone()
}

/// The field prime p.
pub fn field_prime() -> &'static BigUint {
    &field::FIELD_P
}

/// The group order n.
pub fn curve_order() -> &'static BigUint {
    Scalar::order()
}

/// Scalar multiplication with the base point: scalar * G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Result<Point> {
    Ok(table::G_TABLE.mul(scalar))
}

/// General scalar multiplication: compute scalar * point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Result<Point> {
    if point.is_identity() {
        return Ok(Point::identity());
    }
    point.mul(scalar)
}

/// `u1 * G + u2 * Q` with one shared doubling chain.
///
/// The result may be the point at infinity.
pub fn double_scalar_mult(u1: &Scalar, u2: &Scalar, q: &Point) -> Point {
    let g = BASE_POINT.to_projective();
    let q = q.to_projective();
    let g_plus_q = g.add(&q);

    let mut acc = ProjectivePoint::identity();
    for (b1, b2) in u1.bits_msb_first().zip(u2.bits_msb_first()) {
        acc = acc.double();
        match (b1, b2) {
            (true, true) => acc = acc.add(&g_plus_q),
            (true, false) => acc = acc.add(&g),
            (false, true) => acc = acc.add(&q),
            (false, false) => {}
        }
    }
    acc.to_affine()
}

/// Generate a key pair: `d` uniform in `[1, n - 1]`, `Q = d * G`.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let n_minus_one = curve_order() - BigUint::one();
    let mut d = random_in_range(&BigUint::one(), &n_minus_one, rng)?;
    let private_key = Scalar::from_biguint(&d);
    d.zeroize();
    let private_key = private_key?;
    let public_key = scalar_mult_base_g(&private_key)?;
    Ok((private_key, public_key))
}
