//! Elliptic Curve Primitives
//!
//! Only secp256k1 is provided; the ECDSA scheme is its sole consumer.

pub mod k256;

pub use k256::{Point as K256Point, Scalar as K256Scalar};
