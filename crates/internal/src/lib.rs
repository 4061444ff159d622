//! Internal utilities for the dsig signature engine
//!
//! Not part of the public API; the member crates share these helpers.

#![forbid(unsafe_code)]

pub mod constant_time;

pub use constant_time::{ct_eq, ct_eq_choice, ct_eq_padded};
