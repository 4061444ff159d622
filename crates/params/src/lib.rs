//! Constant values for the dsig signature engine
//!
//! Sizes, exponents, retry budgets and curve constants shared by the
//! primitive layer and the signature schemes.

#![no_std]

pub mod traditional;
pub mod utils;
