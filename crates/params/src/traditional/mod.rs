//! Constants for the traditional signature schemes

pub mod dsa;
pub mod ecdsa;
pub mod rsa;
