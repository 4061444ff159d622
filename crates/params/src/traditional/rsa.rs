//! Constants for RSA-PSS

/// RSA with 2048-bit modulus
pub const RSA_MODULUS_2048: usize = 2048;

/// RSA with 3072-bit modulus
pub const RSA_MODULUS_3072: usize = 3072;

/// Common RSA public exponent (65537)
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Requested PSS salt length in bytes (clamped to what the modulus allows)
pub const RSA_PSS_SALT_LEN: usize = 32;

/// EMSA-PSS trailer field
pub const RSA_PSS_TRAILER: u8 = 0xBC;

/// Miller-Rabin rounds for each RSA prime
pub const RSA_MR_ROUNDS: usize = 24;
