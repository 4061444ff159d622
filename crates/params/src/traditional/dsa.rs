//! Constants for Digital Signature Algorithm (DSA)

/// DSA with 2048-bit modulus and 256-bit subgroup
pub const DSA_2048_256: (usize, usize) = (2048, 256);

/// DSA with 3072-bit modulus and 256-bit subgroup
pub const DSA_3072_256: (usize, usize) = (3072, 256);

/// Miller-Rabin rounds for the subgroup order q
pub const DSA_Q_MR_ROUNDS: usize = 20;

/// Miller-Rabin rounds for the modulus p
pub const DSA_P_MR_ROUNDS: usize = 32;
