//! Runtime configuration for the signature schemes
//!
//! Every struct defaults to the standard sizes and can be tightened or
//! relaxed at runtime; `validate` enforces the floors below which the
//! schemes refuse to operate.

use dsig_api::{Error, Result};
use dsig_params::traditional::dsa::{DSA_2048_256, DSA_P_MR_ROUNDS, DSA_Q_MR_ROUNDS};
use dsig_params::traditional::rsa::{RSA_MODULUS_2048, RSA_MR_ROUNDS, RSA_PSS_SALT_LEN};
use dsig_params::utils::limits::MIN_MODULUS_BITS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fewest Miller-Rabin rounds accepted for RSA primes
pub const MIN_RSA_MR_ROUNDS: usize = 20;

/// Smallest DSA subgroup order accepted
pub const MIN_DSA_Q_BITS: usize = 160;

/// RSA-PSS key generation and padding settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaConfig {
    /// Bit length of the modulus n (each prime has half of it)
    pub modulus_bits: usize,
    /// Requested salt length in bytes, clamped to what the modulus allows
    pub salt_len: usize,
    /// Miller-Rabin rounds per prime
    pub mr_rounds: usize,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            modulus_bits: RSA_MODULUS_2048,
            salt_len: RSA_PSS_SALT_LEN,
            mr_rounds: RSA_MR_ROUNDS,
        }
    }
}

impl RsaConfig {
    /// Check the configuration against the scheme's floors.
    pub fn validate(&self) -> Result<()> {
        if self.modulus_bits < MIN_MODULUS_BITS {
            return Err(invalid(format!(
                "RSA modulus of {} bits is below the {}-bit floor",
                self.modulus_bits, MIN_MODULUS_BITS
            )));
        }
        if self.modulus_bits % 2 != 0 {
            return Err(invalid("RSA modulus size must be even".to_string()));
        }
        if self.mr_rounds < MIN_RSA_MR_ROUNDS {
            return Err(invalid(format!(
                "RSA primes need at least {} Miller-Rabin rounds",
                MIN_RSA_MR_ROUNDS
            )));
        }
        Ok(())
    }
}

/// DSA domain-parameter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsaConfig {
    /// Bit length of the modulus p
    pub p_bits: usize,
    /// Bit length of the subgroup order q
    pub q_bits: usize,
    /// Miller-Rabin rounds for p
    pub p_rounds: usize,
    /// Miller-Rabin rounds for q
    pub q_rounds: usize,
}

impl Default for DsaConfig {
    fn default() -> Self {
        let (p_bits, q_bits) = DSA_2048_256;
        Self {
            p_bits,
            q_bits,
            p_rounds: DSA_P_MR_ROUNDS,
            q_rounds: DSA_Q_MR_ROUNDS,
        }
    }
}

impl DsaConfig {
    /// Check the configuration against the scheme's floors.
    pub fn validate(&self) -> Result<()> {
        if self.p_bits < MIN_MODULUS_BITS {
            return Err(invalid(format!(
                "DSA modulus of {} bits is below the {}-bit floor",
                self.p_bits, MIN_MODULUS_BITS
            )));
        }
        if self.q_bits < MIN_DSA_Q_BITS {
            return Err(invalid(format!(
                "DSA subgroup order needs at least {} bits",
                MIN_DSA_Q_BITS
            )));
        }
        if self.q_bits >= self.p_bits {
            return Err(invalid("DSA q must be shorter than p".to_string()));
        }
        if self.p_rounds == 0 || self.q_rounds == 0 {
            return Err(invalid("Miller-Rabin rounds must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// ECDSA signing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EcdsaConfig {
    /// Replace `s` by `n - s` when `s > n / 2`
    pub low_s: bool,
}

impl Default for EcdsaConfig {
    fn default() -> Self {
        Self { low_s: true }
    }
}

/// Settings for every scheme the engine can construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// RSA-PSS settings
    pub rsa: RsaConfig,
    /// DSA settings
    pub dsa: DsaConfig,
    /// ECDSA settings
    pub ecdsa: EcdsaConfig,
}

impl EngineConfig {
    /// Validate every contained configuration.
    pub fn validate(&self) -> Result<()> {
        self.rsa.validate()?;
        self.dsa.validate()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidParameter {
        context: "configuration",
        message,
    }
}
