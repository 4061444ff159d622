//! Algorithm identifiers shared by the registry and its callers

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three signature schemes the engine provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// RSA with EMSA-PSS padding
    Rsa,
    /// FIPS 186 DSA
    Dsa,
    /// ECDSA over secp256k1
    Ecdsa,
}

impl Algorithm {
    /// All algorithms in registry order
    pub const ALL: [Algorithm; 3] = [Algorithm::Rsa, Algorithm::Dsa, Algorithm::Ecdsa];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Rsa => "RSA",
            Algorithm::Dsa => "DSA",
            Algorithm::Ecdsa => "ECDSA",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
