//! Name-keyed registry owning one instance of each scheme

use dsig_api::{Algorithm, Result};

use super::SignatureScheme;
use crate::config::EngineConfig;

/// One long-lived instance per algorithm
///
/// Callers sharing a registry share its lazily generated DSA parameters,
/// nonce registries and inverse caches.
#[derive(Debug)]
pub struct AlgorithmRegistry {
    rsa: SignatureScheme,
    dsa: SignatureScheme,
    ecdsa: SignatureScheme,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self {
            rsa: SignatureScheme::new(Algorithm::Rsa),
            dsa: SignatureScheme::new(Algorithm::Dsa),
            ecdsa: SignatureScheme::new(Algorithm::Ecdsa),
        }
    }
}

impl AlgorithmRegistry {
    /// Registry built from a validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rsa: SignatureScheme::with_config(Algorithm::Rsa, config)?,
            dsa: SignatureScheme::with_config(Algorithm::Dsa, config)?,
            ecdsa: SignatureScheme::with_config(Algorithm::Ecdsa, config)?,
        })
    }

    /// Scheme by case-insensitive name.
    pub fn get(&self, name: &str) -> Result<&SignatureScheme> {
        Ok(self.get_algorithm(name.parse()?))
    }

    /// Scheme for `algorithm`.
    pub fn get_algorithm(&self, algorithm: Algorithm) -> &SignatureScheme {
        match algorithm {
            Algorithm::Rsa => &self.rsa,
            Algorithm::Dsa => &self.dsa,
            Algorithm::Ecdsa => &self.ecdsa,
        }
    }

    /// Registered algorithms in lookup order.
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> {
        Algorithm::ALL.into_iter()
    }
}
