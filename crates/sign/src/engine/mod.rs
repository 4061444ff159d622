//! Engine facade: one capability surface over the three schemes
//!
//! [`SignatureScheme`] is a sum type dispatching `generate_keys`, `sign` and
//! `verify` to RSA-PSS, DSA or ECDSA. Keys and signatures travel as the
//! matching [`KeyPair`] and [`SignatureResult`] variants. `verify` never
//! fails: every rejection, malformed input or variant mismatch is `false`.

mod registry;

pub use registry::AlgorithmRegistry;

use core::fmt;

use dsig_algorithms::CancelToken;
use dsig_api::{Algorithm, Error, Result, Signature as SignatureTrait};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::EngineConfig;
use crate::traditional::dsa::{Dsa, DsaKeyPair, DsaSignature};
use crate::traditional::ecdsa::{Ecdsa, EcdsaKeyPair, EcdsaSignature};
use crate::traditional::rsa::{RsaKeyPair, RsaPss, RsaSignature};

/// One of the three signature schemes, selected by [`Algorithm`]
#[derive(Debug)]
pub enum SignatureScheme {
    /// RSA with EMSA-PSS padding
    Rsa(RsaPss),
    /// FIPS 186 DSA
    Dsa(Dsa),
    /// ECDSA over secp256k1
    Ecdsa(Ecdsa),
}

/// Key pair produced by [`SignatureScheme::generate_keys`]
#[derive(Debug, Clone)]
pub enum KeyPair {
    /// RSA key pair
    Rsa(RsaKeyPair),
    /// DSA key pair
    Dsa(DsaKeyPair),
    /// ECDSA key pair
    Ecdsa(EcdsaKeyPair),
}

/// Signature produced by [`SignatureScheme::sign`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "algorithm", content = "signature", rename_all = "UPPERCASE")
)]
pub enum SignatureResult {
    /// RSA-PSS signature
    Rsa(RsaSignature),
    /// DSA signature
    Dsa(DsaSignature),
    /// ECDSA signature
    Ecdsa(EcdsaSignature),
}

impl SignatureScheme {
    /// Scheme with default settings.
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Rsa => Self::Rsa(RsaPss::default()),
            Algorithm::Dsa => Self::Dsa(Dsa::default()),
            Algorithm::Ecdsa => Self::Ecdsa(Ecdsa::default()),
        }
    }

    /// Scheme with the matching part of `config`, validated first.
    pub fn with_config(algorithm: Algorithm, config: &EngineConfig) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Rsa => Self::Rsa(RsaPss::new(config.rsa)?),
            Algorithm::Dsa => Self::Dsa(Dsa::new(config.dsa)?),
            Algorithm::Ecdsa => Self::Ecdsa(Ecdsa::new(config.ecdsa)),
        })
    }

    /// Scheme by case-insensitive name: `"RSA"`, `"DSA"` or `"ECDSA"`.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Abort RSA and DSA prime searches once `token` is cancelled.
    ///
    /// ECDSA key generation has no long-running search and ignores it.
    pub fn with_cancel_token(self, token: CancelToken) -> Self {
        match self {
            Self::Rsa(rsa) => Self::Rsa(rsa.with_cancel_token(token)),
            Self::Dsa(dsa) => Self::Dsa(dsa.with_cancel_token(token)),
            Self::Ecdsa(ecdsa) => Self::Ecdsa(ecdsa),
        }
    }

    /// The selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
        }
    }

    /// Generate a key pair from the operating system RNG.
    pub fn generate_keys(&self) -> Result<KeyPair> {
        self.generate_keys_with_rng(&mut OsRng)
    }

    /// Generate a key pair from `rng`.
    pub fn generate_keys_with_rng<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<KeyPair> {
        Ok(match self {
            Self::Rsa(rsa) => KeyPair::Rsa(rsa.keypair(rng)?),
            Self::Dsa(dsa) => KeyPair::Dsa(dsa.keypair(rng)?),
            Self::Ecdsa(ecdsa) => KeyPair::Ecdsa(ecdsa.keypair(rng)?),
        })
    }

    /// Sign `message` with the private half of `keys`.
    ///
    /// Fails with `InvalidKey` when `keys` belongs to another algorithm.
    pub fn sign<M: AsRef<[u8]>>(&self, message: M, keys: &KeyPair) -> Result<SignatureResult> {
        let message = message.as_ref();
        Ok(match (self, keys) {
            (Self::Rsa(rsa), KeyPair::Rsa(kp)) => SignatureResult::Rsa(rsa.sign(message, &kp.secret)?),
            (Self::Dsa(dsa), KeyPair::Dsa(kp)) => SignatureResult::Dsa(dsa.sign(message, &kp.secret)?),
            (Self::Ecdsa(ecdsa), KeyPair::Ecdsa(kp)) => {
                SignatureResult::Ecdsa(ecdsa.sign(message, &kp.secret)?)
            }
            _ => {
                return Err(Error::invalid_key(
                    "engine sign",
                    format!("{} key pair given to {}", keys.algorithm(), self.algorithm()),
                ))
            }
        })
    }

    /// Check `signature` over `message` against the public half of `keys`.
    pub fn verify<M: AsRef<[u8]>>(
        &self,
        message: M,
        signature: &SignatureResult,
        keys: &KeyPair,
    ) -> bool {
        let message = message.as_ref();
        let outcome = match (self, signature, keys) {
            (Self::Rsa(rsa), SignatureResult::Rsa(sig), KeyPair::Rsa(kp)) => {
                rsa.verify(message, sig, &kp.public)
            }
            (Self::Dsa(dsa), SignatureResult::Dsa(sig), KeyPair::Dsa(kp)) => {
                dsa.verify(message, sig, &kp.public)
            }
            (Self::Ecdsa(ecdsa), SignatureResult::Ecdsa(sig), KeyPair::Ecdsa(kp)) => {
                ecdsa.verify(message, sig, &kp.public)
            }
            _ => Err(Error::invalid_signature(
                "engine verify",
                "algorithm mismatch between scheme, signature and key pair",
            )),
        };
        self.accept(outcome)
    }

    /// Check a DER-encoded ECDSA signature. Other schemes always reject.
    pub fn verify_der<M: AsRef<[u8]>>(&self, message: M, der: &[u8], keys: &KeyPair) -> bool {
        let outcome = match (self, keys) {
            (Self::Ecdsa(ecdsa), KeyPair::Ecdsa(kp)) => {
                ecdsa.verify_der(message.as_ref(), der, &kp.public)
            }
            _ => Err(Error::invalid_format(
                "engine verify_der",
                "DER signatures are only defined for ECDSA",
            )),
        };
        self.accept(outcome)
    }

    fn accept(&self, outcome: Result<()>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(err) => {
                debug!(algorithm = %self.algorithm(), reason = %err, "signature rejected");
                false
            }
        }
    }
}

impl KeyPair {
    /// Algorithm the pair belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
        }
    }
}

/// Shows the public half only.
impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(kp) => fmt::Display::fmt(&kp.public, f),
            Self::Dsa(kp) => fmt::Display::fmt(&kp.public, f),
            Self::Ecdsa(kp) => fmt::Display::fmt(&kp.public, f),
        }
    }
}

impl SignatureResult {
    /// Algorithm that produced the signature.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
        }
    }

    /// SHA-256 of the signed message, as recorded at signing time.
    pub fn digest(&self) -> &[u8] {
        match self {
            Self::Rsa(sig) => &sig.digest,
            Self::Dsa(sig) => &sig.digest,
            Self::Ecdsa(sig) => &sig.digest,
        }
    }
}

impl fmt::Display for SignatureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(sig) => fmt::Display::fmt(sig, f),
            Self::Dsa(sig) => fmt::Display::fmt(sig, f),
            Self::Ecdsa(sig) => fmt::Display::fmt(sig, f),
        }
    }
}
