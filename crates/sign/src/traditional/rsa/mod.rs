//! RSA signatures with EMSA-PSS padding
//!
//! Implements RSASSA-PSS as specified in RFC 8017, section 8.1, with SHA-256
//! for both the message digest and MGF1. Keys use the fixed public exponent
//! 65537 and two primes of half the modulus size each.

mod keys;
pub mod pss;

pub use keys::{RsaKeyPair, RsaPublicKey, RsaSecretKey, RsaSignature};

use dsig_algorithms::bigint::{mod_exp, to_fixed_be};
use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_algorithms::prime::random_prime;
use dsig_algorithms::{CancelToken, Error as PrimitiveError};
use dsig_api::error::ResultExt;
use dsig_api::{Error, Result, Signature as SignatureTrait};
use dsig_params::traditional::rsa::RSA_PUBLIC_EXPONENT;
use dsig_params::utils::limits::KEYGEN_RETRY_BUDGET;
use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::config::RsaConfig;

const ALGORITHM: &str = "RSA-PSS";

/// RSASSA-PSS with SHA-256
#[derive(Debug, Clone, Default)]
pub struct RsaPss {
    config: RsaConfig,
    cancel: Option<CancelToken>,
}

impl RsaPss {
    /// Scheme with a validated configuration.
    pub fn new(config: RsaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Abort prime searches once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &RsaConfig {
        &self.config
    }

    /// Generate a key pair.
    ///
    /// 1. Draw primes `p` and `q` of `modulus_bits / 2` bits each
    /// 2. Resample if `p = q` or `n = pq` falls short of `modulus_bits`
    /// 3. `d = e^-1 mod (p-1)(q-1)`; resample if `e` is not invertible
    ///
    /// Gives up with `KeyGenerationFailed` after `KEYGEN_RETRY_BUDGET` pairs.
    pub fn generate_keypair<R>(&self, rng: &mut R) -> Result<RsaKeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let bits = self.config.modulus_bits;
        let half = bits / 2;
        let e = BigUint::from(RSA_PUBLIC_EXPONENT);

        for attempt in 1..=KEYGEN_RETRY_BUDGET {
            let p = self.prime(half, rng)?;
            let q = self.prime(half, rng)?;

            if p == q {
                debug!(attempt, "RSA primes coincide, resampling");
                continue;
            }
            if (&p * &q).bits() != bits {
                debug!(attempt, "RSA modulus too short, resampling");
                continue;
            }

            let secret = match RsaSecretKey::from_primes(p, q, e.clone()) {
                Ok(secret) => secret,
                Err(Error::InverseNotFound) => {
                    debug!(attempt, "public exponent not invertible, resampling");
                    continue;
                }
                Err(err) => return Err(err),
            };

            info!(modulus_bits = bits, attempts = attempt, "RSA key pair generated");
            return Ok(RsaKeyPair {
                public: secret.public_key(),
                secret,
            });
        }

        Err(Error::KeyGenerationFailed {
            algorithm: ALGORITHM,
            details: format!("no usable prime pair in {} attempts", KEYGEN_RETRY_BUDGET),
        })
    }

    fn prime<R>(&self, bits: usize, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        random_prime(bits, self.config.mr_rounds, rng, self.cancel.as_ref()).map_err(|err| {
            match err {
                PrimitiveError::Exhausted {
                    operation,
                    attempts,
                } => Error::KeyGenerationFailed {
                    algorithm: ALGORITHM,
                    details: format!("{} gave up after {} candidates", operation, attempts),
                },
                other => other.into(),
            }
        })
    }

    /// Sign with a salt drawn from `rng`.
    ///
    /// 1. `mHash = SHA-256(M)`
    /// 2. `emBits = modBits - 1`, `sLen = min(salt_len, emLen - hLen - 2)`
    /// 3. `EM = EMSA-PSS-ENCODE(mHash, salt, emBits)`
    /// 4. `s = EM^d mod n`
    pub fn sign_with_rng<R>(
        &self,
        message: &[u8],
        secret_key: &RsaSecretKey,
        rng: &mut R,
    ) -> Result<RsaSignature>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mod_bits = secret_key.n().bits();
        if mod_bits < 2 {
            return Err(Error::invalid_key("RSA-PSS sign", "modulus too small"));
        }
        let em_bits = mod_bits - 1;

        let digest = Sha256::digest(message)?;
        let salt_len = self.config.salt_len.min(pss::max_salt_len(em_bits));
        let mut salt = vec![0u8; salt_len];
        rng.fill_bytes(&mut salt);

        let em = pss::encode(&digest, &salt, em_bits)?;
        let value = secret_key.sign_raw(&BigUint::from_bytes_be(&em))?;

        Ok(RsaSignature {
            value,
            salt,
            digest: digest.to_vec(),
        })
    }
}

impl SignatureTrait for RsaPss {
    type PublicKey = RsaPublicKey;
    type SecretKey = RsaSecretKey;
    type SignatureData = RsaSignature;
    type KeyPair = RsaKeyPair;

    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<Self::KeyPair> {
        self.generate_keypair(rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.public.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.secret.clone()
    }

    /// Sign with a salt from the operating system RNG.
    fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData> {
        self.sign_with_rng(message, secret_key, &mut OsRng)
    }

    /// Verify a signature
    ///
    /// 1. Reject keys that fail [`RsaPublicKey::validate`]
    /// 2. Reject `s >= n`
    /// 3. `EM = s^e mod n` as `emLen` bytes
    /// 4. `EMSA-PSS-VERIFY(SHA-256(M), EM, modBits - 1)`
    ///
    /// The salt and digest stored in the signature are ignored.
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()> {
        public_key.validate()?;

        let n = public_key.n();
        if &signature.value >= n {
            return Err(Error::invalid_signature(
                "RSA-PSS verify",
                "signature representative not below the modulus",
            ));
        }

        let em_bits = n.bits() - 1;
        let m = mod_exp(&signature.value, public_key.e(), n)?;
        let em = to_fixed_be(&m, pss::em_len(em_bits)).map_err(|_| {
            Error::invalid_signature("RSA-PSS verify", "encoded message longer than emLen")
        })?;

        let digest = Sha256::digest(message)?;
        pss::verify(&digest, &em, em_bits).with_context("RSA-PSS verify")?;
        Ok(())
    }
}
