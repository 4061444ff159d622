//! ECDSA over secp256k1
//!
//! Follows SEC 1, section 4.1, with SHA-256 digests and RFC 6979 nonces.
//! Signatures carry both the `(r, s)` pair and its DER framing.

pub mod common;
mod keys;

pub use common::SignatureComponents;
pub use keys::{EcdsaKeyPair, EcdsaPublicKey, EcdsaSecretKey, EcdsaSignature};

use dsig_algorithms::bigint::bits2int;
use dsig_algorithms::ec::k256 as ec;
use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_algorithms::nonce::{NonceRegistry, Rfc6979};
use dsig_api::{error::Error as ApiError, Result as ApiResult, Signature as SignatureTrait};
use dsig_internal::constant_time::ct_eq;
use dsig_params::utils::limits::SIGN_RETRY_BUDGET;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::config::EcdsaConfig;

const ALGORITHM: &str = "ECDSA";

/// ECDSA signature scheme over secp256k1
#[derive(Debug, Default)]
pub struct Ecdsa {
    config: EcdsaConfig,
    registry: NonceRegistry,
}

impl Ecdsa {
    /// Scheme with the given settings.
    pub fn new(config: EcdsaConfig) -> Self {
        Self {
            config,
            registry: NonceRegistry::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EcdsaConfig {
        &self.config
    }

    /// Generate a key pair: `d` uniform in `[1, n - 1]`, `Q = d * G`.
    pub fn generate_keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> ApiResult<EcdsaKeyPair> {
        let (d, q) = ec::generate_keypair(rng).map_err(ApiError::from)?;
        let public = EcdsaPublicKey::new(q)?;
        info!(curve = public.curve(), "ECDSA key pair generated");
        Ok(EcdsaKeyPair {
            public,
            secret: EcdsaSecretKey::new(d),
        })
    }

    /// Decode a DER signature and verify it.
    pub fn verify_der(
        &self,
        message: &[u8],
        der: &[u8],
        public_key: &EcdsaPublicKey,
    ) -> ApiResult<()> {
        let signature = EcdsaSignature::from_der(der)?;
        self.verify(message, &signature, public_key)
    }

    /// Number of nonces recorded by the registry.
    pub fn issued_nonces(&self) -> usize {
        self.registry.len()
    }
}

/// `e` = leftmost 256 bits of the digest, reduced mod n.
fn digest_scalar(digest: &[u8]) -> ec::Scalar {
    let n = ec::curve_order();
    ec::Scalar::reduce(&bits2int(digest, n.bits()))
}

fn signing_error(err: dsig_algorithms::Error) -> ApiError {
    match err {
        dsig_algorithms::Error::Exhausted {
            operation,
            attempts,
        } => ApiError::SigningFailed {
            algorithm: ALGORITHM,
            details: format!("{} gave up after {} attempts", operation, attempts),
        },
        other => other.into(),
    }
}

impl SignatureTrait for Ecdsa {
    type PublicKey = EcdsaPublicKey;
    type SecretKey = EcdsaSecretKey;
    type SignatureData = EcdsaSignature;
    type KeyPair = EcdsaKeyPair;

    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn keypair<R: CryptoRng + RngCore>(&self, rng: &mut R) -> ApiResult<Self::KeyPair> {
        self.generate_keypair(rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.public.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.secret.clone()
    }

    /// Sign a message using ECDSA
    ///
    /// Algorithm:
    /// 1. e = SHA-256(M) reduced mod n
    /// 2. Draw k from the RFC 6979 stream for (d, SHA-256(M))
    /// 3. R = k·G, taken from the fixed-base table
    /// 4. r = R.x mod n; if r = 0, draw the next k
    /// 5. s = k⁻¹(e + rd) mod n; if s = 0, draw the next k
    /// 6. With low-S enabled, replace s by n - s when s > n/2
    /// 7. Return (r, s) and its DER encoding
    fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        let digest = Sha256::digest(message).map_err(ApiError::from)?;
        let e = digest_scalar(&digest);
        let d = secret_key.scalar();

        let generator = Rfc6979::<Sha256>::new(ec::curve_order()).map_err(ApiError::from)?;
        let mut nonces = generator
            .stream(d.as_biguint(), &digest)
            .map_err(ApiError::from)?;

        for attempt in 1..=SIGN_RETRY_BUDGET {
            let k_int = Zeroizing::new(nonces.next_k().map_err(signing_error)?);

            if !self.registry.claim(&k_int, d.as_biguint(), &digest)? {
                debug!(attempt, "nonce already issued for another input, drawing again");
                continue;
            }

            let k = ec::Scalar::from_biguint(&k_int).map_err(ApiError::from)?;
            let big_r = ec::scalar_mult_base_g(&k).map_err(ApiError::from)?;
            if big_r.is_identity() {
                debug!(attempt, "k·G is the point at infinity, drawing a new nonce");
                continue;
            }

            let r = ec::Scalar::reduce(big_r.x().as_biguint());
            if r.is_zero() {
                debug!(attempt, "r = 0, drawing a new nonce");
                continue;
            }

            let k_inv = k.invert().map_err(ApiError::from)?;
            let mut s = k_inv.mul(&e.add(&r.mul(d)));
            if s.is_zero() {
                debug!(attempt, "s = 0, drawing a new nonce");
                continue;
            }
            if self.config.low_s && s.is_high() {
                s = s.negate();
            }

            let components = SignatureComponents::new(r.as_biguint().clone(), s.as_biguint().clone());
            let der = components.to_der();
            return Ok(EcdsaSignature {
                r: components.r,
                s: components.s,
                der,
                digest: digest.to_vec(),
            });
        }

        Err(ApiError::SigningFailed {
            algorithm: ALGORITHM,
            details: format!("no usable nonce in {} draws", SIGN_RETRY_BUDGET),
        })
    }

    /// Verify an ECDSA signature
    ///
    /// Algorithm:
    /// 1. Reject public keys at infinity or off the curve
    /// 2. Verify that r and s are integers in [1, n-1]
    /// 3. e = SHA-256(M) reduced mod n
    /// 4. w = s⁻¹ mod n
    /// 5. u₁ = ew mod n and u₂ = rw mod n
    /// 6. P = u₁·G + u₂·Q by Shamir's trick
    /// 7. If P = O, reject the signature
    /// 8. Accept iff P.x mod n = r
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        public_key.validate()?;

        let r = ec::Scalar::from_biguint(&signature.r).map_err(|_| ApiError::InvalidSignature {
            context: "ECDSA verify",
            message: "r outside [1, n-1]".to_string(),
        })?;
        let s = ec::Scalar::from_biguint(&signature.s).map_err(|_| ApiError::InvalidSignature {
            context: "ECDSA verify",
            message: "s outside [1, n-1]".to_string(),
        })?;

        let digest = Sha256::digest(message).map_err(ApiError::from)?;
        let e = digest_scalar(&digest);

        let w = s.invert().map_err(ApiError::from)?;
        let u1 = e.mul(&w);
        let u2 = r.mul(&w);

        let point = ec::double_scalar_mult(&u1, &u2, public_key.point());
        if point.is_identity() {
            return Err(ApiError::InvalidSignature {
                context: "ECDSA verify",
                message: "verification point is identity".to_string(),
            });
        }

        let v = ec::Scalar::reduce(point.x().as_biguint());
        if !ct_eq(r.serialize(), v.serialize()) {
            return Err(ApiError::InvalidSignature {
                context: "ECDSA verify",
                message: "Signature verification failed".to_string(),
            });
        }

        Ok(())
    }
}
