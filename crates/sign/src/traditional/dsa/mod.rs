//! Digital Signature Algorithm (FIPS 186-4, section 4)
//!
//! Domain parameters are generated lazily on the first key generation and
//! shared by every key pair of the instance. Nonces are derived with
//! RFC 6979 and recorded in a per-instance registry.

mod keys;
mod params;

pub use keys::{DsaKeyPair, DsaPublicKey, DsaSecretKey, DsaSignature};
pub use params::DsaDomainParameters;

use std::sync::Arc;

use dsig_algorithms::bigint::{bits2int, byte_len, mod_exp, mod_inverse, random_in_range};
use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_algorithms::nonce::{NonceRegistry, Rfc6979};
use dsig_algorithms::{BoundedCache, CancelToken};
use dsig_api::{Error, Result, Signature as SignatureTrait};
use dsig_internal::ct_eq_padded;
use dsig_params::utils::limits::{MOD_CACHE_CAPACITY, SIGN_RETRY_BUDGET};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::config::DsaConfig;
use params::keygen_error;

const ALGORITHM: &str = "DSA";

/// DSA with SHA-256 and deterministic nonces
#[derive(Debug)]
pub struct Dsa {
    config: DsaConfig,
    params: OnceCell<Arc<DsaDomainParameters>>,
    registry: NonceRegistry,
    inverse_cache: BoundedCache<(BigUint, BigUint), BigUint>,
    cancel: Option<CancelToken>,
}

impl Default for Dsa {
    fn default() -> Self {
        Self::build(DsaConfig::default())
    }
}

impl Dsa {
    /// Scheme with a validated configuration; parameters are generated on
    /// first use.
    pub fn new(config: DsaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Scheme over pre-generated parameters, which are validated first.
    pub fn with_parameters(config: DsaConfig, params: DsaDomainParameters) -> Result<Self> {
        config.validate()?;
        params.validate(config.p_rounds.max(config.q_rounds), &mut OsRng)?;
        let scheme = Self::build(config);
        // Freshly built, so the cell is empty
        let _ = scheme.params.set(Arc::new(params));
        Ok(scheme)
    }

    fn build(config: DsaConfig) -> Self {
        Self {
            config,
            params: OnceCell::new(),
            registry: NonceRegistry::default(),
            inverse_cache: BoundedCache::new(MOD_CACHE_CAPACITY),
            cancel: None,
        }
    }

    /// Abort parameter generation once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DsaConfig {
        &self.config
    }

    /// Domain parameters, if already generated or injected.
    pub fn parameters(&self) -> Option<Arc<DsaDomainParameters>> {
        self.params.get().cloned()
    }

    /// Domain parameters, generating them with `rng` on first use.
    ///
    /// Concurrent callers block until the single generation completes.
    pub fn domain_parameters<R>(&self, rng: &mut R) -> Result<Arc<DsaDomainParameters>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.params
            .get_or_try_init(|| {
                DsaDomainParameters::generate(&self.config, rng, self.cancel.as_ref()).map(Arc::new)
            })
            .cloned()
    }

    /// Generate a key pair: `x` uniform in `[1, q - 1]`, `y = g^x mod p`.
    pub fn generate_keypair<R>(&self, rng: &mut R) -> Result<DsaKeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let params = self.domain_parameters(rng)?;
        let q_minus_1 = params.q() - BigUint::one();
        let x = random_in_range(&BigUint::one(), &q_minus_1, rng).map_err(keygen_error)?;
        let y = mod_exp(params.g(), &x, params.p())?;

        info!(p_bits = params.p().bits(), "DSA key pair generated");
        Ok(DsaKeyPair {
            public: DsaPublicKey::new(params.clone(), y),
            secret: DsaSecretKey::new(params, x),
        })
    }

    /// `s^-1 mod q`, memoized; both inputs are public.
    fn inverse(&self, s: &BigUint, q: &BigUint) -> Result<BigUint> {
        self.inverse_cache
            .get_or_try_insert_with((s.clone(), q.clone()), || mod_inverse(s, q))
            .map_err(Error::from)
    }

    /// Number of nonces recorded by the registry.
    pub fn issued_nonces(&self) -> usize {
        self.registry.len()
    }
}

/// Leftmost `min(256, bitlen(q))` bits of the digest.
fn digest_to_int(digest: &[u8], q: &BigUint) -> BigUint {
    bits2int(digest, q.bits().min(digest.len() * 8))
}

fn signing_error(err: dsig_algorithms::Error) -> Error {
    match err {
        dsig_algorithms::Error::Exhausted { operation, attempts } => Error::SigningFailed {
            algorithm: ALGORITHM,
            details: format!("{} gave up after {} attempts", operation, attempts),
        },
        other => other.into(),
    }
}

impl SignatureTrait for Dsa {
    type PublicKey = DsaPublicKey;
    type SecretKey = DsaSecretKey;
    type SignatureData = DsaSignature;
    type KeyPair = DsaKeyPair;

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

    /// Sign a message
    ///
    /// 1. `z` = leftmost `min(256, bitlen(q))` bits of SHA-256(M)
    /// 2. Draw `k` from the RFC 6979 stream for `(x, H(M))`
    /// 3. `r = (g^k mod p) mod q`; redraw if `r = 0`
    /// 4. `s = k^-1 (z + x r) mod q`; redraw if `s = 0`
    ///
    /// Nonces the registry has seen for a different input are skipped.
    fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData> {
        let params = secret_key.params();
        let (p, q, g) = (params.p(), params.q(), params.g());
        let x = secret_key.x();

        let digest = Sha256::digest(message)?;
        let z = digest_to_int(&digest, q);

        let generator = Rfc6979::<Sha256>::new(q)?;
        let mut nonces = generator.stream(x, &digest)?;

        for attempt in 1..=SIGN_RETRY_BUDGET {
            let k = Zeroizing::new(nonces.next_k().map_err(signing_error)?);

            if !self.registry.claim(&k, x, &digest)? {
                debug!(attempt, "nonce already issued for another input, drawing again");
                continue;
            }

            let r = mod_exp(g, &k, p)? % q;
            if r.is_zero() {
                debug!(attempt, "r = 0, drawing a new nonce");
                continue;
            }

            let k_inv = Zeroizing::new(mod_inverse(&k, q)?);
            let s = (&*k_inv * ((&z + x * &r) % q)) % q;
            if s.is_zero() {
                debug!(attempt, "s = 0, drawing a new nonce");
                continue;
            }

            return Ok(DsaSignature {
                r,
                s,
                digest: digest.to_vec(),
                p_bits: p.bits(),
                q_bits: q.bits(),
            });
        }

        Err(Error::SigningFailed {
            algorithm: ALGORITHM,
            details: format!("no usable nonce in {} draws", SIGN_RETRY_BUDGET),
        })
    }

    /// Verify a signature
    ///
    /// 1. Reject `y` outside `(1, p)` and `r`, `s` outside `(0, q)`
    /// 2. `w = s^-1 mod q`
    /// 3. `u1 = z w mod q`, `u2 = r w mod q`
    /// 4. `v = (g^u1 y^u2 mod p) mod q`
    /// 5. Accept iff `v = r`, compared in constant time
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()> {
        public_key.validate()?;

        let params = public_key.params();
        let (p, q, g) = (params.p(), params.q(), params.g());
        let (r, s) = (&signature.r, &signature.s);

        if r.is_zero() || r >= q {
            return Err(Error::invalid_signature("DSA verify", "r outside (0, q)"));
        }
        if s.is_zero() || s >= q {
            return Err(Error::invalid_signature("DSA verify", "s outside (0, q)"));
        }

        let digest = Sha256::digest(message)?;
        let z = digest_to_int(&digest, q);

        let w = self.inverse(s, q)?;
        let u1 = (&z * &w) % q;
        let u2 = (r * &w) % q;
        let v = (mod_exp(g, &u1, p)? * mod_exp(public_key.y(), &u2, p)? % p) % q;

        if !ct_eq_padded(&v.to_bytes_be(), &r.to_bytes_be(), byte_len(q.bits())) {
            return Err(Error::invalid_signature("DSA verify", "v does not match r"));
        }
        Ok(())
    }
}
