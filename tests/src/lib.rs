//! Shared fixtures for the dsig integration and property tests
//!
//! Key generation for RSA and DSA is slow, so every suite draws from one
//! registry and one set of seeded key pairs built on first use.

use dsig_api::Algorithm;
use dsig_sign::{AlgorithmRegistry, DsaConfig, EngineConfig, KeyPair, RsaConfig};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub mod vectors;

/// Sizes small enough to keep the suites fast: RSA-1024 and DSA-1024/160.
pub fn small_config() -> EngineConfig {
    EngineConfig {
        rsa: RsaConfig {
            modulus_bits: 1024,
            ..RsaConfig::default()
        },
        dsa: DsaConfig {
            p_bits: 1024,
            q_bits: 160,
            p_rounds: 20,
            q_rounds: 20,
        },
        ..EngineConfig::default()
    }
}

/// Deterministic RNG for reproducible key material.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Registry shared by every test in a binary.
pub static REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(|| {
    AlgorithmRegistry::new(&small_config()).expect("small configuration is valid")
});

static KEYS: Lazy<Vec<KeyPair>> = Lazy::new(|| {
    let mut rng = seeded_rng(0x6473_6967);
    Algorithm::ALL
        .iter()
        .map(|&alg| {
            REGISTRY
                .get_algorithm(alg)
                .generate_keys_with_rng(&mut rng)
                .expect("key generation succeeds")
        })
        .collect()
});

/// The shared key pair for `alg`.
pub fn keys(alg: Algorithm) -> &'static KeyPair {
    KEYS.iter()
        .find(|kp| kp.algorithm() == alg)
        .expect("one key pair per algorithm")
}
