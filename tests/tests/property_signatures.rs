//! Property-based tests for signing and verification

use dsig_algorithms::ec::k256 as ec;
use dsig_api::{Algorithm, Signature};
use dsig_sign::traditional::ecdsa::{Ecdsa, EcdsaSecretKey};
use dsig_sign::traditional::rsa::pss;
use dsig_tests::{keys, REGISTRY};
use num_bigint_dig::BigUint;
use proptest::prelude::*;

fn message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ecdsa_roundtrip(msg in message()) {
        let scheme = REGISTRY.get_algorithm(Algorithm::Ecdsa);
        let kp = keys(Algorithm::Ecdsa);
        let sig = scheme.sign(&msg, kp).unwrap();
        prop_assert!(scheme.verify(&msg, &sig, kp));
    }

    #[test]
    fn ecdsa_bit_flip_rejected(msg in prop::collection::vec(any::<u8>(), 1..256), index in any::<prop::sample::Index>(), bit in 0u8..8) {
        let scheme = REGISTRY.get_algorithm(Algorithm::Ecdsa);
        let kp = keys(Algorithm::Ecdsa);
        let sig = scheme.sign(&msg, kp).unwrap();

        let mut tampered = msg;
        let i = index.index(tampered.len());
        tampered[i] ^= 1 << bit;
        prop_assert!(!scheme.verify(&tampered, &sig, kp));
    }

    #[test]
    fn ecdsa_any_valid_scalar_signs(d in any::<[u8; 32]>(), msg in message()) {
        // Scalars outside [1, n - 1] are refused up front
        let Ok(secret) = EcdsaSecretKey::from_bytes(&d) else {
            let value = BigUint::from_bytes_be(&d);
            prop_assert!(value == BigUint::from(0u32) || &value >= ec::curve_order());
            return Ok(());
        };
        let ecdsa = Ecdsa::default();
        let public = secret.public_key().unwrap();
        let sig = ecdsa.sign(&msg, &secret).unwrap();

        prop_assert!(sig.s <= ec::curve_order().clone() >> 1usize);
        prop_assert!(ecdsa.verify(&msg, &sig, &public).is_ok());
        prop_assert!(ecdsa.verify_der(&msg, &sig.der, &public).is_ok());
    }

    #[test]
    fn pss_encoding_roundtrip(m_hash in any::<[u8; 32]>(), em_bits in 300usize..=2100, salt_seed in any::<[u8; 32]>(), salt_len in 0usize..=32) {
        let salt_len = salt_len.min(pss::max_salt_len(em_bits));
        let salt = &salt_seed[..salt_len];

        let em = pss::encode(&m_hash, salt, em_bits).unwrap();
        prop_assert_eq!(em.len(), pss::em_len(em_bits));
        prop_assert_eq!(em[em.len() - 1], 0xBC);
        prop_assert_eq!(pss::verify(&m_hash, &em, em_bits).unwrap(), salt.to_vec());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn rsa_and_dsa_roundtrip(msg in message()) {
        for alg in [Algorithm::Rsa, Algorithm::Dsa] {
            let scheme = REGISTRY.get_algorithm(alg);
            let kp = keys(alg);
            let sig = scheme.sign(&msg, kp).unwrap();
            prop_assert!(scheme.verify(&msg, &sig, kp));

            let mut longer = msg.clone();
            longer.push(0);
            prop_assert!(!scheme.verify(&longer, &sig, kp));
        }
    }
}
