//! Integration tests for the signature engine

use dsig::prelude::*;
use dsig_algorithms::bigint::mod_exp;
use dsig_algorithms::ec::k256 as ec;
use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_sign::traditional::dsa::DsaSignature;
use dsig_sign::traditional::ecdsa::{EcdsaSecretKey, EcdsaSignature};
use dsig_sign::traditional::rsa::RsaSignature;
use dsig_tests::{keys, seeded_rng, small_config, vectors, REGISTRY};
use num_bigint_dig::BigUint;
use num_traits::One;

#[test]
fn test_sha256_vectors() {
    assert_eq!(
        hex::encode(Sha256::digest(b"").unwrap()),
        vectors::sha256::EMPTY
    );
    assert_eq!(
        hex::encode(Sha256::digest(b"abc").unwrap()),
        vectors::sha256::ABC
    );
}

#[test]
fn test_hello_scenario() {
    let scheme = SignatureScheme::from_name("ECDSA").unwrap();
    let keys = scheme.generate_keys_with_rng(&mut seeded_rng(1)).unwrap();
    let signature = scheme.sign(vectors::HELLO, &keys).unwrap();

    assert!(scheme.verify(vectors::HELLO, &signature, &keys));
    assert!(!scheme.verify(vectors::HELLO_TAMPERED, &signature, &keys));
}

#[test]
fn test_satoshi_vector() {
    let mut d = [0u8; 32];
    d[31] = 1;
    let secret = EcdsaSecretKey::from_bytes(&d).unwrap();
    let ecdsa = Ecdsa::default();

    let sig = ecdsa.sign(vectors::satoshi::MESSAGE, &secret).unwrap();
    assert_eq!(sig.r_hex(), vectors::satoshi::R);
    assert_eq!(sig.s_hex(), vectors::satoshi::S);
    assert_eq!(hex::encode(&sig.der), vectors::satoshi::DER);

    let der = hex::decode(vectors::satoshi::DER).unwrap();
    let public = secret.public_key().unwrap();
    assert!(ecdsa
        .verify_der(vectors::satoshi::MESSAGE, &der, &public)
        .is_ok());
}

#[test]
fn test_round_trip_every_algorithm() {
    for alg in Algorithm::ALL {
        let scheme = REGISTRY.get_algorithm(alg);
        let kp = keys(alg);
        for msg in [&b""[..], &b"x"[..], &[0xA5u8; 1000][..]] {
            let sig = scheme.sign(msg, kp).unwrap();
            assert!(scheme.verify(msg, &sig, kp), "{} failed on {} bytes", alg, msg.len());
        }
    }
}

#[test]
fn test_tampered_message_rejected() {
    for alg in Algorithm::ALL {
        let scheme = REGISTRY.get_algorithm(alg);
        let kp = keys(alg);
        let message = b"transfer 10 coins to alice".to_vec();
        let sig = scheme.sign(&message, kp).unwrap();

        for i in [0, message.len() / 2, message.len() - 1] {
            let mut tampered = message.clone();
            tampered[i] ^= 0x01;
            assert!(!scheme.verify(&tampered, &sig, kp), "{} byte {}", alg, i);
        }
    }
}

#[test]
fn test_wrong_key_rejected() {
    let mut rng = seeded_rng(2);
    for alg in Algorithm::ALL {
        let scheme = REGISTRY.get_algorithm(alg);
        let other = scheme.generate_keys_with_rng(&mut rng).unwrap();
        let sig = scheme.sign("owner", keys(alg)).unwrap();
        assert!(!scheme.verify("owner", &sig, &other), "{}", alg);
    }
}

#[test]
fn test_signature_from_other_algorithm_rejected() {
    let ecdsa_sig = REGISTRY
        .get_algorithm(Algorithm::Ecdsa)
        .sign("mixed", keys(Algorithm::Ecdsa))
        .unwrap();
    for alg in [Algorithm::Rsa, Algorithm::Dsa] {
        assert!(!REGISTRY
            .get_algorithm(alg)
            .verify("mixed", &ecdsa_sig, keys(alg)));
    }
}

#[test]
fn test_dsa_r_plus_one_rejected() {
    let dsa = REGISTRY.get_algorithm(Algorithm::Dsa);
    let kp = keys(Algorithm::Dsa);
    let KeyPair::Dsa(dsa_kp) = kp else {
        panic!("expected a DSA key pair");
    };
    let q = dsa_kp.public.params().q();

    let SignatureResult::Dsa(sig) = dsa.sign("r+1", kp).unwrap() else {
        panic!("expected a DSA signature");
    };
    let bumped = SignatureResult::Dsa(DsaSignature {
        r: (&sig.r + BigUint::one()) % q,
        ..sig.clone()
    });
    assert!(!dsa.verify("r+1", &bumped, kp));

    let bumped = SignatureResult::Dsa(DsaSignature {
        s: (&sig.s + BigUint::one()) % q,
        ..sig
    });
    assert!(!dsa.verify("r+1", &bumped, kp));
}

#[test]
fn test_out_of_range_components_rejected() {
    let ecdsa = REGISTRY.get_algorithm(Algorithm::Ecdsa);
    let kp = keys(Algorithm::Ecdsa);
    let n = ec::curve_order();
    for (r, s) in [
        (BigUint::from(0u32), BigUint::one()),
        (BigUint::one(), BigUint::from(0u32)),
        (n.clone(), BigUint::one()),
        (BigUint::one(), n + BigUint::one()),
    ] {
        let sig = SignatureResult::Ecdsa(EcdsaSignature::from_components(r, s));
        assert!(!ecdsa.verify("range", &sig, kp));
    }

    let rsa = REGISTRY.get_algorithm(Algorithm::Rsa);
    let rsa_kp = keys(Algorithm::Rsa);
    let KeyPair::Rsa(inner) = rsa_kp else {
        panic!("expected an RSA key pair");
    };
    let sig = SignatureResult::Rsa(RsaSignature {
        value: inner.public.n() + BigUint::one(),
        salt: Vec::new(),
        digest: Vec::new(),
    });
    assert!(!rsa.verify("range", &sig, rsa_kp));
}

#[test]
fn test_determinism() {
    for alg in [Algorithm::Dsa, Algorithm::Ecdsa] {
        let scheme = REGISTRY.get_algorithm(alg);
        let a = scheme.sign("same input", keys(alg)).unwrap();
        let b = scheme.sign("same input", keys(alg)).unwrap();
        assert_eq!(a, b, "{} should be deterministic", alg);
        let c = scheme.sign("other input", keys(alg)).unwrap();
        assert_ne!(a, c);
    }

    // PSS salts are random, both signatures still verify
    let rsa = REGISTRY.get_algorithm(Algorithm::Rsa);
    let kp = keys(Algorithm::Rsa);
    let a = rsa.sign("same input", kp).unwrap();
    let b = rsa.sign("same input", kp).unwrap();
    assert_ne!(a, b);
    assert!(rsa.verify("same input", &a, kp));
    assert!(rsa.verify("same input", &b, kp));
}

#[test]
fn test_key_consistency() {
    match keys(Algorithm::Rsa) {
        KeyPair::Rsa(kp) => {
            let (p, q) = kp.secret.primes();
            assert_eq!(&(p * q), kp.public.n());
            assert_ne!(p, q);
            assert!((kp.public.e() * kp.secret.d() % kp.secret.phi()).is_one());
            assert_eq!(kp.public.modulus_bits(), 1024);
        }
        _ => panic!("expected an RSA key pair"),
    }

    match keys(Algorithm::Dsa) {
        KeyPair::Dsa(kp) => {
            let params = kp.public.params();
            let y = mod_exp(params.g(), kp.secret.x(), params.p()).unwrap();
            assert_eq!(&y, kp.public.y());
            assert_eq!(params.bit_lengths(), (1024, 160));
            assert!(params.validate(20, &mut seeded_rng(3)).is_ok());
        }
        _ => panic!("expected a DSA key pair"),
    }

    match keys(Algorithm::Ecdsa) {
        KeyPair::Ecdsa(kp) => {
            let q = ec::base_point_g().mul(kp.secret.scalar()).unwrap();
            assert_eq!(kp.public.point(), &q);
            assert!(kp.public.validate().is_ok());
        }
        _ => panic!("expected an ECDSA key pair"),
    }
}

#[test]
fn test_cancel_token_stops_prime_search() {
    let token = CancelToken::new();
    token.cancel();
    for alg in [Algorithm::Rsa, Algorithm::Dsa] {
        let scheme = SignatureScheme::with_config(alg, &small_config())
            .unwrap()
            .with_cancel_token(token.clone());
        assert!(matches!(
            scheme.generate_keys_with_rng(&mut seeded_rng(4)),
            Err(Error::Cancelled { .. })
        ));
    }
}

#[test]
fn test_registry_by_name() {
    for name in ["rsa", "DSA", " Ecdsa "] {
        let scheme = REGISTRY.get(name).unwrap();
        assert_eq!(scheme.algorithm().as_str(), name.trim().to_uppercase());
    }
    assert!(matches!(
        REGISTRY.get("ed25519"),
        Err(Error::UnknownAlgorithm(_))
    ));
}
