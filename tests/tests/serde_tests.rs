//! JSON transport of configuration, public keys and signatures

use dsig::prelude::*;
use dsig_sign::traditional::dsa::DsaPublicKey;
use dsig_sign::traditional::ecdsa::EcdsaPublicKey;
use dsig_sign::traditional::rsa::RsaPublicKey;
use dsig_tests::{keys, small_config, REGISTRY};

#[test]
fn test_signature_survives_json() {
    for alg in Algorithm::ALL {
        let scheme = REGISTRY.get_algorithm(alg);
        let kp = keys(alg);
        let sig = scheme.sign("over the wire", kp).unwrap();

        let json = serde_json::to_string(&sig).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], alg.as_str());

        let back: SignatureResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
        assert!(scheme.verify("over the wire", &back, kp));
    }
}

#[test]
fn test_public_keys_survive_json() {
    match keys(Algorithm::Rsa) {
        KeyPair::Rsa(kp) => {
            let json = serde_json::to_string(&kp.public).unwrap();
            let back: RsaPublicKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kp.public);
        }
        _ => panic!("expected an RSA key pair"),
    }
    match keys(Algorithm::Dsa) {
        KeyPair::Dsa(kp) => {
            let json = serde_json::to_string(&kp.public).unwrap();
            let back: DsaPublicKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back.y(), kp.public.y());
            assert_eq!(back.params().as_ref(), kp.public.params().as_ref());
        }
        _ => panic!("expected a DSA key pair"),
    }
    match keys(Algorithm::Ecdsa) {
        KeyPair::Ecdsa(kp) => {
            let json = serde_json::to_string(&kp.public).unwrap();
            assert_eq!(json, format!("\"{}\"", hex::encode(kp.public.to_sec1())));
            let back: EcdsaPublicKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kp.public);
        }
        _ => panic!("expected an ECDSA key pair"),
    }
}

#[test]
fn test_off_curve_key_rejected_on_load() {
    let mut sec1 = vec![0x04];
    sec1.extend_from_slice(&[0x11; 64]);
    let json = format!("\"{}\"", hex::encode(sec1));
    assert!(serde_json::from_str::<EcdsaPublicKey>(&json).is_err());
}

#[test]
fn test_config_survives_json() {
    let config = small_config();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(AlgorithmRegistry::new(&back).is_ok());
}
