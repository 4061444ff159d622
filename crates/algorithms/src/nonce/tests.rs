use super::*;
use dsig_params::traditional::ecdsa::SECP256K1_N;

fn hex_int(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
}

#[test]
fn test_secp256k1_vector() {
    let n = BigUint::from_bytes_be(&SECP256K1_N);
    let gen = Rfc6979::<Sha256>::new(&n).unwrap();
    let h1 = Sha256::digest(b"Satoshi Nakamoto").unwrap();
    let k = gen.generate_k(&BigUint::one(), &h1).unwrap();
    assert_eq!(
        k,
        hex_int("8F8A276C19F4149656B280621E358CCE24F5F52542772691EE69063B74F15D15")
    );
}

#[test]
fn test_p256_sample_vector() {
    // RFC 6979 A.2.5, SHA-256, message "sample"
    let q = hex_int("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551");
    let x = hex_int("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");
    let gen = Rfc6979::<Sha256>::new(&q).unwrap();
    let h1 = Sha256::digest(b"sample").unwrap();
    assert_eq!(
        gen.generate_k(&x, &h1).unwrap(),
        hex_int("A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60")
    );
}

#[test]
fn test_short_order_vector() {
    // RFC 6979 A.1.2: 163-bit q, digest longer than q
    let q = hex_int("4000000000000000000020108A2E0CC0D99F8A5EF");
    let x = hex_int("09A4D6792295A7F730FC3F2B49CBC0F62E862272F");
    let gen = Rfc6979::<Sha256>::new(&q).unwrap();
    let h1 = Sha256::digest(b"sample").unwrap();
    assert_eq!(
        gen.generate_k(&x, &h1).unwrap(),
        hex_int("023AF4074C90A02B3FE61D286D5C87F425E6BDD81B")
    );
}

#[test]
fn test_deterministic_and_input_sensitive() {
    let n = BigUint::from_bytes_be(&SECP256K1_N);
    let gen = Rfc6979::<Sha256>::new(&n).unwrap();
    let x = hex_int("1234567890abcdef");
    let h1 = Sha256::digest(b"message").unwrap();
    let h2 = Sha256::digest(b"message!").unwrap();

    let k1 = gen.generate_k(&x, &h1).unwrap();
    assert_eq!(k1, gen.generate_k(&x, &h1).unwrap());
    assert_ne!(k1, gen.generate_k(&x, &h2).unwrap());
    assert_ne!(k1, gen.generate_k(&(&x + 1u32), &h1).unwrap());
}

#[test]
fn test_stream_yields_fresh_candidates() {
    let q = hex_int("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551");
    let gen = Rfc6979::<Sha256>::new(&q).unwrap();
    let h1 = Sha256::digest(b"sample").unwrap();
    let x = BigUint::from(42u32);

    let mut stream = gen.stream(&x, &h1).unwrap();
    let first = stream.next_k().unwrap();
    let second = stream.next_k().unwrap();
    let third = stream.next_k().unwrap();
    assert_eq!(first, gen.generate_k(&x, &h1).unwrap());
    assert_ne!(first, second);
    assert_ne!(second, third);
    for k in [first, second, third] {
        assert!(!k.is_zero() && k < q);
    }
}

#[test]
fn test_small_order_stays_in_range() {
    // a tiny q forces many out-of-range candidates
    let q = BigUint::from(11u32);
    let gen = Rfc6979::<Sha256>::new(&q).unwrap();
    let mut stream = gen.stream(&BigUint::from(3u32), b"digest").unwrap();
    for _ in 0..32 {
        let k = stream.next_k().unwrap();
        assert!(!k.is_zero() && k < q);
    }
}

#[test]
fn test_rejects_bad_inputs() {
    assert!(Rfc6979::<Sha256>::new(&BigUint::one()).is_err());
    let gen = Rfc6979::<Sha256>::new(&BigUint::from(11u32)).unwrap();
    assert!(gen.generate_k(&BigUint::zero(), b"h").is_err());
    assert!(gen.generate_k(&BigUint::from(11u32), b"h").is_err());
}

#[test]
fn test_octet_helpers() {
    let gen = Rfc6979::<Sha256>::new(&hex_int("4000000000000000000020108A2E0CC0D99F8A5EF")).unwrap();
    // rlen = ceil(163 / 8) = 21
    assert_eq!(gen.int2octets(&BigUint::one()).unwrap().len(), 21);
    let octets = gen.bits2octets(&[0xff; 32]).unwrap();
    assert_eq!(octets.len(), 21);
    assert!(BigUint::from_bytes_be(&octets) < *gen.order());
}

#[test]
fn test_registry_allows_rederivation() {
    let registry = NonceRegistry::new(16);
    let k = BigUint::from(7u32);
    let x = BigUint::from(5u32);
    assert!(registry.claim(&k, &x, b"digest").unwrap());
    assert!(registry.claim(&k, &x, b"digest").unwrap());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_refuses_reuse() {
    let registry = NonceRegistry::default();
    let k = BigUint::from(7u32);
    assert!(registry.claim(&k, &BigUint::from(5u32), b"one").unwrap());
    assert!(!registry.claim(&k, &BigUint::from(5u32), b"two").unwrap());
    assert!(!registry.claim(&k, &BigUint::from(6u32), b"one").unwrap());
    assert!(registry.claim(&BigUint::from(8u32), &BigUint::from(5u32), b"two").unwrap());
}
