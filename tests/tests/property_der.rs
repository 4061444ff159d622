//! Property-based tests for the DER framing of ECDSA signatures

use dsig_sign::traditional::ecdsa::SignatureComponents;
use num_bigint_dig::BigUint;
use proptest::prelude::*;

/// Integers up to 256 bits, zero and leading-zero values included
fn component() -> impl Strategy<Value = BigUint> {
    any::<[u8; 32]>().prop_map(|bytes| BigUint::from_bytes_be(&bytes))
}

/// A valid encoding to mutate
fn valid_der() -> impl Strategy<Value = Vec<u8>> {
    (component(), component()).prop_map(|(r, s)| SignatureComponents::new(r, s).to_der())
}

proptest! {
    #[test]
    fn der_roundtrip(r in component(), s in component()) {
        let components = SignatureComponents::new(r, s);
        let der = components.to_der();

        prop_assert_eq!(der[0], 0x30);
        prop_assert_eq!(der[1] as usize, der.len() - 2);
        prop_assert_eq!(SignatureComponents::from_der(&der).unwrap(), components);
    }

    #[test]
    fn high_bit_gets_zero_pad(rest in any::<[u8; 31]>(), s in component()) {
        let mut bytes = vec![0xFF];
        bytes.extend_from_slice(&rest);
        let r = BigUint::from_bytes_be(&bytes);

        let der = SignatureComponents::new(r.clone(), s).to_der();
        // SEQUENCE header, then INTEGER r with 33 content octets
        prop_assert_eq!(&der[2..6], &[0x02, 33, 0x00, 0xFF][..]);
        prop_assert_eq!(SignatureComponents::from_der(&der).unwrap().r, r);
    }

    #[test]
    fn natural_leading_zeros_are_dropped(width in 1usize..=32, bytes in any::<[u8; 32]>(), s in component()) {
        let mut value = bytes[..width].to_vec();
        value[0] = (value[0] & 0x7f) | 0x01;
        let r = BigUint::from_bytes_be(&value);

        let der = SignatureComponents::new(r.clone(), s).to_der();
        prop_assert_eq!(der[3] as usize, width);
        prop_assert_eq!(&der[4..4 + width], &value[..]);
        prop_assert_eq!(SignatureComponents::from_der(&der).unwrap().r, r);
    }

    #[test]
    fn truncation_rejected(der in valid_der(), cut in 1usize..8) {
        let truncated = &der[..der.len() - cut];
        prop_assert!(SignatureComponents::from_der(truncated).is_err());
    }

    #[test]
    fn trailing_bytes_rejected(der in valid_der(), extra in prop::collection::vec(any::<u8>(), 1..4)) {
        let mut extended = der;
        extended.extend_from_slice(&extra);
        prop_assert!(SignatureComponents::from_der(&extended).is_err());
    }

    #[test]
    fn mutated_encoding_is_rejected_or_canonical(der in valid_der(), index in any::<prop::sample::Index>(), flip in 1u8..=255) {
        let mut mutated = der;
        let i = index.index(mutated.len());
        mutated[i] ^= flip;

        // Strict parsing admits one encoding per value
        if let Ok(parsed) = SignatureComponents::from_der(&mutated) {
            prop_assert_eq!(parsed.to_der(), mutated);
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..80)) {
        if let Ok(parsed) = SignatureComponents::from_der(&bytes) {
            prop_assert_eq!(parsed.to_der(), bytes);
        }
    }
}
