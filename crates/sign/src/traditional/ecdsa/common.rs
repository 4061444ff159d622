//! DER framing of ECDSA signatures
//!
//! `SEQUENCE { INTEGER r, INTEGER s }` with minimal, non-negative INTEGER
//! encodings. Parsing is strict: trailing bytes, non-minimal lengths,
//! negative or zero-padded integers are all rejected.

use dsig_api::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::Zero;
use tracing::debug;

const TAG_SEQUENCE: u8 = 0x30;
const TAG_INTEGER: u8 = 0x02;
const CONTEXT: &str = "ECDSA DER parsing";

/// ECDSA signature components (r, s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureComponents {
    pub r: BigUint,
    pub s: BigUint,
}

impl SignatureComponents {
    /// Pair of integers to frame.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Serialize signature to DER format
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r);
        let s = encode_integer(&self.s);

        let mut body = Vec::with_capacity(r.len() + s.len() + 8);
        push_tlv(&mut body, TAG_INTEGER, &r);
        push_tlv(&mut body, TAG_INTEGER, &s);

        let mut der = Vec::with_capacity(body.len() + 4);
        push_tlv(&mut der, TAG_SEQUENCE, &body);
        der
    }

    /// Parse signature from DER format
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (body, rest) = read_tlv(der, TAG_SEQUENCE)?;
        if !rest.is_empty() {
            return Err(reject("trailing bytes after SEQUENCE"));
        }

        let (r, body) = read_tlv(body, TAG_INTEGER)?;
        let (s, body) = read_tlv(body, TAG_INTEGER)?;
        if !body.is_empty() {
            return Err(reject("trailing bytes inside SEQUENCE"));
        }

        Ok(Self {
            r: decode_integer(r)?,
            s: decode_integer(s)?,
        })
    }
}

/// Minimal two's-complement content octets of a non-negative integer:
/// a zero byte is prepended when the top bit is set.
fn encode_integer(x: &BigUint) -> Vec<u8> {
    let bytes = if x.is_zero() {
        vec![0u8]
    } else {
        x.to_bytes_be()
    };
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0x00);
        padded.extend_from_slice(&bytes);
        padded
    } else {
        bytes
    }
}

fn decode_integer(content: &[u8]) -> Result<BigUint> {
    match content {
        [] => Err(reject("empty INTEGER")),
        [first, ..] if first & 0x80 != 0 => Err(reject("negative INTEGER")),
        [0x00, second, ..] if second & 0x80 == 0 => Err(reject("non-minimal INTEGER padding")),
        _ => Ok(BigUint::from_bytes_be(content)),
    }
}

fn push_tlv(out: &mut Vec<u8>, tag: u8, content: &[u8]) {
    out.push(tag);
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let len_bytes: Vec<u8> = len
            .to_be_bytes()
            .iter()
            .copied()
            .skip_while(|&b| b == 0)
            .collect();
        out.push(0x80 | len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(content);
}

/// Split `input` into the content of one `tag` element and what follows.
fn read_tlv(input: &[u8], tag: u8) -> Result<(&[u8], &[u8])> {
    let (&found, rest) = input.split_first().ok_or_else(|| reject("truncated input"))?;
    if found != tag {
        return Err(reject("unexpected tag"));
    }

    let (&first, mut rest) = rest.split_first().ok_or_else(|| reject("missing length"))?;
    let len = if first < 0x80 {
        first as usize
    } else {
        let count = (first & 0x7f) as usize;
        if count == 0 || count > core::mem::size_of::<usize>() || rest.len() < count {
            return Err(reject("bad long-form length"));
        }
        let (len_bytes, after) = rest.split_at(count);
        rest = after;
        if len_bytes[0] == 0 {
            return Err(reject("non-minimal length"));
        }
        let len = len_bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        if len < 0x80 {
            return Err(reject("long form used for short length"));
        }
        len
    };

    if rest.len() < len {
        return Err(reject("length exceeds input"));
    }
    Ok(rest.split_at(len))
}

fn reject(message: &'static str) -> Error {
    debug!(reason = message, "DER signature rejected");
    Error::invalid_format(CONTEXT, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(r: &[u8], s: &[u8]) -> SignatureComponents {
        SignatureComponents::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s))
    }

    #[test]
    fn test_der_encoding() {
        let sig = components(&[0x01, 0x23, 0x45, 0x67], &[0x09, 0xAB, 0xCD, 0xEF]);
        let der = sig.to_der();
        assert_eq!(
            der,
            [0x30, 0x0c, 0x02, 0x04, 0x01, 0x23, 0x45, 0x67, 0x02, 0x04, 0x09, 0xAB, 0xCD, 0xEF]
        );
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_with_high_bit() {
        let sig = components(&[0xFF, 0x23, 0x45, 0x67], &[0x79, 0xAB, 0xCD, 0xEF]);
        let der = sig.to_der();

        // r gains a leading zero, s does not
        assert_eq!(der[3], 5);
        assert_eq!(der[4], 0x00);
        assert_eq!(der[5], 0xFF);
        assert_eq!(der[10], 4);
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_natural_leading_zero() {
        // 32-byte values whose first byte is zero shrink to 31 content bytes
        let mut r = [0x11u8; 32];
        r[0] = 0x00;
        let mut s = [0x80u8; 32];
        s[0] = 0x00;
        let sig = components(&r, &s);
        let der = sig.to_der();

        assert_eq!(der[3], 31);
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_full_width() {
        let sig = components(&[0xFF; 32], &[0x80; 32]);
        let der = sig.to_der();
        assert_eq!(der.len(), 2 + 2 * (2 + 33));
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_long_form_length() {
        let sig = components(&[0x7F; 70], &[0x7F; 70]);
        let der = sig.to_der();
        assert_eq!(&der[..3], &[0x30, 0x81, 144]);
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_zero_component() {
        let sig = components(&[], &[0x01]);
        let der = sig.to_der();
        assert_eq!(&der[2..5], &[0x02, 0x01, 0x00]);
        assert_eq!(SignatureComponents::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_der_rejects_malformed() {
        let good = components(&[0x01], &[0x02]).to_der();

        // wrong outer tag
        let mut bad = good.clone();
        bad[0] = 0x31;
        assert!(SignatureComponents::from_der(&bad).is_err());

        // trailing garbage
        let mut bad = good.clone();
        bad.push(0x00);
        assert!(SignatureComponents::from_der(&bad).is_err());

        // truncated
        assert!(SignatureComponents::from_der(&good[..good.len() - 1]).is_err());
        assert!(SignatureComponents::from_der(&[]).is_err());

        // negative r
        assert!(SignatureComponents::from_der(&[0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01])
            .is_err());

        // zero-padded r without need
        assert!(SignatureComponents::from_der(&[
            0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01
        ])
        .is_err());

        // empty INTEGER
        assert!(SignatureComponents::from_der(&[0x30, 0x05, 0x02, 0x00, 0x02, 0x01, 0x01]).is_err());

        // missing s
        assert!(SignatureComponents::from_der(&[0x30, 0x03, 0x02, 0x01, 0x01]).is_err());

        // long form for a short length
        assert!(SignatureComponents::from_der(&[
            0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01
        ])
        .is_err());
    }

    #[test]
    fn test_der_errors_are_format_errors() {
        assert!(matches!(
            SignatureComponents::from_der(&[0x02]),
            Err(Error::InvalidSignatureFormat { .. })
        ));
    }
}
