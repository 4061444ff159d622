//! EMSA-PSS encoding and verification (RFC 8017, section 9.1)
//!
//! Both directions take the message digest `m_hash` rather than the message.
//! Verification recovers the salt from the position of the `0x01` separator,
//! so signatures made with any salt length that fits are accepted.

use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_algorithms::bigint::byte_len;
use dsig_algorithms::mgf1;
use dsig_api::{Error, Result};
use dsig_internal::ct_eq;
use dsig_params::traditional::rsa::RSA_PSS_TRAILER;
use tracing::debug;

const CONTEXT: &str = "EMSA-PSS";

/// Byte length of an encoded message with `em_bits` significant bits.
pub fn em_len(em_bits: usize) -> usize {
    byte_len(em_bits)
}

/// Largest salt that fits: `emLen - hLen - 2`, clamped at zero.
pub fn max_salt_len(em_bits: usize) -> usize {
    em_len(em_bits).saturating_sub(Sha256::output_size() + 2)
}

/// `H(0x00 * 8 || m_hash || salt)`
fn m_prime_hash(m_hash: &[u8], salt: &[u8]) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(&[0u8; 8])?;
    hasher.update(m_hash)?;
    hasher.update(salt)?;
    Ok(hasher.finalize()?)
}

/// Encode `m_hash` with `salt` into `ceil(em_bits / 8)` bytes.
///
/// Steps per RFC 8017 9.1.1:
/// 1. `H = Hash(0^8 || mHash || salt)`
/// 2. `DB = PS || 0x01 || salt` with `PS` all zero
/// 3. `maskedDB = DB xor MGF1(H, emLen - hLen - 1)`, top `8*emLen - emBits` bits cleared
/// 4. `EM = maskedDB || H || 0xBC`
pub fn encode(m_hash: &[u8], salt: &[u8], em_bits: usize) -> Result<Vec<u8>> {
    let h_len = Sha256::output_size();
    let em_len = em_len(em_bits);

    if m_hash.len() != h_len {
        return Err(Error::InvalidParameter {
            context: CONTEXT,
            message: format!("digest must be {} bytes, got {}", h_len, m_hash.len()),
        });
    }
    if em_len < h_len + salt.len() + 2 {
        return Err(Error::InvalidParameter {
            context: CONTEXT,
            message: "modulus too short for digest and salt".to_string(),
        });
    }

    let h = m_prime_hash(m_hash, salt)?;

    let db_len = em_len - h_len - 1;
    let ps_len = db_len - salt.len() - 1;
    let mut db = vec![0u8; db_len];
    db[ps_len] = 0x01;
    db[ps_len + 1..].copy_from_slice(salt);

    let mask = mgf1::<Sha256>(&h, db_len)?;
    for (d, m) in db.iter_mut().zip(mask.iter()) {
        *d ^= m;
    }
    db[0] &= top_byte_mask(em_len, em_bits);

    let mut em = db;
    em.extend_from_slice(&h);
    em.push(RSA_PSS_TRAILER);
    Ok(em)
}

/// Check `em` against `m_hash`, returning the recovered salt.
///
/// Any structural problem or hash mismatch is an `InvalidSignature` error.
pub fn verify(m_hash: &[u8], em: &[u8], em_bits: usize) -> Result<Vec<u8>> {
    let h_len = Sha256::output_size();
    let em_len = em_len(em_bits);

    if m_hash.len() != h_len || em.len() != em_len || em_len < h_len + 2 {
        return Err(reject("inconsistent encoded message length"));
    }
    if em[em_len - 1] != RSA_PSS_TRAILER {
        return Err(reject("trailer byte is not 0xBC"));
    }

    let db_len = em_len - h_len - 1;
    let (masked_db, rest) = em.split_at(db_len);
    let h = &rest[..h_len];

    let top_mask = top_byte_mask(em_len, em_bits);
    if masked_db[0] & !top_mask != 0 {
        return Err(reject("leftmost bits of maskedDB are not zero"));
    }

    let mask = mgf1::<Sha256>(h, db_len)?;
    let mut db: Vec<u8> = masked_db.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect();
    db[0] &= top_mask;

    // PS is all zero up to the 0x01 separator
    let separator = match db.iter().position(|&b| b != 0) {
        Some(idx) if db[idx] == 0x01 => idx,
        Some(_) => return Err(reject("padding string is not followed by 0x01")),
        None => return Err(reject("no 0x01 separator in DB")),
    };
    let salt = db[separator + 1..].to_vec();

    let h_prime = m_prime_hash(m_hash, &salt)?;
    if !ct_eq(h, h_prime) {
        return Err(reject("hash mismatch"));
    }
    Ok(salt)
}

fn top_byte_mask(em_len: usize, em_bits: usize) -> u8 {
    0xffu8 >> (8 * em_len - em_bits)
}

fn reject(message: &'static str) -> Error {
    debug!(reason = message, "PSS verification rejected");
    Error::invalid_signature(CONTEXT, message)
}
