//! MGF1 mask generation (RFC 8017, appendix B.2.1)

use crate::error::{Error, Result};
use crate::hash::HashFunction;

/// Produce `mask_len` bytes of mask from `seed` by hashing `seed || counter`
/// for a big-endian 32-bit counter starting at zero.
pub fn mgf1<H: HashFunction>(seed: &[u8], mask_len: usize) -> Result<Vec<u8>> {
    let h_len = H::output_size();
    let blocks = mask_len.div_ceil(h_len);
    if blocks as u64 > u32::MAX as u64 + 1 {
        return Err(Error::param("mask_len", "mask too long"));
    }

    let mut mask = Vec::with_capacity(blocks * h_len);
    for counter in 0..blocks as u64 {
        let mut hasher = H::new();
        hasher.update(seed)?;
        hasher.update(&(counter as u32).to_be_bytes())?;
        mask.extend_from_slice(hasher.finalize()?.as_ref());
    }
    mask.truncate(mask_len);
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256;

    #[test]
    fn test_mgf1_lengths() {
        assert!(mgf1::<Sha256>(b"seed", 0).unwrap().is_empty());
        assert_eq!(mgf1::<Sha256>(b"seed", 5).unwrap().len(), 5);
        assert_eq!(mgf1::<Sha256>(b"seed", 95).unwrap().len(), 95);
    }

    #[test]
    fn test_mgf1_blocks_are_counter_hashes() {
        let mask = mgf1::<Sha256>(b"seed", 64).unwrap();
        let first = Sha256::digest(b"seed\x00\x00\x00\x00").unwrap();
        let second = Sha256::digest(b"seed\x00\x00\x00\x01").unwrap();
        assert_eq!(&mask[..32], &first[..]);
        assert_eq!(&mask[32..], &second[..]);
    }

    #[test]
    fn test_mgf1_prefix_stable() {
        let short = mgf1::<Sha256>(b"abc", 10).unwrap();
        let long = mgf1::<Sha256>(b"abc", 100).unwrap();
        assert_eq!(&long[..10], &short[..]);
    }
}
