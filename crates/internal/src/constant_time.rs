//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Slices of different length compare unequal; the length itself is public.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Compare two big-endian integer encodings in constant time
///
/// Both inputs are left-padded with zeros to `width` bytes before the
/// comparison, so minimal encodings of the same value (as produced by
/// big-integer serializers) compare equal and the running time depends only
/// on `width`. Inputs longer than `width` compare unequal.
pub fn ct_eq_padded(a: &[u8], b: &[u8], width: usize) -> bool {
    if a.len() > width || b.len() > width {
        return false;
    }

    let mut pa = vec![0u8; width];
    let mut pb = vec![0u8; width];
    pa[width - a.len()..].copy_from_slice(a);
    pb[width - b.len()..].copy_from_slice(b);

    pa.ct_eq(&pb).into()
}
