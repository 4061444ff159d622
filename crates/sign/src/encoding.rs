//! Hexadecimal encodings of big integers for display and serialization

use dsig_algorithms::bigint::to_fixed_be;
use dsig_api::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::Zero;

/// Minimal-width lowercase hex (zero encodes as "00").
pub fn to_hex(x: &BigUint) -> String {
    if x.is_zero() {
        return "00".to_string();
    }
    hex::encode(x.to_bytes_be())
}

/// Fixed-width lowercase hex of exactly `2 * width` characters.
pub fn to_hex_fixed(x: &BigUint, width: usize) -> Result<String> {
    Ok(hex::encode(to_fixed_be(x, width)?))
}

/// Parse big-endian hex, accepting an optional `0x` prefix.
pub fn from_hex(s: &str) -> Result<BigUint> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Err(Error::InvalidParameter {
            context: "hex decoding",
            message: "empty string".to_string(),
        });
    }
    let padded;
    let s = if s.len() % 2 == 1 {
        padded = format!("0{}", s);
        padded.as_str()
    } else {
        s
    };
    let bytes = hex::decode(s).map_err(|e| Error::InvalidParameter {
        context: "hex decoding",
        message: e.to_string(),
    })?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Serde adapter storing a `BigUint` as a hex string.
#[cfg(feature = "serde")]
pub mod hex_biguint {
    use num_bigint_dig::BigUint;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serialize as minimal-width hex.
    pub fn serialize<S: Serializer>(x: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(x))
    }

    /// Deserialize from hex.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::from_hex(&s).map_err(D::Error::custom)
    }
}

/// Serde adapter storing bytes as a hex string.
#[cfg(feature = "serde")]
pub mod hex_bytes {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serialize as lowercase hex.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    /// Deserialize from hex.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(D::Error::custom)
    }
}
