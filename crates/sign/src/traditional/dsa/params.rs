//! DSA domain parameters `(p, q, g)`

use core::fmt;

use dsig_algorithms::bigint::{mod_exp, random_in_range};
use dsig_algorithms::prime::{is_probable_prime, random_prime};
use dsig_algorithms::{CancelToken, Error as PrimitiveError};
use dsig_api::{Error, Result};
use dsig_params::utils::limits::PRIME_CANDIDATES_PER_BIT;
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DsaConfig;
use crate::encoding::to_hex;

const CONTEXT: &str = "DSA domain parameters";

/// Group description shared by every DSA key pair of a scheme instance
///
/// Invariants: `p` and `q` are prime, `q | p - 1`, `1 < g < p` and
/// `g^q = 1 mod p`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsaDomainParameters {
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    p: BigUint,
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    q: BigUint,
    #[cfg_attr(feature = "serde", serde(with = "crate::encoding::hex_biguint"))]
    g: BigUint,
}

impl DsaDomainParameters {
    /// Wrap existing values without checking them; see [`Self::validate`].
    pub fn from_parts(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    /// Generate fresh parameters of the configured sizes.
    ///
    /// 1. Sample a `q_bits` prime `q`
    /// 2. Draw even `N` with `p = N*q + 1` of exactly `p_bits` bits until `p`
    ///    is prime
    /// 3. `g = h^((p-1)/q) mod p` for the smallest `h >= 2` with `g > 1`
    pub fn generate<R>(config: &DsaConfig, rng: &mut R, cancel: Option<&CancelToken>) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        config.validate()?;

        let q = random_prime(config.q_bits, config.q_rounds, rng, cancel)
            .map_err(keygen_error)?;
        let (p, candidates) = Self::search_p(config, &q, rng, cancel)?;
        let g = Self::find_generator(&p, &q)?;

        info!(
            p_bits = config.p_bits,
            q_bits = config.q_bits,
            candidates,
            "DSA domain parameters generated"
        );
        Ok(Self { p, q, g })
    }

    fn search_p<R>(
        config: &DsaConfig,
        q: &BigUint,
        rng: &mut R,
        cancel: Option<&CancelToken>,
    ) -> Result<(BigUint, usize)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let one = BigUint::one();
        // p = N*q + 1 lies in [2^(L-1), 2^L - 1]
        let low = &one << (config.p_bits - 1);
        let high = (&one << config.p_bits) - &one;
        let n_min = (&low - &one + q - &one) / q;
        let n_max = (&high - &one) / q;

        let budget = config.p_bits.saturating_mul(PRIME_CANDIDATES_PER_BIT);
        for attempt in 1..=budget {
            if let Some(token) = cancel {
                token.check("DSA parameter search")?;
            }

            let mut n = random_in_range(&n_min, &n_max, rng)?;
            if n.is_odd() {
                n -= &one;
            }
            if n < n_min {
                continue;
            }

            let p = &n * q + &one;
            if p.bits() != config.p_bits {
                continue;
            }
            if is_probable_prime(&p, config.p_rounds, rng)? {
                return Ok((p, attempt));
            }
        }

        Err(Error::KeyGenerationFailed {
            algorithm: "DSA",
            details: format!("no prime p = Nq + 1 in {} candidates", budget),
        })
    }

    fn find_generator(p: &BigUint, q: &BigUint) -> Result<BigUint> {
        let one = BigUint::one();
        let exp = (p - &one) / q;
        let p_minus_1 = p - &one;

        let mut h = BigUint::from(2u32);
        while h < p_minus_1 {
            let g = mod_exp(&h, &exp, p)?;
            if g > one {
                return Ok(g);
            }
            debug!("generator candidate collapsed to 1, trying next h");
            h += &one;
        }

        Err(Error::KeyGenerationFailed {
            algorithm: "DSA",
            details: "no generator of the order-q subgroup".to_string(),
        })
    }

    /// Check every invariant, testing primality with `rounds` rounds.
    pub fn validate<R>(&self, rounds: usize, rng: &mut R) -> Result<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let one = BigUint::one();
        if self.q <= one || self.p <= self.q {
            return Err(invalid("q must satisfy 1 < q < p"));
        }
        if !(&self.p - &one).is_multiple_of(&self.q) {
            return Err(invalid("q does not divide p - 1"));
        }
        if self.g <= one || self.g >= self.p {
            return Err(invalid("g must satisfy 1 < g < p"));
        }
        if !mod_exp(&self.g, &self.q, &self.p)?.is_one() {
            return Err(invalid("g does not have order q"));
        }
        if !is_probable_prime(&self.q, rounds, rng)? {
            return Err(invalid("q is not prime"));
        }
        if !is_probable_prime(&self.p, rounds, rng)? {
            return Err(invalid("p is not prime"));
        }
        Ok(())
    }

    /// The prime modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The subgroup generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// `(bitlen(p), bitlen(q))`
    pub fn bit_lengths(&self) -> (usize, usize) {
        (self.p.bits(), self.q.bits())
    }
}

impl fmt::Display for DsaDomainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DSA-{}/{} {{ p: {}, q: {}, g: {} }}",
            self.p.bits(),
            self.q.bits(),
            to_hex(&self.p),
            to_hex(&self.q),
            to_hex(&self.g)
        )
    }
}

fn invalid(message: &'static str) -> Error {
    Error::InvalidParameter {
        context: CONTEXT,
        message: message.to_string(),
    }
}

pub(crate) fn keygen_error(err: PrimitiveError) -> Error {
    match err {
        PrimitiveError::Exhausted {
            operation,
            attempts,
        } => Error::KeyGenerationFailed {
            algorithm: "DSA",
            details: format!("{} gave up after {} candidates", operation, attempts),
        },
        other => other.into(),
    }
}
