//! Miller-Rabin primality testing and random prime sampling

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::trace;

use dsig_params::utils::limits::PRIME_CANDIDATES_PER_BIT;

use crate::bigint::{mod_exp, random_bits, random_in_range};
use crate::error::{Error, Result};

/// Primes below 256, used to discard most composites before Miller-Rabin.
const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Shared cancellation flag for long-running searches.
///
/// Clones observe the same flag. Prime searches poll it once per candidate.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every search holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Returns `Err(Cancelled)` if cancellation was requested.
    pub fn check(&self, operation: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled { operation });
        }
        Ok(())
    }
}

/// Probabilistic primality test.
///
/// `n <= 3` and even `n` are decided directly. Otherwise `n - 1 = 2^r * d`
/// and each of `rounds` random bases `a` in `[2, n - 2]` must either give
/// `a^d = ±1` or reach `n - 1` within `r - 1` squarings.
pub fn is_probable_prime<R>(n: &BigUint, rounds: usize, rng: &mut R) -> Result<bool>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if rounds == 0 {
        return Err(Error::param("rounds", "at least one round is required"));
    }

    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if n < &two {
        return Ok(false);
    }
    if n <= &three {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }

    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return Ok(true);
        }
        if (n % &p).is_zero() {
            return Ok(false);
        }
    }

    let n_minus_one = n - BigUint::one();
    let n_minus_two = n - &two;
    let mut d = n_minus_one.clone();
    let mut r = 0usize;
    while d.is_even() {
        d >>= 1usize;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = random_in_range(&two, &n_minus_two, rng)?;
        let mut x = mod_exp(&a, &d, n)?;
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = mod_exp(&x, &two, n)?;
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return Ok(false);
            }
        }
        return Ok(false);
    }

    Ok(true)
}

/// Random candidate of exactly `bits` bits with the two top bits and the
/// low bit set.
///
/// Setting both top bits makes the product of two such numbers exactly
/// `2 * bits` long.
fn prime_candidate<R>(bits: usize, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    let top = BigUint::from(3u32) << (bits - 2);
    random_bits(bits, rng) | top | BigUint::one()
}

/// Sample a random probable prime of exactly `bits` bits.
///
/// Odd candidates with the two top bits set are drawn until one passes
/// [`is_probable_prime`] with `rounds` rounds. The optional token is checked
/// before every candidate.
pub fn random_prime<R>(
    bits: usize,
    rounds: usize,
    rng: &mut R,
    cancel: Option<&CancelToken>,
) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bits < 3 {
        return Err(Error::param("bits", "prime size must be at least 3 bits"));
    }

    let budget = bits.saturating_mul(PRIME_CANDIDATES_PER_BIT);
    for attempt in 1..=budget {
        if let Some(token) = cancel {
            token.check("prime search")?;
        }
        let candidate = prime_candidate(bits, rng);
        if is_probable_prime(&candidate, rounds, rng)? {
            trace!(bits, candidates = attempt, "prime found");
            return Ok(candidate);
        }
    }

    Err(Error::Exhausted {
        operation: "prime search",
        attempts: budget,
    })
}
