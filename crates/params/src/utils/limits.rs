//! Retry budgets and cache capacities

/// Attempts at drawing a fresh RSA prime pair before key generation gives up
pub const KEYGEN_RETRY_BUDGET: usize = 16;

/// Candidates examined per requested prime bit before the search gives up.
///
/// The expected number of candidates is about `ln(2^bits) / 2`, so this
/// budget is never reached by a working random source.
pub const PRIME_CANDIDATES_PER_BIT: usize = 64;

/// Nonce redraws (`r = 0`, `s = 0`, registry collision) before signing fails
pub const SIGN_RETRY_BUDGET: usize = 64;

/// Entries kept by each scheme's nonce registry
pub const NONCE_REGISTRY_CAPACITY: usize = 4096;

/// Entries kept by each scheme's modular-inverse memo
pub const MOD_CACHE_CAPACITY: usize = 1024;

/// Smallest RSA modulus / DSA prime accepted by runtime configuration
pub const MIN_MODULUS_BITS: usize = 512;
