//! Prime table sizing.

/// Largest table size the sizing search will hand out.
pub const MAX_TABLE_SIZE: usize = 1 << 24;

#[inline(always)]
fn is_prime(n: usize) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut d = 5usize;
    while d * d <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Returns the smallest prime `p >= n`, or `None` if that prime would exceed
/// [`MAX_TABLE_SIZE`].
///
/// ```rust
/// # use probe_table::primes::next_prime_at_least;
/// assert_eq!(next_prime_at_least(5), Some(5));
/// assert_eq!(next_prime_at_least(8), Some(11));
/// ```
pub fn next_prime_at_least(n: usize) -> Option<usize> {
    (n.max(2)..=MAX_TABLE_SIZE).find(|&candidate| is_prime(candidate))
}
