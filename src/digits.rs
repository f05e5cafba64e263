use crate::error::{LychrelError, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Reverse the decimal digits of `n`.
///
/// Digits are extracted least-significant-first by repeated div/mod 10
/// and reassembled, so leading zeros introduced by the reversal drop
/// out exactly as they do for ordinary integers: `reverse(120) == 21`.
/// This makes the operation non-involutive for values with trailing
/// zeros (`reverse(reverse(120)) == 12`).
pub fn reverse_number(n: &BigUint) -> BigUint {
    let ten = BigUint::from(10u32);
    let mut rev = BigUint::zero();
    let mut rest = n.clone();

    while !rest.is_zero() {
        rev = rev * &ten + &rest % &ten;
        rest /= &ten;
    }

    rev
}

/// True iff the decimal digit sequence of `n` reads the same backwards.
pub fn is_palindrome(n: &BigUint) -> bool {
    reverse_number(n) == *n
}

/// Parse a seed from text, rejecting anything that is not a
/// non-negative decimal integer (negative signs included).
pub fn parse_seed(s: &str) -> Result<BigUint> {
    s.trim()
        .parse::<BigUint>()
        .map_err(|_| LychrelError::InvalidSeed(s.trim().to_string()))
}
