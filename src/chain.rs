use crate::digits::{is_palindrome, reverse_number};
use crate::error::{LychrelError, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// How a reverse-and-add chain terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainStatus {
    /// A palindrome appeared at this step index (always >= 1).
    PalindromeFound(u32),
    /// No palindrome within the iteration bound; the seed is a Lychrel
    /// candidate in the heuristic sense only — exhausting a finite
    /// bound proves nothing about true non-convergence.
    Exhausted,
}

/// One seed's reverse-and-add chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub seed: BigUint,
    pub values: Vec<BigUint>,
    pub status: ChainStatus,
}

impl Chain {
    /// Step count reported for this chain: the success index for
    /// `PalindromeFound(k)`, the full bound for `Exhausted`.
    pub fn steps(&self) -> u32 {
        match self.status {
            ChainStatus::PalindromeFound(k) => k,
            ChainStatus::Exhausted => (self.values.len() - 1) as u32,
        }
    }
}

/// Generate the reverse-and-add chain for `seed`, capped at `bound`
/// steps.
///
/// `values[0]` is the seed itself and each successor is
/// `current + reverse(current)`. The palindrome test applies only to
/// successors, never to the seed: a seed that is already a palindrome
/// still takes at least one step, so the first reported success index
/// is always >= 1. The aggregators rely on that asymmetry.
///
/// The bound is the only cutoff — every chain terminates in at most
/// `bound` steps.
///
/// # Examples
///
/// ```
/// use lychrel_graph::{generate_chain, ChainStatus};
/// use num_bigint::BigUint;
///
/// let chain = generate_chain(&BigUint::from(56u32), 10).unwrap();
/// assert_eq!(chain.status, ChainStatus::PalindromeFound(1));
/// assert_eq!(chain.values, vec![BigUint::from(56u32), BigUint::from(121u32)]);
/// ```
pub fn generate_chain(seed: &BigUint, bound: u32) -> Result<Chain> {
    if bound == 0 {
        return Err(LychrelError::InvalidBound(bound));
    }
    Ok(generate_unchecked(seed, bound))
}

/// Chain generation after the bound has been validated. The range
/// aggregators validate once up front and then call this per seed.
pub(crate) fn generate_unchecked(seed: &BigUint, bound: u32) -> Chain {
    let mut values = Vec::with_capacity(bound as usize + 1);
    values.push(seed.clone());
    let mut current = seed.clone();

    for step in 1..=bound {
        let next = &current + reverse_number(&current);
        values.push(next.clone());

        if is_palindrome(&next) {
            return Chain {
                seed: seed.clone(),
                values,
                status: ChainStatus::PalindromeFound(step),
            };
        }

        current = next;
    }

    Chain {
        seed: seed.clone(),
        values,
        status: ChainStatus::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_89_reaches_palindrome_in_24_steps() {
        let chain = generate_chain(&BigUint::from(89u32), 30).unwrap();
        assert_eq!(chain.status, ChainStatus::PalindromeFound(24));
        assert_eq!(chain.values.len(), 25);
        assert_eq!(chain.steps(), 24);
        assert_eq!(
            *chain.values.last().unwrap(),
            "8813200023188".parse::<BigUint>().unwrap()
        );
    }

    #[test]
    fn test_chain_196_exhausts_bound() {
        let chain = generate_chain(&BigUint::from(196u32), 100).unwrap();
        assert_eq!(chain.status, ChainStatus::Exhausted);
        assert_eq!(chain.values.len(), 101);
        assert_eq!(chain.steps(), 100);
    }

    #[test]
    fn test_palindromic_seed_still_takes_a_step() {
        // 121 is already a palindrome but the seed itself is never
        // tested; the chain reports success at step 1 via 121+121=242.
        let chain = generate_chain(&BigUint::from(121u32), 10).unwrap();
        assert_eq!(chain.status, ChainStatus::PalindromeFound(1));
        assert_eq!(
            chain.values,
            vec![BigUint::from(121u32), BigUint::from(242u32)]
        );
    }

    #[test]
    fn test_chain_starts_at_seed_and_respects_length_bounds() {
        for seed in 0u32..60 {
            let seed = BigUint::from(seed);
            let chain = generate_chain(&seed, 8).unwrap();
            assert_eq!(chain.values[0], seed);
            assert!(chain.values.len() >= 2);
            assert!(chain.values.len() <= 9);
        }
    }

    #[test]
    fn test_first_palindrome_index_is_minimal() {
        let chain = generate_chain(&BigUint::from(59u32), 10).unwrap();
        let ChainStatus::PalindromeFound(k) = chain.status else {
            panic!("59 should palindromize quickly");
        };
        assert!(crate::digits::is_palindrome(&chain.values[k as usize]));
        for j in 1..k {
            assert!(!crate::digits::is_palindrome(&chain.values[j as usize]));
        }
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        assert_eq!(
            generate_chain(&BigUint::from(5u32), 0),
            Err(LychrelError::InvalidBound(0))
        );
    }
}
