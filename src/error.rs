use num_bigint::BigUint;
use thiserror::Error;

/// Precondition violations for range computations.
///
/// All of these are detected before any reverse-and-add iteration runs;
/// a violation aborts the whole requested computation with no partial
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LychrelError {
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: BigUint, end: BigUint },

    #[error("invalid bound: {0} (must be at least 1)")]
    InvalidBound(u32),

    #[error("invalid seed '{0}': expected a non-negative integer")]
    InvalidSeed(String),
}

pub type Result<T> = std::result::Result<T, LychrelError>;
