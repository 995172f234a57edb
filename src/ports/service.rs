//! Randomness backend abstraction: wire dialect and usage accounting.
use crate::domain::errors::VeraRandomError;

/// One randomness service: how to ask it for quota and integers, and how it
/// bills for what it returned.
pub trait RandomService {
    /// Remaining quota for the caller's network identity. May be negative.
    fn fetch_quota(&self) -> Result<i64, VeraRandomError>;

    /// `count` truly-random integers in `[lower, upper]`, in server order.
    fn fetch_integers(
        &self,
        lower: i64,
        upper: i64,
        count: usize,
    ) -> Result<Vec<i64>, VeraRandomError>;

    /// Quota cost of a batch the service returned.
    fn bits_spent(&self, integers: &[i64]) -> i64;
}
