//! Service limits and the bit-cost accounting unit.
use serde::{Deserialize, Serialize};

/// Immutable limits of a randomness service, supplied once at construction.
///
/// Bound limits are inclusive on both ends. The quota floor is the lowest
/// estimate at which requests are still permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomConfig {
    pub quota_floor: i64,
    pub max_integer: i64,
    pub min_integer: i64,
    pub max_integers_per_request: usize,
    pub max_floats_per_request: usize,
}

/// How many integers one float draw consumes.
pub const FLOAT_DRAW_PARTS: usize = 3;

/// Each part of a float draw carries five decimal digits: `[0, 99999]`.
pub const FLOAT_PART_MODULUS: i64 = 100_000;

/// Bits needed to represent the magnitude of `n`; zero needs none.
///
/// This is the unit in which random.org accounts quota usage.
pub fn magnitude_bits(n: i64) -> u32 {
    64 - n.unsigned_abs().leading_zeros()
}
