//! Pure request-parameter checks against a service's limits.
//!
//! Count checks run before bound checks, so an empty request with bad bounds
//! reports the count error. Limits are inclusive on both ends.
use crate::domain::errors::VeraRandomError;
use crate::domain::model::RandomConfig;

/// Check a full integer request: count first, then both bounds.
pub fn validate_request(
    config: &RandomConfig,
    lower: i64,
    upper: i64,
    count: usize,
) -> Result<(), VeraRandomError> {
    validate_count(count, config.max_integers_per_request)?;
    validate_bounds(config, lower, upper)
}

/// Check only how many numbers are requested.
pub fn validate_count(count: usize, max: usize) -> Result<(), VeraRandomError> {
    if count < 1 {
        return Err(VeraRandomError::NoNumbersRequested);
    }
    if count > max {
        return Err(VeraRandomError::TooManyNumbersRequested {
            requested: count,
            max,
        });
    }
    Ok(())
}

fn validate_bounds(config: &RandomConfig, lower: i64, upper: i64) -> Result<(), VeraRandomError> {
    for bound in [lower, upper] {
        if bound > config.max_integer {
            return Err(VeraRandomError::NumberLimitTooLarge(bound));
        }
    }
    for bound in [lower, upper] {
        if bound < config.min_integer {
            return Err(VeraRandomError::NumberLimitTooSmall(bound));
        }
    }
    Ok(())
}
