//! Error taxonomy: transport failures stay inspectable, everything the
//! generator refuses locally gets its own variant.
use thiserror::Error;

/// Failure of a single HTTP exchange with the randomness service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The exchange never completed (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Transport(String),
}

/// Everything a generator call can fail with.
///
/// Validation variants are raised before any network I/O for that call;
/// transport errors pass through transparently so callers can match on
/// [`HttpError::Status`] and read the status code.
#[derive(Debug, Error)]
pub enum VeraRandomError {
    /// The local quota estimate is below the configured floor. Stop
    /// requesting until the server-side quota has replenished.
    #[error("bit quota exhausted ({estimate} bits remaining)")]
    QuotaExceeded { estimate: i64 },

    #[error("at least one random number must be requested")]
    NoNumbersRequested,

    #[error("{requested} numbers requested, the service accepts at most {max} per request")]
    TooManyNumbersRequested { requested: usize, max: usize },

    #[error("bound {0} is above the largest integer the service accepts")]
    NumberLimitTooLarge(i64),

    #[error("bound {0} is below the smallest integer the service accepts")]
    NumberLimitTooSmall(i64),

    /// The service answered 2xx but the body was not what was asked for.
    #[error("malformed response from randomness service: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Http(#[from] HttpError),
}
