//! Blocking plain-text HTTP abstraction.
use crate::domain::errors::HttpError;

/// A synchronous GET returning the response body as text.
///
/// Implementations must turn any non-success status into
/// [`HttpError::Status`] instead of handing back the body.
pub trait Http {
    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, HttpError>;
}
