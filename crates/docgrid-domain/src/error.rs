//! Failure taxonomies for the external collaborator contracts

use thiserror::Error;

/// Failure of one extraction call
///
/// The run controller treats every variant identically (log the task, keep
/// the run going); the split exists so clients can report what actually
/// happened and so callers can choose to retry rate limits differently.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    /// Transport-level failure reaching the model API
    #[error("network error: {0}")]
    Network(String),

    /// The model answered, but not in the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The model API refused the call due to rate limiting
    #[error("rate limit exceeded")]
    RateLimited,
}

/// Failure of one document conversion
#[derive(Error, Debug)]
pub enum ConversionFailure {
    /// The converter does not support this input format
    #[error("unsupported input: {0}")]
    Unsupported(String),

    /// The input was recognized but could not be read
    #[error("corrupt input: {0}")]
    Corrupt(String),

    /// Transport-level failure reaching the converter service
    #[error("network error: {0}")]
    Network(String),

    /// The converter service reported an error
    #[error("converter error (status {status}): {detail}")]
    Service {
        /// HTTP status returned by the converter
        status: u16,
        /// Error detail from the converter's response body
        detail: String,
    },
}
