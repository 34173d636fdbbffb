use thiserror::Error;

/// Errors that can occur when calling getentropy(3)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The request exceeded the 256 byte ceiling of a single call
    #[error("Requested {len} bytes from getentropy, at most 256 are allowed per call")]
    RequestTooLarge { len: usize },
    /// getentropy returned a non-zero status
    #[error("getentropy failed")]
    Failed,
}
