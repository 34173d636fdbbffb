//! Public Error type for crate

use thiserror::Error;

use super::{BatchError, GetentropyError, UrandomError};

/// Public error type for this crate.
///
/// Batched variants keep the position of the chunk that failed; the wrapped source error is
/// reachable through [`core::error::Error::source`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// A `getentropy` chunk failed
    #[error(transparent)]
    Getentropy(#[from] BatchError<GetentropyError>),
    /// `/dev/urandom` could not be opened
    #[error(transparent)]
    UrandomOpen(#[from] UrandomError),
    /// A `/dev/urandom` chunk failed
    #[error(transparent)]
    Urandom(#[from] BatchError<UrandomError>),
}
