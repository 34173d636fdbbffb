use thiserror::Error;

/// Errors that can occur when reading from /dev/urandom
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// Failed to open /dev/urandom
    #[error("Could not open /dev/urandom")]
    OpenFailed,
    /// Failed to read from the file descriptor
    #[error("Could not read /dev/urandom")]
    ReadFailed,
    /// Incomplete read from /dev/urandom
    #[error("/dev/urandom returned too few bytes")]
    ShortRead,
    /// A single chunk was larger than one urandom read may be
    #[error("Requested {len} bytes from /dev/urandom in a single read")]
    RequestTooLarge { len: usize },
    /// The calculated offset is out of range of the buffer. This is an internal error that should
    /// never happen but included here so it can be handled as an error instead of a panic.
    #[error("Internal error: buffer offset out of range")]
    OffsetOutOfRange,
    /// Adding the number of bytes returned from urandom to our current buffer offset would cause
    /// the offset to overflow its range. This is an internal error that should never happen but
    /// included here so it can be handled as an error instead of a panic.
    #[error("The offset overflowed")]
    OffsetOverflow,
}
