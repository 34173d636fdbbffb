// We don't need the standard library
#![no_std]

#[cfg(test)]
extern crate std;

mod batch;
pub mod error;
mod getentropy_core;
mod urandom_core;

use core::num::NonZeroUsize;

pub use batch::{BatchError, Batched, ZeroChunkLimit, batched};
pub use error::Error;
pub use getentropy_core::{
    Error as GetentropyError, GETENTROPY_MAX, fill_from_getentropy, getentropy_chunk,
};
pub use urandom_core::{Error as UrandomError, URANDOM_MAX_READ, Urandom};

/// Builds a chunk limit constant, refusing zero at compile time
pub(crate) const fn chunk_limit(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        | Some(limit) => limit,
        | None => panic!("chunk limit must be non-zero"),
    }
}

/// Fills `buf` with entropy from `getentropy(3)`, however long `buf` is.
///
/// This is the function that consumers of the crate are expected to call. The buffer is filled
/// in chunks of at most [`GETENTROPY_MAX`] bytes; an empty buffer returns immediately without
/// calling into the OS.
///
/// # Examples
///
/// ```
/// # use kiss_batched::{fill, Error};
/// let mut buf = [0u8; 1024];
/// fill(&mut buf)?;
/// # Ok::<(), Error>(())
/// ```
/// # Errors
/// Returns [`Error::Getentropy`] for the first chunk `getentropy` failed on. Bytes before that
/// chunk have already been overwritten.
pub fn fill(buf: &mut [u8]) -> Result<(), Error> {
    Ok(fill_from_getentropy(buf)?)
}

/// Fills `buf` with entropy read from `/dev/urandom`, however long `buf` is.
///
/// The device is opened for the duration of the call and read in chunks of at most
/// [`URANDOM_MAX_READ`] bytes. An empty buffer returns immediately without opening the device.
/// Callers filling many buffers can hold a [`Urandom`] handle instead.
///
/// # Errors
/// - [`Error::UrandomOpen`] if `/dev/urandom` could not be opened
/// - [`Error::Urandom`] for the first chunk that could not be read
pub fn fill_from_urandom(buf: &mut [u8]) -> Result<(), Error> {
    if buf.is_empty() {
        return Ok(());
    }

    let mut urandom = Urandom::open()?;
    Ok(urandom.fill(buf)?)
}
