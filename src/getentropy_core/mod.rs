//! Core wrapper around getentropy(3)
//!
//! `getentropy` is the POSIX entropy call, available in glibc since 2.25, in musl, and in
//! libSystem since macOS 10.12. It fills at most [`GETENTROPY_MAX`] bytes per call and fails
//! outright on anything larger, which makes it the canonical customer of the batching adapter.

mod error;

use core::ffi::{c_int, c_void};
use core::num::NonZeroUsize;

use log::debug;

use crate::batch::{BatchError, Batched};
use crate::chunk_limit;

pub use error::Error;

/// Largest request a single `getentropy` call accepts
pub const GETENTROPY_MAX: NonZeroUsize = chunk_limit(256);

unsafe extern "C" {
    /// Fills `buffer` with up to 256 bytes of entropy
    fn getentropy(buffer: *mut c_void, length: usize) -> c_int;
}

/// Fills `buf` with a single `getentropy` call
///
/// # Errors
/// - [`Error::RequestTooLarge`] if `buf` is longer than [`GETENTROPY_MAX`]; no call is made
/// - [`Error::Failed`] if `getentropy` reports failure
///
/// # Safety
/// - The pointer and length handed to `getentropy` describe exactly the live mutable slice `buf`,
///   and the length is checked against the 256 byte ceiling first.
pub fn getentropy_chunk(buf: &mut [u8]) -> Result<(), Error> {
    if buf.len() > GETENTROPY_MAX.get() {
        return Err(Error::RequestTooLarge { len: buf.len() });
    }

    let ret = unsafe { getentropy(buf.as_mut_ptr().cast::<c_void>(), buf.len()) };
    if ret != 0 {
        debug!("getentropy({} bytes) returned {ret}", buf.len());
        return Err(Error::Failed);
    }

    Ok(())
}

/// Fills all of `buf` in [`GETENTROPY_MAX`] sized chunks
///
/// # Errors
/// Returns [`BatchError`] wrapping the [`Error`] of the first chunk `getentropy` refused.
pub fn fill_from_getentropy(buf: &mut [u8]) -> Result<(), BatchError<Error>> {
    Batched::new(getentropy_chunk, GETENTROPY_MAX).try_fill(buf)
}
