//! Batched reads from /dev/urandom
//!
//! Platform Support
//! - Currently, this module only supports Linux and macOS

mod error;

use core::ffi::{c_char, c_int, c_void};
use core::num::NonZeroUsize;

use log::debug;

use crate::batch::{BatchError, Batched};
use crate::chunk_limit;

pub use error::Error;

/// File descriptor flag for read-only access
const O_RDONLY: c_int = 0;

/// File descriptor flag for close-on-exec behavior
///
/// # Platform Notes
/// - Both Linux and macOS define `O_CLOEXEC`, but value differs.
#[cfg(target_os = "linux")]
const O_CLOEXEC: c_int = 0x0008_0000;
#[cfg(target_os = "macos")]
const O_CLOEXEC: c_int = 0x0100_0000;

/// Path to the system's random device
///
/// # Safety
/// - `URANDOM_PATH` is a valid null-terminated C string
const URANDOM_PATH: &[u8] = b"/dev/urandom\0";

/// Largest single read handed to `/dev/urandom`
///
/// Linux truncates urandom reads at `INT_MAX >> 6` bytes (32 MiB - 1). Staying at or below that
/// keeps every chunk satisfiable by a bounded number of `read(2)` calls.
pub const URANDOM_MAX_READ: NonZeroUsize = chunk_limit((1 << 25) - 1);

unsafe extern "C" {
    /// Opens a file descriptor
    fn open(path: *const c_char, oflag: c_int, ...) -> c_int;
    /// Reads from a file descriptor
    fn read(fd: c_int, buf: *mut c_void, count: usize) -> isize;
    /// Closes a file descriptor
    fn close(fd: c_int) -> c_int;
}

/// An open, read-only handle on `/dev/urandom`
///
/// The descriptor is opened once and reused for every chunk of every fill; it is closed when the
/// handle is dropped. Errors from `close(2)` are ignored: the descriptor is released either way
/// and nothing already read is invalidated.
#[derive(Debug)]
pub struct Urandom {
    fd: c_int,
}

impl Urandom {
    /// Opens `/dev/urandom` for reading with close-on-exec set
    ///
    /// # Errors
    /// Returns [`Error::OpenFailed`] if `open(2)` fails.
    ///
    /// # Safety
    /// - `open(2)` receives a statically known, null-terminated path and platform-appropriate
    ///   flags. The returned descriptor is checked for `-1` and never exposed to callers, so it
    ///   cannot be double-closed.
    pub fn open() -> Result<Self, Error> {
        let fd = unsafe { open(URANDOM_PATH.as_ptr().cast::<c_char>(), O_RDONLY | O_CLOEXEC) };

        // open() returns -1 on error, and a valid file descriptor on success.
        if fd < 0 {
            debug!("open(/dev/urandom) returned {fd}");
            return Err(Error::OpenFailed);
        }

        Ok(Self { fd })
    }

    /// Fills `buf` completely with one or more `read(2)` calls
    ///
    /// This is the size-limited primitive: it refuses requests larger than [`URANDOM_MAX_READ`].
    /// Even below that size `read(2)` may return fewer bytes than asked for, so it loops until the
    /// chunk is full.
    ///
    /// # Errors
    /// - [`Error::RequestTooLarge`] if `buf` exceeds [`URANDOM_MAX_READ`]
    /// - [`Error::ReadFailed`] if `read(2)` returns a negative value
    /// - [`Error::ShortRead`] if `read(2)` reports end of file
    ///
    /// # Safety
    /// - The pointer handed to `read(2)` comes from a live mutable sub-slice of `buf` and the
    ///   count passed is exactly that sub-slice's length, so the kernel never writes out of
    ///   bounds. `&mut self` rules out concurrent reads on the same descriptor.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if buf.len() > URANDOM_MAX_READ.get() {
            return Err(Error::RequestTooLarge { len: buf.len() });
        }

        let mut offset = 0;

        while offset < buf.len() {
            let remaining = buf.len() - offset;
            let ptr =
                buf.get_mut(offset..).ok_or(Error::OffsetOutOfRange)?.as_mut_ptr().cast::<c_void>();

            let n = unsafe { read(self.fd, ptr, remaining) };

            // read() returns 0 on EOF, so we need to check for that explicitly.
            if n == 0 {
                debug!("/dev/urandom hit EOF after {offset} of {} bytes", buf.len());
                return Err(Error::ShortRead);
            }

            // read() returns -1 on error.
            let n_usize = usize::try_from(n).map_err(|_| {
                debug!("read(/dev/urandom) returned {n}");
                Error::ReadFailed
            })?;

            offset = offset.checked_add(n_usize).ok_or(Error::OffsetOverflow)?;
        }

        Ok(())
    }

    /// Fills all of `buf`, splitting it into reads of at most [`URANDOM_MAX_READ`] bytes
    ///
    /// # Errors
    /// Returns [`BatchError`] wrapping the [`Error`] of the first chunk that could not be read.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<(), BatchError<Error>> {
        Batched::new(|chunk: &mut [u8]| self.read_chunk(chunk), URANDOM_MAX_READ).try_fill(buf)
    }
}

impl Drop for Urandom {
    fn drop(&mut self) {
        unsafe { close(self.fd) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::vec;

    /// Basic sanity test: a chunk read should succeed and touch the buffer
    ///
    /// Provides an extremely weak sanity check. This does *not* prove cryptographic quality,
    /// only that something happened.
    #[test]
    fn reads_chunk_successfully() {
        let mut urandom = Urandom::open().unwrap();
        let mut buf = [0u8; 32];
        urandom.read_chunk(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 32], "buffer was left all zeros");
    }

    #[test]
    fn zero_length_buffer_is_ok() {
        let mut urandom = Urandom::open().unwrap();
        let mut buf: [u8; 0] = [];
        urandom.read_chunk(&mut buf).expect("read_chunk failed on empty buffer");
        urandom.fill(&mut buf).expect("fill failed on empty buffer");
    }

    /// Oversized requests are refused before any syscall is made
    #[test]
    fn oversized_chunk_is_rejected() {
        let mut urandom = Urandom::open().unwrap();
        let mut buf = vec![0u8; URANDOM_MAX_READ.get() + 1];
        let err = urandom.read_chunk(&mut buf).unwrap_err();
        assert!(matches!(err, Error::RequestTooLarge { len } if len == buf.len()));
        assert!(buf.iter().all(|&b| b == 0));
    }

    /// A buffer one byte longer than the per-read limit is filled in two chunks without error
    #[test]
    fn fill_spans_read_limit() {
        let mut urandom = Urandom::open().unwrap();
        let mut buf = vec![0u8; URANDOM_MAX_READ.get() + 1];
        urandom.fill(&mut buf).expect("fill failed across the read limit");
        assert!(buf[buf.len() - 64..].iter().any(|&b| b != 0), "tail chunk appears unfilled");
    }

    /// Two consecutive fills from one handle should almost certainly differ
    #[test]
    fn one_handle_produces_different_values() {
        let mut urandom = Urandom::open().unwrap();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        urandom.fill(&mut a).expect("first fill failed");
        urandom.fill(&mut b).expect("second fill failed");
        assert_ne!(a, b, "two urandom outputs were identical; extremely unlikely");
    }
}
