//! Batching adapter for size-limited fill primitives
//!
//! Many entropy sources cap the number of bytes a single call may produce: `getentropy(3)`
//! refuses requests above 256 bytes and Linux silently truncates `/dev/urandom` reads above
//! 32 MiB. [`Batched`] wraps such a primitive together with its per-call ceiling and exposes a
//! fill operation with no size restriction.
//!
//! The buffer is walked front to back in chunks of at most `limit` bytes. Each chunk is handed
//! to the primitive exactly once, in offset order, so stream-like primitives see the same byte
//! order as the caller's buffer. The first failing chunk ends the fill; chunks after it are never
//! requested and chunks before it keep whatever was written to them.
//!
//! The adapter allocates nothing and owns no resources of its own.

mod error;

use core::num::NonZeroUsize;

use log::{debug, trace};

pub use error::{BatchError, ZeroChunkLimit};

/// A fill primitive paired with the maximum number of bytes it may be asked for per call
///
/// # Examples
///
/// ```
/// # use core::num::NonZeroUsize;
/// # use kiss_batched::Batched;
/// let limit = NonZeroUsize::new(5).unwrap();
/// let mut counting = Batched::new(
///     |chunk: &mut [u8]| {
///         for (i, b) in chunk.iter_mut().enumerate() {
///             *b = i as u8;
///         }
///         Ok::<(), core::convert::Infallible>(())
///     },
///     limit,
/// );
///
/// let mut buf = [0u8; 13];
/// assert!(counting.fill(&mut buf));
/// assert_eq!(buf, [0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Batched<F> {
    fill: F,
    limit: NonZeroUsize,
}

impl<F> Batched<F> {
    /// Wraps `fill`, which must never be asked for more than `limit` bytes at once
    pub const fn new(fill: F, limit: NonZeroUsize) -> Self {
        Self { fill, limit }
    }

    /// Like [`Batched::new`], but takes the limit as a plain `usize`
    ///
    /// # Errors
    /// Returns [`ZeroChunkLimit`] if `limit` is zero.
    pub fn with_limit(fill: F, limit: usize) -> Result<Self, ZeroChunkLimit> {
        let limit = NonZeroUsize::new(limit).ok_or(ZeroChunkLimit)?;
        Ok(Self::new(fill, limit))
    }

    /// Largest request the wrapped primitive will ever receive
    pub const fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    /// Number of calls to the wrapped primitive needed to fill `len` bytes
    pub const fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.limit.get())
    }

    /// Unwraps the adapter, returning the primitive
    pub fn into_inner(self) -> F {
        self.fill
    }

    /// Fills all of `buf`, calling the wrapped primitive once per chunk of at most
    /// [`limit`](Self::limit) bytes.
    ///
    /// An empty `buf` succeeds without calling the primitive at all.
    ///
    /// # Errors
    /// Returns [`BatchError`] describing the first chunk the primitive failed on. Chunks before it
    /// have been written; chunks after it have not been requested.
    pub fn try_fill<E>(&mut self, buf: &mut [u8]) -> Result<(), BatchError<E>>
    where
        F: FnMut(&mut [u8]) -> Result<(), E>,
    {
        let limit = self.limit.get();

        if buf.len() > limit {
            trace!(
                "splitting {} byte fill into {} chunks of at most {limit} bytes",
                buf.len(),
                self.chunk_count(buf.len())
            );
        }

        for (chunk, sub) in buf.chunks_mut(limit).enumerate() {
            let len = sub.len();
            if let Err(source) = (self.fill)(sub) {
                // Every chunk before this one was exactly `limit` long.
                let offset = chunk * limit;
                debug!("fill primitive failed on chunk {chunk} ({len} bytes at offset {offset})");
                return Err(BatchError { chunk, offset, len, source });
            }
        }

        Ok(())
    }

    /// Boolean form of [`try_fill`](Self::try_fill): `true` iff every chunk was filled
    pub fn fill<E>(&mut self, buf: &mut [u8]) -> bool
    where
        F: FnMut(&mut [u8]) -> Result<(), E>,
    {
        self.try_fill(buf).is_ok()
    }
}

/// Turns a size-limited primitive into an unrestricted one reporting plain success or failure
///
/// This is the closure-shaped counterpart of [`Batched::fill`], for callers that want to pass the
/// derived primitive around as a value.
pub fn batched<F, E>(fill: F, limit: NonZeroUsize) -> impl FnMut(&mut [u8]) -> bool
where
    F: FnMut(&mut [u8]) -> Result<(), E>,
{
    let mut adapter = Batched::new(fill, limit);
    move |buf: &mut [u8]| adapter.fill(buf)
}
