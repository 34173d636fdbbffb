use thiserror::Error;

/// A chunk of the caller's buffer could not be filled by the wrapped primitive
///
/// Carries the position of the failing chunk alongside the primitive's own error. Bytes of the
/// buffer before `offset` may already have been overwritten; bytes from `offset + len` onward are
/// untouched.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("fill primitive failed on chunk {chunk} ({len} bytes at offset {offset})")]
pub struct BatchError<E> {
    /// Zero-based index of the failing chunk
    pub chunk: usize,
    /// Byte offset of the failing chunk within the caller's buffer
    pub offset: usize,
    /// Length of the failing chunk
    pub len: usize,
    /// Error reported by the wrapped primitive
    #[source]
    pub source: E,
}

impl<E> BatchError<E> {
    /// Discards the chunk position and returns the primitive's error
    pub fn into_source(self) -> E {
        self.source
    }
}

/// A chunk limit of zero was supplied to [`Batched::with_limit`](super::Batched::with_limit)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("chunk limit must be at least one byte")]
pub struct ZeroChunkLimit;
