//! Errors surfaced while reading or writing the binary container.

use thiserror::Error;

/// Failures that can occur while decoding a compressed container, or while
/// validating arguments to the compressor.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The byte stream ended before a length-prefixed structure was fully
    /// read.
    #[error("unexpected end of container data while reading {what}")]
    UnexpectedEof {
        /// What was being read when the stream ran out.
        what: &'static str,
    },

    /// A `resize_type` field held a value other than `0` or `1`.
    #[error("invalid resize type tag: {0}")]
    InvalidResizeType(i32),

    /// The ratio argument was outside `(0, 1]`.
    #[error("compression ratio {0} is outside (0, 1]")]
    InvalidRatio(f64),

    /// Trailing bytes were found after the last expected structure.
    #[error("{0} trailing byte(s) after the final container structure")]
    TrailingBytes(usize),

    /// Underlying I/O failure while reading or writing the container.
    #[error("container I/O error")]
    Io(#[from] std::io::Error),
}
