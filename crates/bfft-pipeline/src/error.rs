//! Errors surfaced by the image block pipeline.

use thiserror::Error;

/// Failures raised while validating pipeline configuration, decoding
/// raster images, or reading/writing the compressed container.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// `-block` outside `[8, 128]`.
    #[error("block size {0} is outside the allowed range [8, 128]")]
    InvalidBlockSize(usize),

    /// `-channels` outside `1..=4`, or a decoded image carried an
    /// unsupported channel count.
    #[error("channel count {0} is outside the allowed range [1, 4]")]
    InvalidChannelCount(u8),

    /// `-ratio` outside `(0, 1]`.
    #[error("compression ratio {0} is outside (0, 1]")]
    InvalidRatio(f64),

    /// `-lvl` outside `0..=3`.
    #[error("optimisation level {0} is outside the allowed range [0, 3]")]
    InvalidOptimizeLevel(u8),

    /// Raster decode/encode failure.
    #[error("raster image I/O error")]
    Image(#[from] image::ImageError),

    /// Binary container read/write failure.
    #[error("container error")]
    Codec(#[from] bfft_codec::CodecError),

    /// Underlying file I/O failure.
    #[error("file I/O error")]
    Io(#[from] std::io::Error),
}
