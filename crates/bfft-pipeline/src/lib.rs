//! Block-tiled, channel-parallel Blaschke image compression pipeline.
//!
//! Ties together raster I/O ([`image`]), block tiling ([`block`]), the
//! per-block parameter search and compressor ([`bfft_optimize`],
//! [`bfft_codec`]), and `rayon`-driven concurrency across blocks into the
//! two entry points most callers need: [`compress_image`] and
//! [`decompress_image`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod block;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod options;
pub mod raster;

pub use compress::{compress_channel, compress_image};
pub use decompress::{decompress_channel, decompress_image};
pub use error::PipelineError;
pub use options::{CompressOptions, OptimizeLevel};
