//! The Blaschke-transform block compressor and its binary container.
//!
//! [`compressor1`] and [`compressor2`] turn a transformed sequence/matrix
//! into a sparse, magnitude-ranked [`CompressedData1D`]/[`CompressedData2D`]
//! and back; [`container`] serialises a full image's worth of
//! [`BlockedChannel`]s to and from a deterministic little-endian byte
//! stream.

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

pub mod compressor1;
pub mod compressor2;
pub mod container;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod types;

pub use error::CodecError;
pub use types::{BlockedChannel, Coeff1D, Coeff2D, CompressedBlock, CompressedData1D, CompressedData2D};
