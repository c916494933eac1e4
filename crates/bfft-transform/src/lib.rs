//! The adaptive Blaschke Fourier transform.
//!
//! A [`FunctionSystem`](function_system::FunctionSystem) of complex-valued
//! parameters, one per butterfly level, generalizes the classical radix-2
//! FFT's roots-of-unity twiddle factors into Möbius/Blaschke basis points.
//! [`BlaschkeFft`](fft1::BlaschkeFft) runs the 1-D transform over such a
//! system; [`BlaschkeFft2`](fft2::BlaschkeFft2) runs it separably over rows
//! and columns of a [`Matrix`](bfft_matrix::Matrix) for 2-D data. With every
//! parameter at zero, both reduce exactly to the classical DFT.

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

pub mod fft1;
pub mod fft2;
pub mod function_system;
pub mod interpolation;
pub mod utils;

pub use fft1::{BlaschkeFft, ResizeType};
pub use fft2::BlaschkeFft2;
pub use function_system::{BlaschkeFunction, FunctionSystem};
