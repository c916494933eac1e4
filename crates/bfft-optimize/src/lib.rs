//! Parameter search for the Blaschke Fourier transform: a generic
//! Nelder-Mead simplex minimiser ([`nelder_mead`]) driving a coarse-grid-
//! seeded, per-level coordinate descent over Blaschke parameters
//! ([`search`]).

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

pub mod nelder_mead;
pub mod search;

pub use nelder_mead::{find_min, get_starting_points, NelderMeadConfig};
pub use search::{search_1d, search_2d};
