//! Coefficient ranking: sort by descending magnitude, ties broken by
//! ascending id, and retention of the top `ratio` fraction.

use bfft_complex::Complex;
use bfft_matrix::Matrix;

use crate::types::{Coeff1D, Coeff2D};

/// Every entry of `values`, paired with its index, sorted descending by
/// `|value|` with ties broken by ascending index.
#[must_use]
pub fn rank_1d(values: &[Complex]) -> Vec<Coeff1D> {
    let mut ranked: Vec<Coeff1D> = values.iter().enumerate().map(|(i, &v)| (i as u64, v)).collect();
    ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Every logical entry of `matrix`, sorted descending by `|value|` with
/// ties broken by ascending `(row, col)`.
#[must_use]
pub fn rank_2d(matrix: &Matrix<Complex>) -> Vec<Coeff2D> {
    let mut ranked = Vec::with_capacity(matrix.rows() * matrix.cols());
    for i in 0..matrix.rows() {
        for j in 0..matrix.cols() {
            ranked.push((i as u64, j as u64, matrix.get(i, j)));
        }
    }
    ranked.sort_by(|a, b| {
        b.2.abs().total_cmp(&a.2.abs()).then_with(|| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
    });
    ranked
}

/// Number of entries to retain out of `total` at the given `ratio`.
#[must_use]
pub fn retain_count(ratio: f64, total: usize) -> usize {
    debug_assert!(ratio > 0.0 && ratio <= 1.0, "ratio must be in (0, 1]");
    ((ratio * total as f64).floor() as usize).min(total)
}
