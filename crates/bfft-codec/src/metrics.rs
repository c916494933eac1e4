//! Reconstruction error metrics used by the compressor and the optimiser's
//! inner loop.

use bfft_complex::Complex;
use bfft_matrix::Matrix;

/// Mean per-sample complex magnitude of the residual `a - b`. Despite the
/// historical name this is not a squared error; the summed quantity is
/// `|a_i - b_i|`, not `|a_i - b_i|^2`.
#[must_use]
pub fn mean_abs_error(a: &[Complex], b: &[Complex]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    a.iter().zip(b).take(n).map(|(&x, &y)| (x - y).abs()).sum::<f64>() / n as f64
}

/// Matrix counterpart of [`mean_abs_error`], comparing logical entries
/// position by position.
#[must_use]
pub fn mean_abs_error_matrix(a: &Matrix<Complex>, b: &Matrix<Complex>) -> f64 {
    let rows = a.rows().min(b.rows());
    let cols = a.cols().min(b.cols());
    if rows == 0 || cols == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            sum += (a.get(i, j) - b.get(i, j)).abs();
        }
    }
    sum / (rows * cols) as f64
}
