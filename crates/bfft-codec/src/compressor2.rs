//! The 2-D compressor: separable forward transform, magnitude-ranked
//! coefficient retention, inverse transform.

use bfft_complex::Complex;
use bfft_matrix::Matrix;
use bfft_transform::{BlaschkeFft, BlaschkeFft2, FunctionSystem, ResizeType};

use crate::metrics::mean_abs_error_matrix;
use crate::ranking::{rank_2d, retain_count};
use crate::types::CompressedData2D;

fn ffts_from_params(params: &[Vec<Complex>]) -> Vec<BlaschkeFft> {
    params
        .iter()
        .map(|p| BlaschkeFft::with_function_system(FunctionSystem::from_params(p.clone())))
        .collect()
}

/// Build a [`BlaschkeFft2`] from recorded per-row/per-column parameter
/// vectors.
#[must_use]
pub fn fft2_from_params(row_params: &[Vec<Complex>], col_params: &[Vec<Complex>]) -> BlaschkeFft2 {
    BlaschkeFft2::with_ffts(ffts_from_params(row_params), ffts_from_params(col_params))
}

/// Forward-transform `input` under the given per-row/per-column parameter
/// vectors, keep the top `ratio` fraction of coefficients by magnitude.
#[must_use]
pub fn compress(
    input: &Matrix<Complex>,
    row_params: &[Vec<Complex>],
    col_params: &[Vec<Complex>],
    ratio: f64,
    resize: ResizeType,
) -> CompressedData2D {
    let fft2 = fft2_from_params(row_params, col_params);
    compress_with_fft2(&fft2, input, row_params, col_params, ratio, resize)
}

/// As [`compress`] but reusing an already-built [`BlaschkeFft2`] (avoids
/// rebuilding per-row/column function systems when the caller already has
/// one).
#[must_use]
pub fn compress_with_fft2(
    fft2: &BlaschkeFft2,
    input: &Matrix<Complex>,
    row_params: &[Vec<Complex>],
    col_params: &[Vec<Complex>],
    ratio: f64,
    resize: ResizeType,
) -> CompressedData2D {
    let transformed = fft2.forward(input, resize);
    let ranked = rank_2d(&transformed);
    let keep = retain_count(ratio, ranked.len());
    CompressedData2D {
        coeffs: ranked.into_iter().take(keep).collect(),
        row_params: row_params.to_vec(),
        col_params: col_params.to_vec(),
        transformed_rows: transformed.rows() as u64,
        transformed_cols: transformed.cols() as u64,
        result_rows: input.rows() as u64,
        result_cols: input.cols() as u64,
        resize_type: resize,
    }
}

/// Scatter the retained coefficients and inverse-transform, cropping to the
/// recorded result dimensions.
#[must_use]
pub fn decompress(data: &CompressedData2D) -> Matrix<Complex> {
    let mut transformed = Matrix::new(data.transformed_rows as usize, data.transformed_cols as usize);
    for &(row, col, value) in &data.coeffs {
        transformed.set(row as usize, col as usize, value);
    }
    let fft2 = fft2_from_params(&data.row_params, &data.col_params);
    fft2.inverse(&transformed, data.result_rows as usize, data.result_cols as usize, data.resize_type)
}

/// Compress then decompress `input` and report the mean-magnitude
/// reconstruction error.
#[must_use]
pub fn compression_error(
    input: &Matrix<Complex>,
    row_params: &[Vec<Complex>],
    col_params: &[Vec<Complex>],
    ratio: f64,
    resize: ResizeType,
) -> f64 {
    let compressed = compress(input, row_params, col_params, ratio, resize);
    let restored = decompress(&compressed);
    mean_abs_error_matrix(input, &restored)
}

/// Allocation-light variant of [`compression_error`] for an already-built
/// [`BlaschkeFft2`]: forward-transform, zero everything but the retained
/// coefficients in place, inverse-transform, and return the residual. This
/// is the inner-loop primitive the optimiser's objective calls on every
/// candidate parameter.
#[must_use]
pub fn compression_error_with_fft2(fft2: &BlaschkeFft2, input: &Matrix<Complex>, ratio: f64, resize: ResizeType) -> f64 {
    let transformed = fft2.forward(input, resize);
    let ranked = rank_2d(&transformed);
    let keep = retain_count(ratio, ranked.len());
    let mut kept = Matrix::new(transformed.rows(), transformed.cols());
    for &(row, col, value) in ranked.iter().take(keep) {
        kept.set(row as usize, col as usize, value);
    }
    let restored = fft2.inverse(&kept, input.rows(), input.cols(), resize);
    mean_abs_error_matrix(input, &restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Matrix<Complex> {
        Matrix::from_row_major(4, 4, (0..16).map(|i| Complex::new(i as f64, 0.0)).collect())
    }

    #[test]
    fn full_ratio_round_trips_exactly_at_power_of_two_shape() {
        let input = sample_matrix();
        let compressed = compress(&input, &[], &[], 1.0, ResizeType::Truncate);
        let restored = decompress(&compressed);
        for i in 0..4 {
            for j in 0..4 {
                assert!((restored.get(i, j) - input.get(i, j)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn coefficient_ranking_is_a_total_order_with_ascending_tiebreak() {
        let mat = Matrix::<Complex>::from_row_major(2, 2, vec![Complex::ZERO; 4]);
        let ranked = rank_2d(&mat);
        assert_eq!(ranked[0], (0, 0, Complex::ZERO));
        assert_eq!(ranked[3], (1, 1, Complex::ZERO));
    }

    #[test]
    fn lower_ratio_retains_fewer_coefficients() {
        let input = sample_matrix();
        let full = compress(&input, &[], &[], 1.0, ResizeType::Truncate);
        let half = compress(&input, &[], &[], 0.5, ResizeType::Truncate);
        assert!(half.coeffs.len() < full.coeffs.len());
    }
}
