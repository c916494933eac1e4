//! The separable 2-D adaptive Blaschke Fourier transform: an independent
//! [`BlaschkeFft`] per row and per column, applied rows-then-columns going
//! forward and columns-then-rows going back.

use bfft_complex::Complex;
use bfft_matrix::Matrix;

use crate::fft1::{BlaschkeFft, ResizeType};
use crate::utils;

/// A 2-D transform built from one [`BlaschkeFft`] per row and one per
/// column. Any row/column index beyond the configured count falls back to
/// a default (all-zero-parameter) transform.
#[derive(Clone, Debug)]
pub struct BlaschkeFft2 {
    row_ffts: Vec<BlaschkeFft>,
    col_ffts: Vec<BlaschkeFft>,
    default_fft: BlaschkeFft,
}

impl BlaschkeFft2 {
    /// `rows` independent row transforms and `cols` independent column
    /// transforms, all starting at the zero-parameter default.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_ffts: vec![BlaschkeFft::new(); rows],
            col_ffts: vec![BlaschkeFft::new(); cols],
            default_fft: BlaschkeFft::new(),
        }
    }

    /// Build directly from explicit per-row/per-column transforms.
    #[must_use]
    pub fn with_ffts(row_ffts: Vec<BlaschkeFft>, col_ffts: Vec<BlaschkeFft>) -> Self {
        Self { row_ffts, col_ffts, default_fft: BlaschkeFft::new() }
    }

    /// Number of explicitly configured row transforms.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_ffts.len()
    }

    /// Number of explicitly configured column transforms.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.col_ffts.len()
    }

    /// The transform for row `i`, falling back to the default beyond range.
    #[must_use]
    pub fn row_fft(&self, i: usize) -> &BlaschkeFft {
        self.row_ffts.get(i).unwrap_or(&self.default_fft)
    }

    /// The transform for row `i`, mutably. Panics if `i >= rows()`.
    pub fn row_fft_mut(&mut self, i: usize) -> &mut BlaschkeFft {
        &mut self.row_ffts[i]
    }

    /// The transform for column `j`, falling back to the default beyond
    /// range.
    #[must_use]
    pub fn col_fft(&self, j: usize) -> &BlaschkeFft {
        self.col_ffts.get(j).unwrap_or(&self.default_fft)
    }

    /// The transform for column `j`, mutably. Panics if `j >= cols()`.
    pub fn col_fft_mut(&mut self, j: usize) -> &mut BlaschkeFft {
        &mut self.col_ffts[j]
    }

    /// Replace the full set of row transforms.
    pub fn set_row_ffts(&mut self, ffts: Vec<BlaschkeFft>) {
        self.row_ffts = ffts;
    }

    /// Replace the full set of column transforms.
    pub fn set_col_ffts(&mut self, ffts: Vec<BlaschkeFft>) {
        self.col_ffts = ffts;
    }

    /// Forward transform: zero-extends `mat` to the next power-of-two
    /// shape, transforms every row, then every column.
    #[must_use]
    pub fn forward(&self, mat: &Matrix<Complex>, resize: ResizeType) -> Matrix<Complex> {
        let rows = utils::ceil_pow2(mat.rows());
        let cols = utils::ceil_pow2(mat.cols());
        let mut result = Matrix::new(rows, cols);
        Matrix::copy_into(&mut result, mat);

        self.transform_rows(&mut result, mat.cols(), resize, BlaschkeFft::forward);
        self.transform_cols(&mut result, mat.rows(), resize, BlaschkeFft::forward);
        result
    }

    /// Inverse transform: columns first, then rows, cropping to
    /// `(out_rows, out_cols)` afterward (`0` means "padded transform
    /// size").
    #[must_use]
    pub fn inverse(&self, mat: &Matrix<Complex>, out_rows: usize, out_cols: usize, resize: ResizeType) -> Matrix<Complex> {
        let rows = utils::ceil_pow2(mat.rows());
        let cols = utils::ceil_pow2(mat.cols());
        let out_rows = if out_rows == 0 { rows } else { out_rows };
        let out_cols = if out_cols == 0 { cols } else { out_cols };

        let mut result = Matrix::new(rows, cols);
        Matrix::copy_into(&mut result, mat);

        self.inverse_cols(&mut result, mat.rows(), out_rows, resize);
        self.inverse_rows(&mut result, mat.cols(), out_cols, resize);

        if out_rows == rows && out_cols == cols {
            result
        } else {
            let mut cropped = Matrix::new(out_rows, out_cols);
            Matrix::copy_into(&mut cropped, &result);
            cropped
        }
    }

    fn transform_rows(
        &self,
        mat: &mut Matrix<Complex>,
        in_size: usize,
        resize: ResizeType,
        op: impl Fn(&BlaschkeFft, &[Complex], ResizeType) -> Vec<Complex>,
    ) {
        for i in 0..mat.rows() {
            let row = mat.row(i);
            let transformed = op(self.row_fft(i), &row[..in_size.min(row.len())], resize);
            mat.set_row(i, &transformed);
        }
    }

    fn transform_cols(
        &self,
        mat: &mut Matrix<Complex>,
        in_size: usize,
        resize: ResizeType,
        op: impl Fn(&BlaschkeFft, &[Complex], ResizeType) -> Vec<Complex>,
    ) {
        for j in 0..mat.cols() {
            let col = mat.col(j);
            let transformed = op(self.col_fft(j), &col[..in_size.min(col.len())], resize);
            mat.set_col(j, &transformed);
        }
    }

    fn inverse_cols(&self, mat: &mut Matrix<Complex>, in_size: usize, out_size: usize, resize: ResizeType) {
        for j in 0..mat.cols() {
            let col = mat.col(j);
            let restored = self.col_fft(j).inverse(&col[..in_size.min(col.len())], out_size, resize);
            mat.set_col(j, &restored);
        }
    }

    fn inverse_rows(&self, mat: &mut Matrix<Complex>, in_size: usize, out_size: usize, resize: ResizeType) {
        for i in 0..mat.rows() {
            let row = mat.row(i);
            let restored = self.row_fft(i).inverse(&row[..in_size.min(row.len())], out_size, resize);
            mat.set_row(i, &restored);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Matrix<Complex> {
        Matrix::from_row_major(
            4,
            4,
            (0..16).map(|i| Complex::new(i as f64, 0.0)).collect(),
        )
    }

    #[test]
    fn forward_pads_to_power_of_two_shape() {
        let mat = Matrix::<Complex>::new(3, 5);
        let fft2 = BlaschkeFft2::new(3, 5);
        let out = fft2.forward(&mat, ResizeType::Truncate);
        assert_eq!(out.rows(), 4);
        assert_eq!(out.cols(), 8);
    }

    #[test]
    fn forward_then_inverse_round_trips_at_power_of_two_shape() {
        let mat = sample_matrix();
        let fft2 = BlaschkeFft2::new(4, 4);
        let transformed = fft2.forward(&mat, ResizeType::Truncate);
        let restored = fft2.inverse(&transformed, 4, 4, ResizeType::Truncate);
        for i in 0..4 {
            for j in 0..4 {
                assert!((restored.get(i, j) - mat.get(i, j)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn out_of_range_row_and_col_fall_back_to_default() {
        let fft2 = BlaschkeFft2::new(1, 1);
        assert_eq!(fft2.row_fft(5).function_system().len(), fft2.row_fft(0).function_system().len());
    }
}
