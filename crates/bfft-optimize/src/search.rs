//! Coarse-grid-seeded, Nelder-Mead-refined parameter search, one
//! decomposition level at a time.
//!
//! Both the 1-D and 2-D drivers optimise a single complex parameter
//! `p = polar(r, theta)` per level while holding every other already-found
//! parameter fixed — a greedy, per-level coordinate descent rather than a
//! single high-dimensional optimisation. This mirrors the reference
//! implementation's structure and keeps each Nelder-Mead instance small
//! (2 arguments) regardless of how many levels a block needs.

use bfft_codec::{compressor1, compressor2};
use bfft_complex::Complex;
use bfft_matrix::Matrix;
use bfft_transform::{BlaschkeFft, BlaschkeFft2, FunctionSystem, ResizeType};
use bfft_transform::utils::ceil_log2;

use crate::nelder_mead::{self, NelderMeadConfig};

/// Default coarse-grid radius sample count for the 1-D per-level search.
pub const SAMPLE_RADIUS: usize = 10;
/// Default coarse-grid angle sample count for the 1-D per-level search.
pub const SAMPLE_ANGLE: usize = 20;
/// Default coarse-grid angle segment count for the 2-D per-row/column search.
pub const ANGLE_SEGMENTS: usize = 4;
/// Default coarse-grid radius segment count for the 2-D per-row/column search.
pub const RADIUS_SEGMENTS: usize = 3;

const RADIUS_CLAMP: f64 = 0.99;
const RADIUS_PENALTY_BOUND: f64 = 0.98;
const PENALTY: f64 = 1e18;

/// Coarse grid for the 1-D search: the origin plus a `(sample_radius - 1) x
/// (sample_angle - 1)` grid of `(theta, radius)` samples.
#[must_use]
pub fn coarse_grid_1d(sample_radius: usize, sample_angle: usize) -> Vec<(f64, f64)> {
    let mut grid = vec![(0.0, 0.0)];
    for i in 1..sample_radius {
        for j in 1..sample_angle {
            grid.push((std::f64::consts::PI / sample_angle as f64 * j as f64, 0.1 * i as f64));
        }
    }
    grid
}

/// Coarse grid for the 2-D search: the origin plus an `angle_segments x
/// radius_segments` grid of `(theta, radius)` samples.
#[must_use]
pub fn coarse_grid_2d(angle_segments: usize, radius_segments: usize) -> Vec<(f64, f64)> {
    let mut grid = vec![(0.0, 0.0)];
    for i in 1..=angle_segments {
        for j in 1..=radius_segments {
            grid.push((
                std::f64::consts::PI / angle_segments as f64 * (i as f64 - 1.0),
                0.9 / radius_segments as f64 * j as f64,
            ));
        }
    }
    grid
}

fn coarse_seed(grid: &[(f64, f64)], objective: impl Fn(&[f64]) -> f64) -> (f64, f64) {
    let mut best = grid[0];
    let mut best_value = objective(&[best.0, best.1]);
    for &(theta, r) in grid.iter().skip(1) {
        let value = objective(&[theta, r]);
        if value < best_value {
            best_value = value;
            best = (theta, r);
        }
    }
    best
}

fn refine(objective: impl Fn(&[f64]) -> f64, seed: (f64, f64), config: &NelderMeadConfig) -> Complex {
    let starting = nelder_mead::get_starting_points(&[seed.0, seed.1], 0.1);
    let (point, _) = nelder_mead::find_min(objective, starting, config);
    let radius = point[1].clamp(-RADIUS_CLAMP, RADIUS_CLAMP);
    Complex::polar(radius, point[0])
}

/// Search one complex parameter per decomposition level of a 1-D transform,
/// from the top level down to `0`, holding already-found levels fixed.
#[must_use]
pub fn search_1d(input: &[Complex], ratio: f64, resize: ResizeType, config: &NelderMeadConfig) -> Vec<Complex> {
    let levels = ceil_log2(input.len());
    let mut params = vec![Complex::ZERO; levels];
    for level in (0..levels).rev() {
        let base = params.clone();
        let objective = |args: &[f64]| -> f64 {
            let mut trial = base.clone();
            let radius = args[1].clamp(-RADIUS_CLAMP, RADIUS_CLAMP);
            trial[level] = Complex::polar(radius, args[0]);
            let fft = BlaschkeFft::with_function_system(FunctionSystem::from_params(trial));
            compressor1::compression_error_with_fft(&fft, input, ratio, resize)
        };
        let grid = coarse_grid_1d(SAMPLE_RADIUS, SAMPLE_ANGLE);
        let seed = coarse_seed(&grid, &objective);
        params[level] = refine(&objective, seed, config);
        tracing::trace!(level, param = ?params[level], "1-D level search complete");
    }
    params
}

fn fft2_with_trial_row(
    row_params: &[Vec<Complex>],
    col_params: &[Vec<Complex>],
    row_idx: usize,
    level: usize,
    trial: Complex,
) -> BlaschkeFft2 {
    let mut rp = row_params.to_vec();
    rp[row_idx][level] = trial;
    compressor2::fft2_from_params(&rp, col_params)
}

fn fft2_with_trial_col(
    row_params: &[Vec<Complex>],
    col_params: &[Vec<Complex>],
    col_idx: usize,
    level: usize,
    trial: Complex,
) -> BlaschkeFft2 {
    let mut cp = col_params.to_vec();
    cp[col_idx][level] = trial;
    compressor2::fft2_from_params(row_params, &cp)
}

fn objective_2d(args: &[f64]) -> Option<(f64, f64)> {
    let theta = args[0];
    let radius = args[1];
    if radius.abs() > RADIUS_PENALTY_BOUND {
        None
    } else {
        Some((theta, radius))
    }
}

/// Search one complex parameter per decomposition level of every row's and
/// every column's function system, independently: all rows first (levels
/// top-down, each row's system built fresh against the current `col_params`),
/// then all columns (against the now-fixed `row_params`).
#[must_use]
pub fn search_2d(
    input: &Matrix<Complex>,
    ratio: f64,
    resize: ResizeType,
    config: &NelderMeadConfig,
) -> (Vec<Vec<Complex>>, Vec<Vec<Complex>>) {
    let row_levels = ceil_log2(input.cols());
    let col_levels = ceil_log2(input.rows());
    let mut row_params: Vec<Vec<Complex>> = vec![vec![Complex::ZERO; row_levels]; input.rows()];
    let mut col_params: Vec<Vec<Complex>> = vec![vec![Complex::ZERO; col_levels]; input.cols()];
    tracing::debug!(rows = input.rows(), cols = input.cols(), row_levels, col_levels, "starting 2-D parameter search");

    for row_idx in 0..input.rows() {
        for level in (0..row_levels).rev() {
            let objective = |args: &[f64]| -> f64 {
                match objective_2d(args) {
                    None => PENALTY,
                    Some((theta, radius)) => {
                        let fft2 = fft2_with_trial_row(
                            &row_params,
                            &col_params,
                            row_idx,
                            level,
                            Complex::polar(radius, theta),
                        );
                        compressor2::compression_error_with_fft2(&fft2, input, ratio, resize)
                    }
                }
            };
            let grid = coarse_grid_2d(ANGLE_SEGMENTS, RADIUS_SEGMENTS);
            let seed = coarse_seed(&grid, &objective);
            row_params[row_idx][level] = refine(&objective, seed, config);
        }
    }

    for col_idx in 0..input.cols() {
        for level in (0..col_levels).rev() {
            let objective = |args: &[f64]| -> f64 {
                match objective_2d(args) {
                    None => PENALTY,
                    Some((theta, radius)) => {
                        let fft2 = fft2_with_trial_col(
                            &row_params,
                            &col_params,
                            col_idx,
                            level,
                            Complex::polar(radius, theta),
                        );
                        compressor2::compression_error_with_fft2(&fft2, input, ratio, resize)
                    }
                }
            };
            let grid = coarse_grid_2d(ANGLE_SEGMENTS, RADIUS_SEGMENTS);
            let seed = coarse_seed(&grid, &objective);
            col_params[col_idx][level] = refine(&objective, seed, config);
        }
    }

    (row_params, col_params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarse_grid_1d_has_expected_size() {
        let grid = coarse_grid_1d(3, 4);
        assert_eq!(grid.len(), 1 + 2 * 3);
    }

    #[test]
    fn coarse_grid_2d_has_expected_size() {
        let grid = coarse_grid_2d(4, 3);
        assert_eq!(grid.len(), 1 + 4 * 3);
    }

    #[test]
    fn search_1d_produces_one_parameter_per_level() {
        let input: Vec<Complex> = (0..4).map(|i| Complex::new(i as f64, 0.0)).collect();
        let config = NelderMeadConfig { max_iterations: 3, max_shrinks: 1, ..NelderMeadConfig::default() };
        let params = search_1d(&input, 0.5, ResizeType::Truncate, &config);
        assert_eq!(params.len(), ceil_log2(4));
    }

    #[test]
    fn search_1d_does_not_improve_error_on_a_flat_signal() {
        let input = vec![Complex::new(1.0, 0.0); 4];
        let config = NelderMeadConfig { max_iterations: 3, max_shrinks: 1, ..NelderMeadConfig::default() };
        let params = search_1d(&input, 1.0, ResizeType::Truncate, &config);
        let fft = BlaschkeFft::with_function_system(FunctionSystem::from_params(params));
        let err = compressor1::compression_error_with_fft(&fft, &input, 1.0, ResizeType::Truncate);
        assert!(err < 1e-6);
    }

    #[test]
    fn search_2d_produces_params_sized_to_rows_and_cols() {
        let mat = Matrix::from_row_major(2, 2, vec![Complex::new(1.0, 0.0); 4]);
        let config = NelderMeadConfig { max_iterations: 2, max_shrinks: 1, ..NelderMeadConfig::default() };
        let (row_params, col_params) = search_2d(&mat, 1.0, ResizeType::Truncate, &config);
        assert_eq!(row_params.len(), 2);
        assert_eq!(col_params.len(), 2);
    }
}
