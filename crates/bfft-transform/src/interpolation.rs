//! Piecewise-linear interpolation between irregularly spaced points.
//!
//! The adaptive transform's base points don't sit at uniform angles once a
//! block's Blaschke parameters move off zero, so resampling between the
//! transform's native (non-uniform) domain and a uniform pixel/coefficient
//! grid goes through [`InterpolationPoint`] pairs rather than a closed-form
//! resampler.

use std::ops::{Add, Mul, Sub};

use bfft_complex::Complex;

/// A `(position, value)` sample used as an interpolation anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolationPoint<U> {
    /// Position along the 1-D domain.
    pub pos: f64,
    /// Value at that position.
    pub val: U,
}

impl<U> InterpolationPoint<U> {
    /// Build a point.
    #[inline]
    pub const fn new(pos: f64, val: U) -> Self {
        Self { pos, val }
    }
}

fn lerp<U>(p0: InterpolationPoint<U>, p1: InterpolationPoint<U>, x: f64) -> U
where
    U: Copy + Add<Output = U> + Sub<Output = U> + Mul<f64, Output = U>,
{
    if p0.pos == p1.pos {
        return p0.val;
    }
    p0.val + (p1.val - p0.val) * ((x - p0.pos) / (p1.pos - p0.pos))
}

/// Resample `base_points` (sorted by `pos`) at each position in `sample_pos`
/// (assumed non-decreasing), linearly interpolating between the two nearest
/// anchors and clamping to the first/last anchor outside the domain.
#[must_use]
pub fn linear_interpolation_vector<U>(
    base_points: &[InterpolationPoint<U>],
    sample_pos: &[f64],
) -> Vec<U>
where
    U: Copy + Add<Output = U> + Sub<Output = U> + Mul<f64, Output = U>,
{
    debug_assert!(!base_points.is_empty(), "need at least one base point");
    let base_size = base_points.len();
    let mut result = Vec::with_capacity(sample_pos.len());
    let mut j = 0usize;
    for &x in sample_pos {
        while j < base_size && base_points[j].pos < x {
            j += 1;
        }
        let idx_prev = j.saturating_sub(1);
        let idx_next = if j < base_size { j } else { base_size - 1 };
        result.push(lerp(base_points[idx_prev], base_points[idx_next], x));
    }
    result
}

/// `[0/n, 1/n, ..., (n-1)/n]`.
#[must_use]
pub fn create_uniform_sample_points(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / n as f64).collect()
}

/// Pair `values` with uniformly spaced positions `i / values.len()`.
#[must_use]
pub fn create_uniform_interpolation_points<U: Copy>(values: &[U]) -> Vec<InterpolationPoint<U>> {
    create_interpolation_points(&create_uniform_sample_points(values.len()), values)
}

/// Zip `pos` and `val` into interpolation anchors (same length required).
#[must_use]
pub fn create_interpolation_points<U: Copy>(pos: &[f64], val: &[U]) -> Vec<InterpolationPoint<U>> {
    debug_assert_eq!(pos.len(), val.len(), "positions and values must pair up");
    pos.iter().zip(val).map(|(&p, &v)| InterpolationPoint::new(p, v)).collect()
}

/// Map a level's base points (on the unit circle) onto normalized angular
/// positions in `[0, 1)`, rotated so the smallest position comes first and
/// made monotonically non-decreasing (unwrapping the `2*pi` branch cut).
#[must_use]
pub fn sample_positions_from_base(base: &[Complex]) -> Vec<f64> {
    let tau = std::f64::consts::TAU;
    let mut pos: Vec<f64> = base
        .iter()
        .map(|b| {
            let mut angle = b.real.clamp(-1.0, 1.0).acos();
            if b.imag < 0.0 {
                angle = tau - angle;
            }
            angle / tau
        })
        .collect();

    if pos.is_empty() {
        return pos;
    }

    let mut idx = 0usize;
    let mut min_val = pos[0];
    for (i, &p) in pos.iter().enumerate().skip(1) {
        if p < min_val {
            min_val = p;
            idx = i;
        }
    }
    for p in pos.iter_mut().take(idx) {
        *p -= 1.0;
    }
    for i in 0..pos.len().saturating_sub(1) {
        if pos[i + 1] < pos[i] {
            pos[i + 1] += 1.0;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_midpoint_of_two_reals() {
        let base = create_interpolation_points(&[0.0, 1.0], &[0.0_f64, 10.0]);
        let out = linear_interpolation_vector(&base, &[0.5]);
        assert!((out[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_domain() {
        let base = create_interpolation_points(&[0.0, 1.0], &[0.0_f64, 10.0]);
        let out = linear_interpolation_vector(&base, &[-1.0, 2.0]);
        assert_eq!(out, vec![0.0, 10.0]);
    }

    #[test]
    fn identity_on_matching_uniform_grid() {
        let values = vec![1.0_f64, 2.0, 3.0, 4.0];
        let base = create_uniform_interpolation_points(&values);
        let out = linear_interpolation_vector(&base, &create_uniform_sample_points(4));
        for (a, b) in out.iter().zip(&values) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn coincident_positions_return_first_value() {
        let base = [InterpolationPoint::new(0.5, 7.0_f64), InterpolationPoint::new(0.5, 9.0)];
        let out = linear_interpolation_vector(&base, &[0.5]);
        assert_eq!(out[0], 7.0);
    }

    #[test]
    fn sample_positions_are_monotonic() {
        let base = vec![
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, -1.0),
        ];
        let pos = sample_positions_from_base(&base);
        for w in pos.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }
}
