//! The 1-D adaptive Blaschke Fourier transform: a butterfly transform whose
//! twiddle factors are the base points of a [`FunctionSystem`] instead of
//! roots of unity. With every parameter at zero this degenerates to the
//! classical radix-2 DFT.

use bfft_complex::Complex;

use crate::function_system::FunctionSystem;
use crate::{interpolation, utils};

/// How an input/output sequence is resampled to/from a power-of-two length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeType {
    /// Zero-extend (forward) or truncate (inverse); cheap, lossy at the
    /// boundary when the sequence isn't already a power of two.
    #[default]
    Truncate,
    /// Resample via piecewise-linear interpolation against the function
    /// system's own (non-uniform) sample positions.
    LinearInterpolate,
}

impl From<ResizeType> for i32 {
    fn from(value: ResizeType) -> Self {
        match value {
            ResizeType::Truncate => 0,
            ResizeType::LinearInterpolate => 1,
        }
    }
}

impl TryFrom<i32> for ResizeType {
    type Error = i32;
    fn try_from(value: i32) -> Result<Self, i32> {
        match value {
            0 => Ok(Self::Truncate),
            1 => Ok(Self::LinearInterpolate),
            other => Err(other),
        }
    }
}

/// A 1-D adaptive Blaschke Fourier transform over a single [`FunctionSystem`].
#[derive(Clone, Debug, Default)]
pub struct BlaschkeFft {
    function_system: FunctionSystem,
}

impl BlaschkeFft {
    /// A transform with the all-zero-parameter (DFT-equivalent) function
    /// system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transform over an existing function system.
    #[must_use]
    pub fn with_function_system(function_system: FunctionSystem) -> Self {
        Self { function_system }
    }

    /// The underlying function system.
    #[must_use]
    pub const fn function_system(&self) -> &FunctionSystem {
        &self.function_system
    }

    /// The underlying function system, mutably.
    pub fn function_system_mut(&mut self) -> &mut FunctionSystem {
        &mut self.function_system
    }

    /// Forward transform. Resamples `input` up to the next power of two
    /// (per `resize`), runs the butterfly network, and returns the
    /// bit-reversed coefficients in natural order.
    #[must_use]
    pub fn forward(&self, input: &[Complex], resize: ResizeType) -> Vec<Complex> {
        debug_assert!(!input.is_empty(), "forward transform needs at least one sample");
        let log_n = utils::ceil_log2(input.len());
        let n = 1usize << log_n;
        let mut c = self.resize_input(input, n, resize);

        let base = self.function_system.base_points_by_level(log_n, Complex::ONE);
        for phase in 0..log_n {
            let part_width = n >> phase;
            let half = part_width / 2;
            let parts = n / part_width;
            let level = &base[log_n - phase];
            for part in 0..parts {
                for b in 0..half {
                    let i = part * part_width + b;
                    let j = i + half;
                    let a = c[i];
                    c[i] = (a + c[j]) * 0.5;
                    c[j] = (a - c[j]).conj_mult(level[b]) * 0.5;
                }
            }
        }
        drop(base);

        bit_reverse(&mut c);
        c
    }

    /// Inverse transform. `out_len == 0` means "same length as the padded
    /// transform size".
    #[must_use]
    pub fn inverse(&self, input: &[Complex], out_len: usize, resize: ResizeType) -> Vec<Complex> {
        debug_assert!(!input.is_empty(), "inverse transform needs at least one coefficient");
        let log_n = utils::ceil_log2(input.len());
        let n = 1usize << log_n;
        let out_len = if out_len == 0 { n } else { out_len };

        let mut c = vec![Complex::ZERO; n];
        let take = input.len().min(n);
        c[..take].copy_from_slice(&input[..take]);
        bit_reverse(&mut c);

        let base = self.function_system.base_points_by_level(log_n, Complex::ONE);
        for phase in 1..=log_n {
            let part_width = 1usize << phase;
            let half = part_width / 2;
            let parts = n / part_width;
            let level = &base[phase];
            for part in 0..parts {
                for b in 0..half {
                    let i = part * part_width + b;
                    let j = i + half;
                    let t = c[j] * level[b];
                    c[j] = c[i] - t;
                    c[i] = c[i] + t;
                }
            }
        }
        drop(base);

        self.resize_output(&c, out_len, resize)
    }

    fn resize_input(&self, input: &[Complex], n: usize, resize: ResizeType) -> Vec<Complex> {
        match resize {
            ResizeType::Truncate => resize_zero_extend(input, n),
            ResizeType::LinearInterpolate => {
                let points = interpolation::create_uniform_interpolation_points(input);
                let log_n = utils::ceil_log2(n);
                let sample_pos = self.function_system.sample_points(log_n, Complex::ONE);
                interpolation::linear_interpolation_vector(&points, &sample_pos)
            }
        }
    }

    fn resize_output(&self, input: &[Complex], n: usize, resize: ResizeType) -> Vec<Complex> {
        match resize {
            ResizeType::Truncate => resize_zero_extend(input, n),
            ResizeType::LinearInterpolate => {
                let log_n = utils::ceil_log2(input.len());
                let sample_pos = self.function_system.sample_points(log_n, Complex::ONE);
                let points = interpolation::create_interpolation_points(&sample_pos, input);
                let uniform = interpolation::create_uniform_sample_points(n);
                interpolation::linear_interpolation_vector(&points, &uniform)
            }
        }
    }
}

fn resize_zero_extend(input: &[Complex], n: usize) -> Vec<Complex> {
    let mut out = vec![Complex::ZERO; n];
    let take = input.len().min(n);
    out[..take].copy_from_slice(&input[..take]);
    out
}

fn bit_reverse(c: &mut [Complex]) {
    let n = c.len();
    if n <= 1 {
        return;
    }
    let mut rev = vec![0usize; n];
    for i in 1..n {
        rev[i] = rev[i / 2] >> 1;
        if i & 1 == 1 {
            rev[i] |= n >> 1;
        }
    }
    for i in 0..n {
        if i < rev[i] {
            c.swap(i, rev[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &[Complex], resize: ResizeType) -> Vec<Complex> {
        let fft = BlaschkeFft::new();
        let forward = fft.forward(input, resize);
        fft.inverse(&forward, input.len(), resize)
    }

    #[test]
    fn zero_param_forward_matches_power_of_two_length() {
        let input: Vec<Complex> = (0..8).map(|i| Complex::new(i as f64, 0.0)).collect();
        let fft = BlaschkeFft::new();
        let out = fft.forward(&input, ResizeType::Truncate);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn forward_then_inverse_round_trips_at_power_of_two_length() {
        let input: Vec<Complex> =
            vec![Complex::new(1.0, 0.0), Complex::new(2.0, -1.0), Complex::new(-3.0, 0.5), Complex::new(0.0, 2.0)];
        let restored = roundtrip(&input, ResizeType::Truncate);
        for (a, b) in input.iter().zip(&restored) {
            assert!((*a - *b).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn forward_then_inverse_round_trips_with_linear_resize() {
        let input: Vec<Complex> = vec![
            Complex::new(1.0, 0.0),
            Complex::new(0.5, -0.5),
            Complex::new(-1.0, 1.0),
            Complex::new(0.25, 0.25),
        ];
        let restored = roundtrip(&input, ResizeType::LinearInterpolate);
        for (a, b) in input.iter().zip(&restored) {
            assert!((*a - *b).abs() < 1e-6, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn bit_reverse_is_an_involution() {
        let mut v: Vec<Complex> = (0..8).map(|i| Complex::new(i as f64, 0.0)).collect();
        let original = v.clone();
        bit_reverse(&mut v);
        bit_reverse(&mut v);
        assert_eq!(v, original);
    }

    #[test]
    fn resize_type_round_trips_through_i32() {
        assert_eq!(ResizeType::try_from(0), Ok(ResizeType::Truncate));
        assert_eq!(ResizeType::try_from(1), Ok(ResizeType::LinearInterpolate));
        assert!(ResizeType::try_from(2).is_err());
    }
}
