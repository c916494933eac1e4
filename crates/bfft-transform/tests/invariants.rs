//! Property-based invariants spanning the function system and the 1-D
//! transform built on it.

use bfft_complex::Complex;
use bfft_transform::function_system::FunctionSystem;
use bfft_transform::{BlaschkeFft, ResizeType};
use proptest::prelude::*;

/// Parameters strictly inside the unit disk, radius-clamped the way the
/// optimiser clamps them.
fn disk_param() -> impl Strategy<Value = Complex> {
    (0.0f64..0.98, 0.0f64..std::f64::consts::TAU).prop_map(|(r, theta)| Complex::polar(r, theta))
}

fn disk_params(levels: usize) -> impl Strategy<Value = Vec<Complex>> {
    prop::collection::vec(disk_param(), levels)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    /// For any parameter vector strictly inside the unit disk, every computed
    /// base point lies within `1e-6` of the unit circle.
    #[test]
    fn base_points_stay_on_unit_circle(params in disk_params(4)) {
        let fs = FunctionSystem::from_params(params);
        let base = fs.base_points(4, Complex::ONE);
        for p in base.iter() {
            prop_assert!((p.abs() - 1.0).abs() < 1e-6, "{p:?} has magnitude {}", p.abs());
        }
    }

    /// Forward BFT followed by inverse BFT is the identity (up to the
    /// next-power-of-two padding) at ratio 1.0 with truncating resize,
    /// for any in-disk parameter vector.
    #[test]
    fn forward_then_inverse_is_identity_for_any_params(
        params in disk_params(3),
        values in prop::collection::vec(-100.0f64..100.0, 8),
    ) {
        let input: Vec<Complex> = values.into_iter().map(Complex::from_real).collect();
        let fft = BlaschkeFft::with_function_system(FunctionSystem::from_params(params));
        let forward = fft.forward(&input, ResizeType::Truncate);
        let restored = fft.inverse(&forward, input.len(), ResizeType::Truncate);
        for (a, b) in input.iter().zip(&restored) {
            prop_assert!((*a - *b).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    /// With every parameter at zero, the forward transform matches a
    /// directly-computed radix-2 DFT.
    #[test]
    fn zero_params_match_reference_dft(
        values in prop::collection::vec(-50.0f64..50.0, 8),
    ) {
        let input: Vec<Complex> = values.into_iter().map(Complex::from_real).collect();
        let fft = BlaschkeFft::new();
        let got = fft.forward(&input, ResizeType::Truncate);
        let want = reference_dft(&input);
        for (a, b) in got.iter().zip(&want) {
            prop_assert!((*a - *b).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }
}

/// Direct `O(n^2)` DFT, scaled the same way the butterfly's repeated
/// halvings scale its output (`1 / n` overall).
fn reference_dft(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    let mut out = vec![Complex::ZERO; n];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut sum = Complex::ZERO;
        for (t, &x) in input.iter().enumerate() {
            let angle = -std::f64::consts::TAU * (k * t) as f64 / n as f64;
            sum += x * Complex::polar(1.0, angle);
        }
        *slot = sum / n as f64;
    }
    out
}

#[test]
fn reference_dft_matches_butterfly_on_impulse() {
    let input: Vec<Complex> = vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        .into_iter()
        .map(Complex::from_real)
        .collect();
    let want = reference_dft(&input);
    for w in &want {
        assert!((w.real - 0.125).abs() < 1e-12, "{w:?}");
    }
}
