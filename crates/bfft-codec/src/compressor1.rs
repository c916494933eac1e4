//! The 1-D compressor: forward transform, magnitude-ranked coefficient
//! retention, inverse transform.

use bfft_complex::Complex;
use bfft_transform::{BlaschkeFft, FunctionSystem, ResizeType};

use crate::metrics::mean_abs_error;
use crate::ranking::{rank_1d, retain_count};
use crate::types::CompressedData1D;

/// Forward-transform `input` under `params`, keep the top `ratio` fraction
/// of coefficients by magnitude.
#[must_use]
pub fn compress(input: &[Complex], params: &[Complex], ratio: f64, resize: ResizeType) -> CompressedData1D {
    let fft = BlaschkeFft::with_function_system(FunctionSystem::from_params(params.to_vec()));
    let transformed = fft.forward(input, resize);
    let ranked = rank_1d(&transformed);
    let keep = retain_count(ratio, ranked.len());
    CompressedData1D {
        coeffs: ranked.into_iter().take(keep).collect(),
        params: params.to_vec(),
        transformed_size: transformed.len() as u64,
        original_size: input.len() as u64,
        resize_type: resize,
    }
}

/// Scatter the retained coefficients and inverse-transform.
#[must_use]
pub fn decompress(data: &CompressedData1D) -> Vec<Complex> {
    let mut transformed = vec![Complex::ZERO; data.transformed_size as usize];
    for &(id, value) in &data.coeffs {
        transformed[id as usize] = value;
    }
    let fft = BlaschkeFft::with_function_system(FunctionSystem::from_params(data.params.clone()));
    fft.inverse(&transformed, data.original_size as usize, data.resize_type)
}

/// Compress then decompress `input` and report the mean-magnitude
/// reconstruction error. Allocates a fresh function system per call; the
/// optimiser's inner loop should prefer
/// [`compression_error_with_fft`] instead.
#[must_use]
pub fn compression_error(input: &[Complex], params: &[Complex], ratio: f64, resize: ResizeType) -> f64 {
    let compressed = compress(input, params, ratio, resize);
    let restored = decompress(&compressed);
    mean_abs_error(input, &restored)
}

/// Allocation-light variant of [`compression_error`] for an already-built
/// [`BlaschkeFft`] (its function system already carries the candidate
/// parameters): forward-transform, zero everything but the retained
/// coefficients in place, inverse-transform, and return the residual.
#[must_use]
pub fn compression_error_with_fft(fft: &BlaschkeFft, input: &[Complex], ratio: f64, resize: ResizeType) -> f64 {
    let transformed = fft.forward(input, resize);
    let ranked = rank_1d(&transformed);
    let keep = retain_count(ratio, ranked.len());
    let mut kept = vec![Complex::ZERO; transformed.len()];
    for &(id, value) in ranked.iter().take(keep) {
        kept[id as usize] = value;
    }
    let restored = fft.inverse(&kept, input.len(), resize);
    mean_abs_error(input, &restored)
}
