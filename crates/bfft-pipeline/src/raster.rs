//! Interleaved raster `<->` per-channel [`Matrix<Complex>`] conversion,
//! delegating format sniffing/decoding and PNG encoding to the `image`
//! crate.

use std::path::Path;

use bfft_complex::Complex;
use bfft_matrix::Matrix;
use image::GenericImageView;

use crate::error::PipelineError;

/// Decode `path` and split it into `channels` planes (forcing the channel
/// count if given, otherwise using the source's native channel count),
/// each a `height x width` matrix of samples centred around zero
/// (`pixel_byte - 128`, imaginary part zero).
pub fn load_channels(path: &Path, channels: Option<u8>) -> Result<Vec<Matrix<Complex>>, PipelineError> {
    let img = image::open(path)?;
    let channel_count = channels.unwrap_or_else(|| img.color().channel_count());
    if !(1..=4).contains(&channel_count) {
        return Err(PipelineError::InvalidChannelCount(channel_count));
    }
    let (width, height) = img.dimensions();
    let raw: Vec<u8> = match channel_count {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        other => return Err(PipelineError::InvalidChannelCount(other)),
    };
    Ok(split_interleaved(&raw, width as usize, height as usize, channel_count as usize))
}

fn split_interleaved(raw: &[u8], width: usize, height: usize, channel_count: usize) -> Vec<Matrix<Complex>> {
    let mut channels = vec![Matrix::<Complex>::new(height, width); channel_count];
    for row in 0..height {
        for col in 0..width {
            let base = (row * width + col) * channel_count;
            for (c, channel) in channels.iter_mut().enumerate() {
                let byte = raw[base + c];
                channel.set(row, col, Complex::from_real(f64::from(byte) - 128.0));
            }
        }
    }
    channels
}

/// Re-interleave `channels` (each `rows x cols`, samples centred around
/// zero) into an 8-bit raster and save it to `path`, shifting back by
/// `+128` and clamping to `[0, 255]`. The output format is inferred from
/// `path`'s extension.
pub fn save_channels(path: &Path, channels: &[Matrix<Complex>], rows: usize, cols: usize) -> Result<(), PipelineError> {
    let channel_count = channels.len();
    let mut raw = vec![0u8; rows * cols * channel_count];
    for row in 0..rows {
        for col in 0..cols {
            let base = (row * cols + col) * channel_count;
            for (c, channel) in channels.iter().enumerate() {
                let value = channel.get(row, col).real + 128.0;
                raw[base + c] = value.clamp(0.0, 255.0) as u8;
            }
        }
    }

    let width = cols as u32;
    let height = rows as u32;
    match channel_count {
        1 => image::GrayImage::from_raw(width, height, raw)
            .expect("raw buffer sized to width * height * 1")
            .save(path)?,
        2 => image::GrayAlphaImage::from_raw(width, height, raw)
            .expect("raw buffer sized to width * height * 2")
            .save(path)?,
        3 => image::RgbImage::from_raw(width, height, raw)
            .expect("raw buffer sized to width * height * 3")
            .save(path)?,
        4 => image::RgbaImage::from_raw(width, height, raw)
            .expect("raw buffer sized to width * height * 4")
            .save(path)?,
        other => return Err(PipelineError::InvalidChannelCount(other as u8)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_interleaved_centres_bytes_around_zero() {
        let raw = vec![0u8, 128, 255];
        let channels = split_interleaved(&raw, 3, 1, 1);
        assert_eq!(channels.len(), 1);
        assert!((channels[0].get(0, 0).real - (-128.0)).abs() < 1e-9);
        assert!((channels[0].get(0, 1).real - 0.0).abs() < 1e-9);
        assert!((channels[0].get(0, 2).real - 127.0).abs() < 1e-9);
    }

    #[test]
    fn split_interleaved_deinterleaves_multiple_channels() {
        let raw = vec![10u8, 20, 30, 40, 50, 60];
        let channels = split_interleaved(&raw, 1, 2, 3);
        assert_eq!(channels.len(), 3);
        assert!((channels[0].get(1, 0).real - (40.0 - 128.0)).abs() < 1e-9);
        assert!((channels[2].get(0, 0).real - (30.0 - 128.0)).abs() < 1e-9);
    }

    #[test]
    fn save_and_reload_round_trips_through_png() {
        let mut path = std::env::temp_dir();
        path.push(format!("bfft-pipeline-raster-test-{}.png", std::process::id()));

        let channel = Matrix::<Complex>::from_row_major(
            2,
            2,
            vec![Complex::from_real(-64.0), Complex::from_real(0.0), Complex::from_real(63.0), Complex::from_real(127.0)],
        );
        save_channels(&path, &[channel], 2, 2).expect("save succeeds");
        let reloaded = load_channels(&path, Some(1)).expect("reload succeeds");
        std::fs::remove_file(&path).expect("cleanup succeeds");

        assert_eq!(reloaded.len(), 1);
        assert!((reloaded[0].get(0, 0).real - (-64.0)).abs() < 1e-9);
        assert!((reloaded[0].get(1, 1).real - 127.0).abs() < 1e-9);
    }
}
