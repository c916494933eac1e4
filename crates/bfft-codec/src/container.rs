//! Deterministic little-endian binary container for an image's compressed
//! representation.
//!
//! Layout (no header magic, no version byte):
//!
//! ```text
//! num_channels: u64
//! for each channel:
//!   num_blocks: u64
//!   for each block:
//!     offset_row, offset_col, rows, cols: u64
//!     num_coeffs: u64
//!     for each coeff: id_row, id_col: u64, u64; value_real, value_imag: f64, f64
//!     num_row_param_vectors: u64
//!     for each: num_params: u64, then num_params x (f64, f64)
//!     num_col_param_vectors: u64 (same shape)
//!     transformed_rows, transformed_cols, result_rows, result_cols: u64
//!     resize_type: i32
//!   channel_rows, channel_cols: u64
//! ```

use std::io::{Read, Write};

use bfft_complex::Complex;
use bfft_transform::ResizeType;

use crate::error::CodecError;
use crate::types::{BlockedChannel, CompressedBlock, CompressedData2D};

fn write_u64<W: Write>(w: &mut W, value: u64) -> Result<(), CodecError> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_f64<W: Write>(w: &mut W, value: f64) -> Result<(), CodecError> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<(), CodecError> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_complex<W: Write>(w: &mut W, value: Complex) -> Result<(), CodecError> {
    write_f64(w, value.real)?;
    write_f64(w, value.imag)
}

fn read_u64<R: Read>(r: &mut R, what: &'static str) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(|_| CodecError::UnexpectedEof { what })?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f64<R: Read>(r: &mut R, what: &'static str) -> Result<f64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(|_| CodecError::UnexpectedEof { what })?;
    Ok(f64::from_le_bytes(buf))
}

fn read_i32<R: Read>(r: &mut R, what: &'static str) -> Result<i32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|_| CodecError::UnexpectedEof { what })?;
    Ok(i32::from_le_bytes(buf))
}

fn read_complex<R: Read>(r: &mut R, what: &'static str) -> Result<Complex, CodecError> {
    let real = read_f64(r, what)?;
    let imag = read_f64(r, what)?;
    Ok(Complex::new(real, imag))
}

fn write_param_vectors<W: Write>(w: &mut W, vectors: &[Vec<Complex>]) -> Result<(), CodecError> {
    write_u64(w, vectors.len() as u64)?;
    for params in vectors {
        write_u64(w, params.len() as u64)?;
        for &p in params {
            write_complex(w, p)?;
        }
    }
    Ok(())
}

fn read_param_vectors<R: Read>(r: &mut R) -> Result<Vec<Vec<Complex>>, CodecError> {
    let count = read_u64(r, "parameter vector count")?;
    let mut vectors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_u64(r, "parameter vector length")?;
        let mut params = Vec::with_capacity(len as usize);
        for _ in 0..len {
            params.push(read_complex(r, "Blaschke parameter")?);
        }
        vectors.push(params);
    }
    Ok(vectors)
}

fn write_compressed_data_2d<W: Write>(w: &mut W, data: &CompressedData2D) -> Result<(), CodecError> {
    write_u64(w, data.coeffs.len() as u64)?;
    for &(row, col, value) in &data.coeffs {
        write_u64(w, row)?;
        write_u64(w, col)?;
        write_complex(w, value)?;
    }
    write_param_vectors(w, &data.row_params)?;
    write_param_vectors(w, &data.col_params)?;
    write_u64(w, data.transformed_rows)?;
    write_u64(w, data.transformed_cols)?;
    write_u64(w, data.result_rows)?;
    write_u64(w, data.result_cols)?;
    write_i32(w, data.resize_type.into())
}

fn read_compressed_data_2d<R: Read>(r: &mut R) -> Result<CompressedData2D, CodecError> {
    let num_coeffs = read_u64(r, "coefficient count")?;
    let mut coeffs = Vec::with_capacity(num_coeffs as usize);
    for _ in 0..num_coeffs {
        let id_row = read_u64(r, "coefficient row id")?;
        let id_col = read_u64(r, "coefficient column id")?;
        let value = read_complex(r, "coefficient value")?;
        coeffs.push((id_row, id_col, value));
    }
    let row_params = read_param_vectors(r)?;
    let col_params = read_param_vectors(r)?;
    let transformed_rows = read_u64(r, "transformed row count")?;
    let transformed_cols = read_u64(r, "transformed column count")?;
    let result_rows = read_u64(r, "result row count")?;
    let result_cols = read_u64(r, "result column count")?;
    let resize_tag = read_i32(r, "resize type")?;
    let resize_type = ResizeType::try_from(resize_tag).map_err(CodecError::InvalidResizeType)?;
    Ok(CompressedData2D {
        coeffs,
        row_params,
        col_params,
        transformed_rows,
        transformed_cols,
        result_rows,
        result_cols,
        resize_type,
    })
}

fn write_compressed_block<W: Write>(w: &mut W, block: &CompressedBlock) -> Result<(), CodecError> {
    write_u64(w, block.offset_row)?;
    write_u64(w, block.offset_col)?;
    write_u64(w, block.rows)?;
    write_u64(w, block.cols)?;
    write_compressed_data_2d(w, &block.data)
}

fn read_compressed_block<R: Read>(r: &mut R) -> Result<CompressedBlock, CodecError> {
    let offset_row = read_u64(r, "block offset_row")?;
    let offset_col = read_u64(r, "block offset_col")?;
    let rows = read_u64(r, "block rows")?;
    let cols = read_u64(r, "block cols")?;
    let data = read_compressed_data_2d(r)?;
    Ok(CompressedBlock { offset_row, offset_col, rows, cols, data })
}

/// Write one channel's blocks to `w`.
pub fn write_blocked_channel<W: Write>(w: &mut W, channel: &BlockedChannel) -> Result<(), CodecError> {
    write_u64(w, channel.blocks.len() as u64)?;
    for block in &channel.blocks {
        write_compressed_block(w, block)?;
    }
    write_u64(w, channel.rows)?;
    write_u64(w, channel.cols)
}

/// Read one channel's blocks from `r`.
pub fn read_blocked_channel<R: Read>(r: &mut R) -> Result<BlockedChannel, CodecError> {
    let num_blocks = read_u64(r, "block count")?;
    let mut blocks = Vec::with_capacity(num_blocks as usize);
    for _ in 0..num_blocks {
        blocks.push(read_compressed_block(r)?);
    }
    let rows = read_u64(r, "channel rows")?;
    let cols = read_u64(r, "channel cols")?;
    Ok(BlockedChannel { blocks, rows, cols })
}

/// Write a full compressed image (one [`BlockedChannel`] per colour
/// channel) to `w`.
pub fn write_image<W: Write>(w: &mut W, channels: &[BlockedChannel]) -> Result<(), CodecError> {
    write_u64(w, channels.len() as u64)?;
    for channel in channels {
        write_blocked_channel(w, channel)?;
    }
    tracing::debug!(channels = channels.len(), "wrote container");
    Ok(())
}

/// Read a full compressed image from `r`. Rejects any bytes found after the
/// last expected structure.
pub fn read_image<R: Read>(r: &mut R) -> Result<Vec<BlockedChannel>, CodecError> {
    let num_channels = read_u64(r, "channel count")?;
    let mut channels = Vec::with_capacity(num_channels as usize);
    for _ in 0..num_channels {
        channels.push(read_blocked_channel(r)?);
    }

    let mut probe = [0u8; 1];
    match r.read(&mut probe) {
        Ok(0) => {
            tracing::debug!(channels = channels.len(), "read container");
            Ok(channels)
        }
        Ok(_) => Err(CodecError::TrailingBytes(1)),
        Err(e) => Err(CodecError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn sample_image() -> Vec<BlockedChannel> {
        let data = CompressedData2D {
            coeffs: vec![(0, 0, Complex::new(1.0, -2.0)), (1, 2, Complex::new(0.5, 0.0))],
            row_params: vec![vec![Complex::new(0.1, 0.2)]],
            col_params: vec![],
            transformed_rows: 4,
            transformed_cols: 4,
            result_rows: 3,
            result_cols: 4,
            resize_type: ResizeType::LinearInterpolate,
        };
        let block = CompressedBlock { offset_row: 0, offset_col: 0, rows: 3, cols: 4, data };
        vec![BlockedChannel { blocks: vec![block], rows: 3, cols: 4 }]
    }

    #[test]
    fn round_trips_through_bytes() {
        let image = sample_image();
        let mut buf = Vec::new();
        write_image(&mut buf, &image).expect("write succeeds");
        let decoded = read_image(&mut Cursor::new(buf)).expect("read succeeds");
        assert_eq!(decoded, image);
    }

    #[test]
    fn rejects_truncated_input() {
        let image = sample_image();
        let mut buf = Vec::new();
        write_image(&mut buf, &image).expect("write succeeds");
        buf.truncate(buf.len() - 4);
        let err = read_image(&mut Cursor::new(buf)).expect_err("truncated read must fail");
        assert!(matches!(err, CodecError::UnexpectedEof { .. }));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let image = sample_image();
        let mut buf = Vec::new();
        write_image(&mut buf, &image).expect("write succeeds");
        buf.push(0xFF);
        let err = read_image(&mut Cursor::new(buf)).expect_err("trailing byte must fail");
        assert!(matches!(err, CodecError::TrailingBytes(_)));
    }

    #[test]
    fn rejects_invalid_resize_type_tag() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 0).unwrap(); // num_coeffs
        write_u64(&mut buf, 0).unwrap(); // num_row_param_vectors
        write_u64(&mut buf, 0).unwrap(); // num_col_param_vectors
        write_u64(&mut buf, 1).unwrap(); // transformed_rows
        write_u64(&mut buf, 1).unwrap(); // transformed_cols
        write_u64(&mut buf, 1).unwrap(); // result_rows
        write_u64(&mut buf, 1).unwrap(); // result_cols
        write_i32(&mut buf, 7).unwrap(); // invalid resize type
        let err = read_compressed_data_2d(&mut Cursor::new(buf)).expect_err("invalid tag must fail");
        assert!(matches!(err, CodecError::InvalidResizeType(7)));
    }
}
