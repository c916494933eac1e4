//! Block-tiled, channel-parallel decompression: the inverse of
//! [`crate::compress`] — each stored block is inverse-transformed
//! independently (again across `rayon`'s pool), cropped to its recorded
//! true extent, and pasted back into its channel at the recorded offset.

use std::path::Path;

use bfft_codec::{compressor2, BlockedChannel};
use bfft_complex::Complex;
use bfft_matrix::Matrix;
use rayon::prelude::*;

use crate::error::PipelineError;
use crate::raster;

/// Decompress one channel's blocks and paste them back into a
/// `rows x cols` matrix at their recorded offsets. Placement does not
/// depend on completion order — each block already carries its own
/// `(offset_row, offset_col)`.
#[must_use]
pub fn decompress_channel(channel: &BlockedChannel) -> Matrix<Complex> {
    let restored: Vec<(usize, usize, Matrix<Complex>)> = channel
        .blocks
        .par_iter()
        .map(|block| {
            let full = compressor2::decompress(&block.data);
            let cropped = Matrix::submatrix(&full, 0, 0, block.rows as usize, block.cols as usize);
            tracing::debug!(offset_row = block.offset_row, offset_col = block.offset_col, "decompressed block");
            (block.offset_row as usize, block.offset_col as usize, cropped)
        })
        .collect();

    let mut out = Matrix::new(channel.rows as usize, channel.cols as usize);
    for (offset_row, offset_col, data) in restored {
        Matrix::copy_into_at(&mut out, &data, offset_row, offset_col);
    }
    out
}

/// Decompress every channel and write the reassembled raster to `dest`.
pub fn decompress_image(channels: &[BlockedChannel], dest: &Path) -> Result<(), PipelineError> {
    let restored: Vec<Matrix<Complex>> = channels.iter().map(decompress_channel).collect();
    let (rows, cols) = restored.first().map_or((0, 0), |m| (m.rows(), m.cols()));
    tracing::info!(path = %dest.display(), channels = restored.len(), "writing reconstructed image");
    raster::save_channels(dest, &restored, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfft_codec::CompressedBlock;
    use bfft_transform::ResizeType;

    fn exact_block(offset_row: u64, offset_col: u64, fill: f64) -> (CompressedBlock, Matrix<Complex>) {
        let tile = Matrix::from_row_major(
            2,
            2,
            vec![Complex::from_real(fill), Complex::from_real(fill + 1.0), Complex::from_real(fill + 2.0), Complex::from_real(fill + 3.0)],
        );
        let data = compressor2::compress(&tile, &[], &[], 1.0, ResizeType::Truncate);
        (CompressedBlock { offset_row, offset_col, rows: 2, cols: 2, data }, tile)
    }

    #[test]
    fn decompress_channel_places_blocks_at_their_offsets() {
        let (block_a, tile_a) = exact_block(0, 0, 0.0);
        let (block_b, tile_b) = exact_block(0, 2, 10.0);
        let channel = BlockedChannel { blocks: vec![block_a, block_b], rows: 2, cols: 4 };
        let restored = decompress_channel(&channel);
        assert_eq!(restored.rows(), 2);
        assert_eq!(restored.cols(), 4);
        for i in 0..2 {
            for j in 0..2 {
                assert!((restored.get(i, j) - tile_a.get(i, j)).abs() < 1e-9);
                assert!((restored.get(i, j + 2) - tile_b.get(i, j)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn decompress_channel_crops_edge_blocks_to_their_true_extent() {
        let (mut block, tile) = exact_block(0, 0, 0.0);
        block.rows = 1;
        block.cols = 1;
        let channel = BlockedChannel { blocks: vec![block], rows: 1, cols: 1 };
        let restored = decompress_channel(&channel);
        assert_eq!(restored.rows(), 1);
        assert_eq!(restored.cols(), 1);
        assert!((restored.get(0, 0) - tile.get(0, 0)).abs() < 1e-9);
    }
}
