//! Fixed-size square tiling of a channel matrix, carrying each tile's true
//! extent for the tiles that fall on the right/bottom edge of the channel.

use bfft_complex::Complex;
use bfft_matrix::Matrix;

/// One tile: its placement within the channel, its meaningful extent, and
/// the always-full-size `block_size x block_size` pixel data (zero-padded
/// beyond `rows`/`cols` on edge tiles, so every tile transforms the same
/// shape regardless of where it sits in the channel).
#[derive(Clone, Debug)]
pub struct Tile {
    /// Row offset of the tile's top-left corner within the channel.
    pub offset_row: usize,
    /// Column offset of the tile's top-left corner within the channel.
    pub offset_col: usize,
    /// Meaningful row extent (`<= block_size`).
    pub rows: usize,
    /// Meaningful column extent (`<= block_size`).
    pub cols: usize,
    /// The full `block_size x block_size` submatrix.
    pub data: Matrix<Complex>,
}

/// Split `channel` into row-major `block_size x block_size` tiles.
#[must_use]
pub fn tile(channel: &Matrix<Complex>, block_size: usize) -> Vec<Tile> {
    let rows = channel.rows();
    let cols = channel.cols();
    let mut tiles = Vec::new();
    let mut offset_row = 0;
    while offset_row < rows {
        let mut offset_col = 0;
        while offset_col < cols {
            let tile_rows = (rows - offset_row).min(block_size);
            let tile_cols = (cols - offset_col).min(block_size);
            let data = Matrix::submatrix(channel, offset_row, offset_col, block_size, block_size);
            tiles.push(Tile { offset_row, offset_col, rows: tile_rows, cols: tile_cols, data });
            offset_col += block_size;
        }
        offset_row += block_size;
    }
    tiles
}
