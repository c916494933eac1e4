//! The compressed representations produced by [`crate::compressor1`] and
//! [`crate::compressor2`], and the block/channel wrappers the binary
//! container stores them in.

use bfft_complex::Complex;
use bfft_transform::ResizeType;

/// A retained 1-D coefficient: its index into the transformed array and its
/// value.
pub type Coeff1D = (u64, Complex);

/// A retained 2-D coefficient: its row/column index into the transformed
/// matrix and its value.
pub type Coeff2D = (u64, u64, Complex);

/// The compressed form of a single transformed 1-D sequence: a sparse set
/// of ranked coefficients plus everything needed to invert the transform.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedData1D {
    /// Retained `(id, value)` pairs, `id < transformed_size`, unique ids.
    pub coeffs: Vec<Coeff1D>,
    /// The Blaschke parameter vector used for the forward transform.
    pub params: Vec<Complex>,
    /// Padded (power-of-two) transform length.
    pub transformed_size: u64,
    /// Length to resample to on inverse transform.
    pub original_size: u64,
    /// Resampling strategy used at both ends of the transform.
    pub resize_type: ResizeType,
}

/// The compressed form of a single transformed 2-D block.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedData2D {
    /// Retained `(id_row, id_col, value)` triples.
    pub coeffs: Vec<Coeff2D>,
    /// Per-row Blaschke parameter vectors (may be shorter than
    /// `transformed_rows`; missing rows use the default).
    pub row_params: Vec<Vec<Complex>>,
    /// Per-column Blaschke parameter vectors.
    pub col_params: Vec<Vec<Complex>>,
    /// Padded (power-of-two) row count of the transform.
    pub transformed_rows: u64,
    /// Padded (power-of-two) column count of the transform.
    pub transformed_cols: u64,
    /// Row count to crop the inverse transform to.
    pub result_rows: u64,
    /// Column count to crop the inverse transform to.
    pub result_cols: u64,
    /// Resampling strategy used at both ends of the transform.
    pub resize_type: ResizeType,
}

/// One tile of a channel's compressed representation.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedBlock {
    /// Row offset of this tile's top-left corner within the channel.
    pub offset_row: u64,
    /// Column offset of this tile's top-left corner within the channel.
    pub offset_col: u64,
    /// Meaningful row extent of this tile (may be less than the block size
    /// on the bottom edge of the channel).
    pub rows: u64,
    /// Meaningful column extent of this tile (may be less than the block
    /// size on the right edge of the channel).
    pub cols: u64,
    /// The tile's compressed transform data.
    pub data: CompressedData2D,
}

/// A single colour channel's full set of compressed tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockedChannel {
    /// The channel's tiles, in tiling (row-major block) order.
    pub blocks: Vec<CompressedBlock>,
    /// Full channel row count.
    pub rows: u64,
    /// Full channel column count.
    pub cols: u64,
}
