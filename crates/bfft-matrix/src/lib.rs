//! A dense 2-D array with an `O(1)` logical transpose.
//!
//! Storage is always physical row-major; [`Matrix::transpose`] just flips a
//! flag that swaps how `(row, col)` maps onto the backing buffer, so callers
//! can treat a matrix and its transpose interchangeably without copying
//! memory. Row- and column-wise algorithms (the separable 2-D BFT in
//! `bfft-transform`) pull a logical row or column out as an owned `Vec<T>`,
//! operate on it, and write it back — see [`Matrix::row`]/[`Matrix::set_row`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::ops::{Index, IndexMut};

/// Dense `rows x cols` matrix with a logical transpose flag.
#[derive(Clone, Debug)]
pub struct Matrix<T> {
    data: Vec<T>,
    phys_rows: usize,
    phys_cols: usize,
    transposed: bool,
}

impl<T: Copy + Default> Matrix<T> {
    /// Build a zero-filled matrix of the given logical shape.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            phys_rows: rows,
            phys_cols: cols,
            transposed: false,
        }
    }

    /// Build a matrix from row-major data, which must have exactly
    /// `rows * cols` elements.
    #[must_use]
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols, "row-major data must match shape");
        Self { data, phys_rows: rows, phys_cols: cols, transposed: false }
    }

    /// Number of logical rows (post-transpose).
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        if self.transposed { self.phys_cols } else { self.phys_rows }
    }

    /// Number of logical columns (post-transpose).
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        if self.transposed { self.phys_rows } else { self.phys_cols }
    }

    /// Flip the logical transpose flag. `O(1)`, no data movement.
    #[inline]
    pub fn transpose(&mut self) {
        self.transposed = !self.transposed;
    }

    #[inline]
    fn phys_offset(&self, row: usize, col: usize) -> usize {
        let (r, c) = if self.transposed { (col, row) } else { (row, col) };
        r * self.phys_cols + c
    }

    /// Read the logical element at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.phys_offset(row, col)]
    }

    /// Write the logical element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let offset = self.phys_offset(row, col);
        self.data[offset] = value;
    }

    /// Copy out logical row `i` as an owned vector.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.cols()).map(|j| self.get(i, j)).collect()
    }

    /// Copy out logical column `j` as an owned vector.
    #[must_use]
    pub fn col(&self, j: usize) -> Vec<T> {
        (0..self.rows()).map(|i| self.get(i, j)).collect()
    }

    /// Overwrite logical row `i` from `values`, truncating or ignoring extra
    /// values if `values.len() != cols()`.
    pub fn set_row(&mut self, i: usize, values: &[T]) {
        for (j, &v) in values.iter().enumerate().take(self.cols()) {
            self.set(i, j, v);
        }
    }

    /// Overwrite logical column `j` from `values`, truncating or ignoring
    /// extra values if `values.len() != rows()`.
    pub fn set_col(&mut self, j: usize, values: &[T]) {
        for (i, &v) in values.iter().enumerate().take(self.rows()) {
            self.set(i, j, v);
        }
    }

    /// Flatten the logical matrix into row-major order (independent of the
    /// physical layout / transpose flag).
    #[must_use]
    pub fn to_row_major(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.rows() * self.cols());
        for i in 0..self.rows() {
            out.extend(self.row(i));
        }
        out
    }

    /// Copy the overlapping region of `src` into `dst`, leaving any
    /// remaining `dst` cells untouched (typically zero, for a freshly
    /// allocated destination — this is how forward transforms zero-extend
    /// a matrix up to the next power-of-two shape).
    pub fn copy_into(dst: &mut Self, src: &Self) {
        let rows = dst.rows().min(src.rows());
        let cols = dst.cols().min(src.cols());
        for i in 0..rows {
            let row = src.row(i);
            dst.set_row(i, &row[..cols]);
        }
    }

    /// Paste `src` into `dst` at `(offset_row, offset_col)`, clipping
    /// whatever falls outside `dst`'s bounds.
    pub fn copy_into_at(dst: &mut Self, src: &Self, offset_row: usize, offset_col: usize) {
        for i in 0..src.rows() {
            let Some(dst_row) = offset_row.checked_add(i).filter(|&r| r < dst.rows()) else {
                continue;
            };
            for j in 0..src.cols() {
                let Some(dst_col) = offset_col.checked_add(j).filter(|&c| c < dst.cols()) else {
                    continue;
                };
                dst.set(dst_row, dst_col, src.get(i, j));
            }
        }
    }

    /// Extract a `rows x cols` block starting at `(offset_row, offset_col)`.
    /// Cells beyond `src`'s extent are left at `T::default()`.
    #[must_use]
    pub fn submatrix(src: &Self, offset_row: usize, offset_col: usize, rows: usize, cols: usize) -> Self {
        let mut out = Self::new(rows, cols);
        for i in 0..rows {
            let Some(src_row) = offset_row.checked_add(i).filter(|&r| r < src.rows()) else {
                continue;
            };
            for j in 0..cols {
                let Some(src_col) = offset_col.checked_add(j).filter(|&c| c < src.cols()) else {
                    continue;
                };
                out.set(i, j, src.get(src_row, src_col));
            }
        }
        out
    }
}

impl<T: Copy + Default> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.phys_offset(row, col)]
    }
}

impl<T: Copy + Default> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let offset = self.phys_offset(row, col);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_is_logical_only() {
        let mut m = Matrix::<i32>::from_row_major(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        m.transpose();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(1, 0), 2);
        assert_eq!(m.get(2, 1), 6);
    }

    #[test]
    fn row_and_col_roundtrip() {
        let m = Matrix::<i32>::from_row_major(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(m.row(0), vec![1, 2]);
        assert_eq!(m.row(1), vec![3, 4]);
        assert_eq!(m.col(0), vec![1, 3]);
        assert_eq!(m.col(1), vec![2, 4]);
    }

    #[test]
    fn copy_into_zero_extends() {
        let src = Matrix::<i32>::from_row_major(2, 2, vec![1, 2, 3, 4]);
        let mut dst = Matrix::<i32>::new(4, 4);
        Matrix::copy_into(&mut dst, &src);
        assert_eq!(dst.row(0), vec![1, 2, 0, 0]);
        assert_eq!(dst.row(2), vec![0, 0, 0, 0]);
    }

    #[test]
    fn submatrix_clips_at_edge() {
        let src = Matrix::<i32>::from_row_major(3, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let block = Matrix::submatrix(&src, 2, 2, 2, 2);
        assert_eq!(block.row(0), vec![9, 0]);
        assert_eq!(block.row(1), vec![0, 0]);
    }

    #[test]
    fn copy_into_at_clips_at_destination_edge() {
        let src = Matrix::<i32>::from_row_major(2, 2, vec![9, 9, 9, 9]);
        let mut dst = Matrix::<i32>::new(3, 3);
        Matrix::copy_into_at(&mut dst, &src, 2, 2);
        assert_eq!(dst.get(2, 2), 9);
        assert_eq!(dst.get(0, 0), 0);
    }

    #[test]
    fn index_and_index_mut() {
        let mut m = Matrix::<i32>::new(2, 2);
        m[(0, 1)] = 7;
        assert_eq!(m[(0, 1)], 7);
    }
}
