#![allow(non_snake_case)]

use crate::algebra::{BlockMatrixError, FloatT, Matrix, ShapedMatrix};
use std::ops::Range;

/// Dense matrix partitioned into vertical blocks of columns
///
/// The matrix is divided into a sequence of column blocks of given
/// widths.   When `append_one_dimension` is set at construction, an
/// additional block of width one is appended, which factors use to
/// hold the right hand side, i.e. `[A1 | A2 | ... | An | b]`.
///
/// Queries operate on an *active view* consisting of the rows
/// `row_start..row_end` and the blocks from `first_block` onwards.
/// Block indices passed to accessors are relative to `first_block`.
///
/// __Example usage__ :
///
/// ```no_run
/// use gaussfactor::algebra::{BlockMatrix, Matrix};
///
/// // two blocks of widths 2 and 1, plus a rhs column, with 3 rows
/// let mut Ab : BlockMatrix<f64> = BlockMatrix::new(&[2, 1], 3, true);
/// Ab.set_block(1, &Matrix::from(&[[1.], [2.], [3.]]));
/// assert_eq!(Ab.nblocks(), 3);
/// assert_eq!(Ab.cols(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<T = f64> {
    matrix: Matrix<T>,
    // absolute column offsets of every block, length nblocks + 1
    offsets: Vec<usize>,
    row_start: usize,
    row_end: usize,
    first_block: usize,
}

impl<T> BlockMatrix<T>
where
    T: FloatT,
{
    /// Zero initialised block matrix with the given block widths
    pub fn new(dims: &[usize], rows: usize, append_one_dimension: bool) -> Self {
        let offsets = Self::block_offsets(dims, append_one_dimension);
        let ncols = *offsets.last().unwrap_or(&0);
        Self {
            matrix: Matrix::zeros((rows, ncols)),
            offsets,
            row_start: 0,
            row_end: rows,
            first_block: 0,
        }
    }

    /// Wrap an existing matrix, which must have exactly as many columns
    /// as the block widths imply.
    pub fn from_matrix(
        dims: &[usize],
        matrix: Matrix<T>,
        append_one_dimension: bool,
    ) -> Result<Self, BlockMatrixError> {
        let offsets = Self::block_offsets(dims, append_one_dimension);
        let expected = *offsets.last().unwrap_or(&0);
        if expected != matrix.ncols() {
            return Err(BlockMatrixError::IncompatibleDimension {
                expected,
                found: matrix.ncols(),
            });
        }
        let rows = matrix.nrows();
        Ok(Self {
            matrix,
            offsets,
            row_start: 0,
            row_end: rows,
            first_block: 0,
        })
    }

    fn block_offsets(dims: &[usize], append_one_dimension: bool) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(dims.len() + 2);
        offsets.push(0);
        let widths = dims
            .iter()
            .copied()
            .chain(append_one_dimension.then_some(1));
        for w in widths {
            let last = *offsets.last().unwrap_or(&0);
            offsets.push(last + w);
        }
        offsets
    }

    /// number of blocks in the active view
    pub fn nblocks(&self) -> usize {
        self.offsets.len() - 1 - self.first_block
    }

    /// number of rows in the active view
    pub fn rows(&self) -> usize {
        self.row_end - self.row_start
    }

    /// number of columns in the active view
    pub fn cols(&self) -> usize {
        self.offsets[self.offsets.len() - 1] - self.offsets[self.first_block]
    }

    pub fn row_start(&self) -> usize {
        self.row_start
    }

    pub fn row_end(&self) -> usize {
        self.row_end
    }

    pub fn first_block(&self) -> usize {
        self.first_block
    }

    /// Restrict the active view to the rows `start..end` of the stored matrix
    pub fn set_row_range(&mut self, start: usize, end: usize) -> Result<(), BlockMatrixError> {
        let limit = self.matrix.nrows();
        if start > end || end > limit {
            return Err(BlockMatrixError::RangeOutOfBounds { start, end, limit });
        }
        self.row_start = start;
        self.row_end = end;
        Ok(())
    }

    /// Restrict the active view to the stored blocks `block..`
    pub fn set_first_block(&mut self, block: usize) -> Result<(), BlockMatrixError> {
        let limit = self.offsets.len() - 1;
        if block > limit {
            return Err(BlockMatrixError::RangeOutOfBounds {
                start: block,
                end: limit,
                limit,
            });
        }
        self.first_block = block;
        Ok(())
    }

    /// column offset of an active block, relative to the active view
    pub fn offset(&self, block: usize) -> usize {
        assert!(block <= self.nblocks());
        self.offsets[self.first_block + block] - self.offsets[self.first_block]
    }

    pub fn block_width(&self, block: usize) -> usize {
        assert!(block < self.nblocks());
        let b = self.first_block + block;
        self.offsets[b + 1] - self.offsets[b]
    }

    // absolute column range of an active block
    fn abs_cols(&self, block: usize) -> Range<usize> {
        assert!(block < self.nblocks());
        let b = self.first_block + block;
        self.offsets[b]..self.offsets[b + 1]
    }

    /// Active rows of column `col` within block `block`
    pub fn column(&self, block: usize, col: usize) -> &[T] {
        let cols = self.abs_cols(block);
        assert!(col < cols.len());
        &self.matrix.col_slice(cols.start + col)[self.row_start..self.row_end]
    }

    /// Mutable active rows of column `col` within block `block`
    pub fn column_mut(&mut self, block: usize, col: usize) -> &mut [T] {
        let cols = self.abs_cols(block);
        assert!(col < cols.len());
        let (r0, r1) = (self.row_start, self.row_end);
        &mut self.matrix.col_slice_mut(cols.start + col)[r0..r1]
    }

    /// Copy of one active block
    pub fn block(&self, block: usize) -> Matrix<T> {
        self.range(block, block + 1)
    }

    /// Copy of the active blocks `start..end`, concatenated horizontally
    pub fn range(&self, start: usize, end: usize) -> Matrix<T> {
        assert!(start <= end && end <= self.nblocks());
        let c0 = self.offsets[self.first_block + start];
        let c1 = self.offsets[self.first_block + end];
        self.matrix.submatrix(self.row_start..self.row_end, c0..c1)
    }

    /// Copy of the whole active view
    pub fn full(&self) -> Matrix<T> {
        self.range(0, self.nblocks())
    }

    /// Overwrite one active block
    ///
    /// # Panics
    /// Panics if `src` does not match the active block size
    pub fn set_block(&mut self, block: usize, src: &Matrix<T>) {
        assert_eq!(src.size(), (self.rows(), self.block_width(block)));
        for col in 0..src.ncols() {
            self.column_mut(block, col).copy_from_slice(src.col_slice(col));
        }
    }

    /// Copy the active block `src_block` of `src` into the active block
    /// `block` of `self`, starting at active row `row_offset`.   Rows of
    /// `self` outside the copied range are left untouched.
    ///
    /// # Panics
    /// Panics if the block widths differ or the rows do not fit
    pub fn copy_block_rows(
        &mut self,
        block: usize,
        row_offset: usize,
        src: &BlockMatrix<T>,
        src_block: usize,
    ) {
        let width = src.block_width(src_block);
        let rows = src.rows();
        assert_eq!(width, self.block_width(block));
        assert!(row_offset + rows <= self.rows());

        for col in 0..width {
            let dest = &mut self.column_mut(block, col)[row_offset..row_offset + rows];
            dest.copy_from_slice(src.column(src_block, col));
        }
    }

    /// New block matrix holding a copy of the active view only
    pub fn active_copy(&self) -> Self {
        let first = self.first_block;
        let base = self.offsets[first];
        let offsets = self.offsets[first..].iter().map(|o| o - base).collect();
        Self {
            matrix: self.full(),
            offsets,
            row_start: 0,
            row_end: self.rows(),
            first_block: 0,
        }
    }

    /// The underlying storage, ignoring the active view
    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }
}
