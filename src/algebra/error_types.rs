use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix assembly operations.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Row value exceeds the matrix row dimension")]
    /// Row value exceeds the matrix row dimension
    BadRowval,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
}

/// Error type returned by block partitioned matrix operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockMatrixError {
    /// Column widths and the underlying matrix disagree in size
    #[error("Block widths sum to {expected} columns but the matrix has {found}")]
    IncompatibleDimension { expected: usize, found: usize },
    /// Requested active range lies outside the stored matrix
    #[error("Active range {start}..{end} is out of bounds (limit {limit})")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        limit: usize,
    },
}
