use crate::inference::Key;
use thiserror::Error;

/// Error type returned by Gaussian factor construction and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactorError {
    /// A matrix or vector has an incompatible dimension
    #[error("Incompatible dimension: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// The number of keys differs from the number of matrix blocks
    #[error("Factor has {keys} keys but {blocks} matrix blocks")]
    KeyCountMismatch { keys: usize, blocks: usize },
    /// A key appears more than once in a factor
    #[error("Key {0} appears more than once in a factor")]
    DuplicateKey(Key),
    /// A required key has no value or no block
    #[error("Key {0} not found")]
    MissingKey(Key),
    /// Block position is out of range
    #[error("Block index {index} out of range for a factor with {nblocks} blocks")]
    BlockIndexOutOfRange { index: usize, nblocks: usize },
    /// An ordering passed to joint assembly names a key no factor involves
    #[error("Ordering key {0} does not appear in any factor")]
    ExtraOrderingKey(Key),
    /// A noise model standard deviation is negative or not finite
    #[error("Invalid standard deviation {value} at row {index}")]
    InvalidSigma { index: usize, value: f64 },
}

