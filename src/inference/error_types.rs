use super::{Key, OrderingType};
use crate::algebra::SparseFormatError;
use thiserror::Error;

/// Error type returned by elimination ordering operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// The ordering type is known but cannot be computed by `Ordering::create`
    #[error("Ordering::create called with unsupported ordering type {0:?}")]
    UnsupportedOrderingType(OrderingType),
    /// The ordering type name was not recognized
    #[error("Unknown ordering type \"{0}\"")]
    UnknownOrderingType(String),
    /// A key appears more than once where keys must be unique
    #[error("Key {0} appears more than once")]
    DuplicateKey(Key),
    /// A constrained key is not present in the variable index
    #[error("Key {0} does not appear in the variable index")]
    UnknownKey(Key),
    /// The fill reducing ordering kernel reported a failure
    #[error("Fill reducing ordering kernel failed with status {0}")]
    Kernel(String),
    /// The variable incidence pattern is malformed
    #[error("Bad incidence pattern: {0}")]
    BadFormat(#[from] SparseFormatError),
}
