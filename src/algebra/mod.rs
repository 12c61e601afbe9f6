//! Gaussfactor algebra module.
//!
//! __NB__: Users will not ordinarily need to interact with this module except for defining
//! dense factor blocks in [`Matrix`](crate::algebra::Matrix) format.  Sparsity
//! patterns in [`CscPattern`](crate::algebra::CscPattern) format are built
//! internally when computing orderings.
//!
//! All factor assembly and ordering calculations are performed through the traits and
//! types defined here, which are implemented generically for any type satisfying
//! [`FloatT`](crate::algebra::FloatT).

// first import types related to matrix shape, since these
// are used to define the matrix types and their traits
mod matrix_types;
pub use matrix_types::*;
mod matrix_traits;
pub use matrix_traits::*;

// floating point types and their conversions
mod floats;
pub use floats::*;

mod error_types;
pub use error_types::*;

// vector math, dense and sparse matrix implementations
mod math_traits;
pub use math_traits::*;
mod csc;
mod dense;
mod vecmath;

// block partitioned storage used by Gaussian factors
mod blockmatrix;
pub use blockmatrix::*;
