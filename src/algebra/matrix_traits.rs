#![allow(non_snake_case)]

use std::ops::Index;

/// Basic size queries shared by dense and sparse matrix types
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

//NB: the concrete dense type is just called "Matrix".  The "DenseMatrix" trait
//is implemented on Matrix and Adjoint to allow for indexing of values in either
//format.   This follows the Julia naming convention for similar types.
pub trait DenseMatrix: ShapedMatrix + Index<(usize, usize)> {
    type T;
    fn index_linear(&self, idx: (usize, usize)) -> usize;
    fn data(&self) -> &[Self::T];
}

/// General matrix-vector multiply
pub trait MultiplyGEMV {
    type T;
    /// BLAS-like general matrix-vector multiply.  Produces `y = α*self*x + β*y`
    fn gemv(&self, x: &[Self::T], y: &mut [Self::T], α: Self::T, β: Self::T);
}
