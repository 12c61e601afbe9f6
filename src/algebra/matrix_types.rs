// All matrix data handled by factors is stored in dense column major
// format.  Sparse storage is used only for incidence patterns fed to
// the fill reducing ordering kernel, and holds no values.

/// Dense matrix in column major format
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  4.  6.]
/// ```
///
/// ```no_run
/// use gaussfactor::algebra::Matrix;
///
/// let A : Matrix<f64> = Matrix::from(&[
///     [1., 3., 5.],
///     [2., 4., 6.],
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

/// Sparsity pattern in Compressed Sparse Column (CSC) format
///
/// Only the structure is stored.  There are no values, since patterns
/// are used to describe which variables interact, not by how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CscPattern {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the length
    /// of the `rowval` field.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
}

/// Read only transposed view of a matrix
#[derive(Debug, Clone, Copy)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}
