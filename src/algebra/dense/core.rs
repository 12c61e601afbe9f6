use crate::algebra::{Adjoint, DenseMatrix, FloatT, Matrix, ShapedMatrix, VectorMath};
use std::ops::{Index, IndexMut, Range};

impl<T> DenseMatrix for Matrix<T>
where
    T: FloatT,
{
    type T = T;
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
    fn data(&self) -> &[T] {
        &self.data
    }
}

impl<'a, T> DenseMatrix for Adjoint<'a, Matrix<T>>
where
    T: FloatT,
{
    type T = T;
    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        self.src.index_linear((idx.1, idx.0))
    }
    fn data(&self) -> &[T] {
        &self.src.data
    }
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn new(size: (usize, usize), data: Vec<T>) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, data.len());
        Self { m, n, data }
    }

    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Copy of the submatrix with the given row and column ranges
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(rows.end <= self.m && cols.end <= self.n);
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for col in cols.clone() {
            data.extend_from_slice(&self.col_slice(col)[rows.clone()]);
        }
        Self::new((rows.len(), cols.len()), data)
    }

    /// Multiply row `i` of the matrix by `s[i]`
    pub fn lscale(&mut self, s: &[T]) {
        assert_eq!(s.len(), self.m);
        for col in 0..self.n {
            self.col_slice_mut(col).hadamard(s);
        }
    }
}

impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    // rows are given in row major order and stored column major
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut data = Vec::with_capacity(R * C);
        for col in 0..C {
            for row in rows.iter() {
                data.push(row[col]);
            }
        }
        Self::new((R, C), data)
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data()[self.index_linear(idx)]
    }
}

impl<T> Index<(usize, usize)> for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data()[self.index_linear(idx)]
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> ShapedMatrix for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.src.n
    }
    fn ncols(&self) -> usize {
        self.src.m
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        display_matrix(self, f)
    }
}

fn display_matrix<M>(m: &M, f: &mut std::fmt::Formatter) -> std::fmt::Result
where
    M: DenseMatrix,
    M::Output: FloatT,
{
    writeln!(f)?;
    for i in 0..m.nrows() {
        write!(f, "[ ")?;
        for j in 0..m.ncols() {
            write!(f, " {:?}", m[(i, j)])?;
        }
        writeln!(f, "]")?;
    }
    writeln!(f)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_indexing_matrix() -> Matrix<f64> {
        // Create a 3x3 matrix in column-major order:
        // [ 1.0  4.0  7.0 ]
        // [ 2.0  5.0  8.0 ]
        // [ 3.0  6.0  9.0 ]
        Matrix::from(&[[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]])
    }

    #[test]
    fn test_matrix_indexing() {
        let matrix = create_indexing_matrix();

        assert_eq!(matrix[(0, 0)], 1.0);
        assert_eq!(matrix[(1, 0)], 2.0);
        assert_eq!(matrix[(2, 0)], 3.0);
        assert_eq!(matrix[(0, 1)], 4.0);
        assert_eq!(matrix[(2, 2)], 9.0);

        assert_eq!(matrix.index_linear((0, 0)), 0);
        assert_eq!(matrix.index_linear((2, 0)), 2);
        assert_eq!(matrix.index_linear((0, 1)), 3);
        assert_eq!(matrix.index_linear((2, 2)), 8);
    }

    #[test]
    fn test_adjoint_indexing() {
        let matrix = create_indexing_matrix();
        let adjoint = matrix.t();

        assert_eq!(adjoint[(0, 1)], 2.0);
        assert_eq!(adjoint[(1, 0)], 4.0);
        assert_eq!(adjoint[(2, 1)], 8.0);
        assert_eq!(adjoint.size(), (3, 3));
    }

    #[test]
    fn test_submatrix() {
        let matrix = create_indexing_matrix();
        let sub = matrix.submatrix(1..3, 0..2);
        assert_eq!(sub, Matrix::from(&[[2.0, 5.0], [3.0, 6.0]]));
    }

    #[test]
    fn test_lscale() {
        let mut matrix = create_indexing_matrix();
        matrix.lscale(&[1., 0., -1.]);
        assert_eq!(
            matrix,
            Matrix::from(&[[1.0, 4.0, 7.0], [0.0, 0.0, 0.0], [-3.0, -6.0, -9.0]])
        );
    }
}
