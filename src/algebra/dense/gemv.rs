#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, Matrix, MultiplyGEMV, ShapedMatrix, VectorMath};

impl<T> MultiplyGEMV for Matrix<T>
where
    T: FloatT,
{
    type T = T;
    // implements y = αA*x + βy
    fn gemv(&self, x: &[T], y: &mut [T], α: T, β: T) {
        let (m, n) = self.size();
        assert!(n == x.len() && m == y.len());

        // β = 0 must overwrite y, even if y holds NaNs
        if β == T::zero() {
            y.set(T::zero());
        } else {
            y.scale(β);
        }
        // every column contributes, so Inf or NaN in A propagates even
        // where x is zero
        for (col, &xc) in x.iter().enumerate() {
            y.axpby(α * xc, self.col_slice(col), T::one());
        }
    }
}

impl<'a, T> MultiplyGEMV for Adjoint<'a, Matrix<T>>
where
    T: FloatT,
{
    type T = T;
    // implements y = αA'*x + βy
    fn gemv(&self, x: &[T], y: &mut [T], α: T, β: T) {
        let (m, n) = self.src.size(); //NB: size of A, not A'
        assert!(m == x.len() && n == y.len());

        for (col, yc) in y.iter_mut().enumerate() {
            let colA = self.src.col_slice(col);
            *yc = α * colA.dot(x) + β * (*yc);
        }
    }
}

#[test]
fn test_gemv() {
    let (m, n) = (2, 3);
    let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    let A = Matrix::new((m, n), a);

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [25.0, 58.0]);

    let x = vec![1., 2.];
    let mut y = vec![-1., -2., -3.];
    A.t().gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [15.0, 18.0, 21.0]);

    // zero entries in x give zero contributions from finite columns
    let x = vec![0., 1., 0.];
    let mut y = vec![0., 0.];
    A.gemv(&x, &mut y, 1.0, 0.0);
    assert!(y == [2.0, 5.0]);
}

#[test]
fn test_gemv_nonfinite_propagates() {
    let A = Matrix::from(&[
        [1., f64::NAN], //
        [2., f64::INFINITY],
    ]);

    // 0 * NaN and 0 * Inf are both NaN
    let x = vec![1., 0.];
    let mut y = vec![0., 0.];
    A.gemv(&x, &mut y, 1.0, 0.0);
    assert!(y[0].is_nan());
    assert!(y[1].is_nan());

    let mut y = vec![0., 0.];
    A.t().gemv(&[0., 0.], &mut y, 1.0, 0.0);
    assert_eq!(y[0], 0.);
    assert!(y[1].is_nan());
}
