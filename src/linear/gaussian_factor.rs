use super::{FactorError, JacobianFactor, VectorValues};
use crate::algebra::FloatT;
use crate::inference::Key;
use std::borrow::Cow;

/// A linear factor over a set of keys with a quadratic error
pub trait GaussianFactor<T>
where
    T: FloatT,
{
    /// keys involved in the factor, in the order of its column blocks
    fn keys(&self) -> &[Key];

    /// number of rows of the corresponding linear system
    fn rows(&self) -> usize;

    /// Error ½‖Σ^{-1/2}(Ax - b)‖² at `x`
    fn error(&self, x: &VectorValues<T>) -> Result<T, FactorError>;

    /// The factor in Jacobian form.  Jacobian factors borrow themselves.
    fn to_jacobian(&self) -> Cow<'_, JacobianFactor<T>>;
}

impl<T> GaussianFactor<T> for JacobianFactor<T>
where
    T: FloatT,
{
    fn keys(&self) -> &[Key] {
        JacobianFactor::keys(self)
    }

    fn rows(&self) -> usize {
        JacobianFactor::rows(self)
    }

    fn error(&self, x: &VectorValues<T>) -> Result<T, FactorError> {
        JacobianFactor::error(self, x)
    }

    fn to_jacobian(&self) -> Cow<'_, JacobianFactor<T>> {
        Cow::Borrowed(self)
    }
}
