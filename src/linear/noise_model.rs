#![allow(non_snake_case)]

use super::FactorError;
use crate::algebra::*;
use core::marker::PhantomData;
use enum_dispatch::*;

/// Gaussian noise weighting of the rows of a linear factor
///
/// Whitening divides each row by its standard deviation σᵢ so that the
/// weighted squared error becomes a plain sum of squares.
#[enum_dispatch]
pub trait NoiseModel<T>
where
    T: FloatT,
{
    /// number of rows weighted by the model
    fn dim(&self) -> usize;

    /// standard deviation of each row
    fn sigmas(&self) -> Vec<T>;

    /// v = Σ^{-1/2} v
    fn whiten(&self, v: &mut [T]);

    /// v = Σ^{1/2} v
    fn unwhiten(&self, v: &mut [T]);

    /// A = Σ^{-1/2} A
    fn whiten_matrix(&self, A: &mut Matrix<T>);

    /// true if any row is a hard constraint, i.e. has σᵢ = 0
    fn is_constrained(&self) -> bool;

    fn is_unit(&self) -> bool;
}

/// Noise model for one of the supported weighting types
///
/// The smart constructor [`GaussianNoiseModel::from_sigmas`] selects the
/// simplest model type for a given set of standard deviations.
#[enum_dispatch(NoiseModel<T>)]
#[derive(Debug, Clone, PartialEq)]
pub enum GaussianNoiseModel<T>
where
    T: FloatT,
{
    Unit(UnitNoiseModel<T>),
    Diagonal(DiagonalNoiseModel<T>),
    Constrained(ConstrainedNoiseModel<T>),
}

impl<T> GaussianNoiseModel<T>
where
    T: FloatT,
{
    pub fn unit(dim: usize) -> Self {
        UnitNoiseModel::new(dim).into()
    }

    /// Fails if any σᵢ is not finite and positive
    pub fn diagonal(sigmas: &[T]) -> Result<Self, FactorError> {
        Ok(DiagonalNoiseModel::new(sigmas)?.into())
    }

    /// Fails if any σᵢ is negative or not finite
    pub fn constrained(sigmas: &[T]) -> Result<Self, FactorError> {
        Ok(ConstrainedNoiseModel::new(sigmas)?.into())
    }

    /// Constrained if any σᵢ is zero, unit if every σᵢ is one, and diagonal
    /// otherwise.
    pub fn from_sigmas(sigmas: &[T]) -> Result<Self, FactorError> {
        check_sigmas(sigmas)?;
        if sigmas.iter().any(|&s| s == T::zero()) {
            Self::constrained(sigmas)
        } else if sigmas.iter().all(|&s| s == T::one()) {
            Ok(Self::unit(sigmas.len()))
        } else {
            Self::diagonal(sigmas)
        }
    }
}

// every σᵢ must be finite and non-negative
fn check_sigmas<T: FloatT>(sigmas: &[T]) -> Result<(), FactorError> {
    match sigmas
        .iter()
        .position(|&s| !(s.is_finite() && s >= T::zero()))
    {
        Some(index) => Err(invalid_sigma(index, sigmas[index])),
        None => Ok(()),
    }
}

fn invalid_sigma<T: FloatT>(index: usize, s: T) -> FactorError {
    FactorError::InvalidSigma {
        index,
        value: s.to_f64().unwrap_or(f64::NAN),
    }
}

// -------------------------------------
// Unit weighting
// -------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UnitNoiseModel<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> UnitNoiseModel<T>
where
    T: FloatT,
{
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<T> NoiseModel<T> for UnitNoiseModel<T>
where
    T: FloatT,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn sigmas(&self) -> Vec<T> {
        vec![T::one(); self.dim]
    }

    fn whiten(&self, v: &mut [T]) {
        assert_eq!(v.len(), self.dim);
    }

    fn unwhiten(&self, v: &mut [T]) {
        assert_eq!(v.len(), self.dim);
    }

    fn whiten_matrix(&self, A: &mut Matrix<T>) {
        assert_eq!(A.nrows(), self.dim);
    }

    fn is_constrained(&self) -> bool {
        false
    }

    fn is_unit(&self) -> bool {
        true
    }
}

// -------------------------------------
// Diagonal weighting
// -------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalNoiseModel<T: FloatT = f64> {
    sigmas: Vec<T>,
    invsigmas: Vec<T>,
}

impl<T> DiagonalNoiseModel<T>
where
    T: FloatT,
{
    /// Fails if any σᵢ is not finite and positive
    pub fn new(sigmas: &[T]) -> Result<Self, FactorError> {
        check_sigmas(sigmas)?;
        if let Some(index) = sigmas.iter().position(|&s| s == T::zero()) {
            return Err(invalid_sigma(index, sigmas[index]));
        }
        let mut invsigmas = sigmas.to_vec();
        invsigmas.scalarop(T::recip);
        Ok(Self {
            sigmas: sigmas.to_vec(),
            invsigmas,
        })
    }
}

impl<T> NoiseModel<T> for DiagonalNoiseModel<T>
where
    T: FloatT,
{
    fn dim(&self) -> usize {
        self.sigmas.len()
    }

    fn sigmas(&self) -> Vec<T> {
        self.sigmas.clone()
    }

    fn whiten(&self, v: &mut [T]) {
        v.hadamard(&self.invsigmas);
    }

    fn unwhiten(&self, v: &mut [T]) {
        v.hadamard(&self.sigmas);
    }

    fn whiten_matrix(&self, A: &mut Matrix<T>) {
        A.lscale(&self.invsigmas);
    }

    fn is_constrained(&self) -> bool {
        false
    }

    fn is_unit(&self) -> bool {
        false
    }
}

// -------------------------------------
// Mixed hard and soft constraints
// -------------------------------------

/// Diagonal weighting in which rows with σᵢ = 0 are hard constraints.
/// Constrained rows are left unscaled by whitening.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedNoiseModel<T: FloatT = f64> {
    sigmas: Vec<T>,
    // 1/σᵢ, or one for constrained rows
    invsigmas: Vec<T>,
}

impl<T> ConstrainedNoiseModel<T>
where
    T: FloatT,
{
    /// Fails if any σᵢ is negative or not finite
    pub fn new(sigmas: &[T]) -> Result<Self, FactorError> {
        check_sigmas(sigmas)?;
        let invsigmas = sigmas
            .iter()
            .map(|&s| if s == T::zero() { T::one() } else { s.recip() })
            .collect();
        Ok(Self {
            sigmas: sigmas.to_vec(),
            invsigmas,
        })
    }

    /// true if row `i` is a hard constraint
    pub fn constrained(&self, i: usize) -> bool {
        self.sigmas[i] == T::zero()
    }
}

impl<T> NoiseModel<T> for ConstrainedNoiseModel<T>
where
    T: FloatT,
{
    fn dim(&self) -> usize {
        self.sigmas.len()
    }

    fn sigmas(&self) -> Vec<T> {
        self.sigmas.clone()
    }

    fn whiten(&self, v: &mut [T]) {
        v.hadamard(&self.invsigmas);
    }

    fn unwhiten(&self, v: &mut [T]) {
        assert_eq!(v.len(), self.sigmas.len());
        for (i, vi) in v.iter_mut().enumerate() {
            if !self.constrained(i) {
                *vi *= self.sigmas[i];
            }
        }
    }

    fn whiten_matrix(&self, A: &mut Matrix<T>) {
        A.lscale(&self.invsigmas);
    }

    fn is_constrained(&self) -> bool {
        self.sigmas.iter().any(|&s| s == T::zero())
    }

    fn is_unit(&self) -> bool {
        false
    }
}
