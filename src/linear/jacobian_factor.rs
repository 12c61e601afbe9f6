#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::inference::{Key, Ordering};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::iter::repeat;
use tracing::{debug, trace};

/// Gaussian factor in the squared error form
///
/// A `JacobianFactor` represents the error
///
/// ```text
/// ½‖Σ^{-1/2}(A₁x₁ + A₂x₂ + ... + Aₙxₙ - b)‖²
/// ```
///
/// over the keys x₁..xₙ.   The blocks Aⱼ and the right hand side b are
/// stored unweighted in a single augmented [`BlockMatrix`] `[A₁|…|Aₙ|b]`,
/// and Σ is given by an optional noise model.  A factor without a noise
/// model has unit weighting.
///
/// __Example usage__ :
///
/// ```no_run
/// use gaussfactor::algebra::Matrix;
/// use gaussfactor::linear::{GaussianNoiseModel, JacobianFactor};
///
/// let A1 = Matrix::from(&[[1., 0.], [0., 1.]]);
/// let A2 = Matrix::from(&[[-1., 0.], [0., -1.]]);
/// let model = GaussianNoiseModel::from_sigmas(&[0.1, 0.1]).unwrap();
///
/// let factor = JacobianFactor::binary(1, A1, 2, A2, &[0.5, 0.0], Some(model)).unwrap();
/// assert_eq!(factor.rows(), 2);
/// assert_eq!(factor.cols(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianFactor<T: FloatT = f64> {
    keys: Vec<Key>,
    Ab: BlockMatrix<T>,
    model: Option<GaussianNoiseModel<T>>,
}

impl<T> JacobianFactor<T>
where
    T: FloatT,
{
    /// Factor from (key, block) terms, with column blocks laid out in
    /// iteration order.  Every block must have `b.len()` rows.
    pub fn from_terms<I>(
        terms: I,
        b: &[T],
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError>
    where
        I: IntoIterator<Item = (Key, Matrix<T>)>,
    {
        let (keys, blocks): (Vec<Key>, Vec<Matrix<T>>) = terms.into_iter().unzip();
        Self::assemble(keys, &blocks, b, model)
    }

    /// Factor from parallel sequences of keys and blocks
    pub fn from_keys_and_blocks(
        keys: &[Key],
        blocks: &[Matrix<T>],
        b: &[T],
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        if keys.len() != blocks.len() {
            return Err(FactorError::KeyCountMismatch {
                keys: keys.len(),
                blocks: blocks.len(),
            });
        }
        Self::assemble(keys.to_vec(), blocks, b, model)
    }

    pub fn unary(
        k1: Key,
        A1: Matrix<T>,
        b: &[T],
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        Self::assemble(vec![k1], &[A1], b, model)
    }

    pub fn binary(
        k1: Key,
        A1: Matrix<T>,
        k2: Key,
        A2: Matrix<T>,
        b: &[T],
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        Self::assemble(vec![k1, k2], &[A1, A2], b, model)
    }

    fn assemble(
        keys: Vec<Key>,
        blocks: &[Matrix<T>],
        b: &[T],
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        let rows = b.len();
        check_unique(&keys)?;
        for A in blocks {
            check_dim(rows, A.nrows())?;
        }
        check_model(&model, rows)?;

        let dims: Vec<usize> = blocks.iter().map(|A| A.ncols()).collect();
        let mut Ab = BlockMatrix::new(&dims, rows, true);
        for (j, A) in blocks.iter().enumerate() {
            Ab.set_block(j, A);
        }
        Ab.column_mut(keys.len(), 0).copy_from(b);

        Ok(Self { keys, Ab, model })
    }

    /// Factor from an augmented block matrix `[A₁|…|Aₙ|b]`.  Only the
    /// active view of `Ab` is copied, and its final block must be the
    /// width one right hand side.
    pub fn from_block_matrix(
        keys: &[Key],
        Ab: &BlockMatrix<T>,
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        let nblocks = Ab.nblocks();
        if nblocks != keys.len() + 1 {
            return Err(FactorError::KeyCountMismatch {
                keys: keys.len(),
                blocks: nblocks.saturating_sub(1),
            });
        }
        check_dim(1, Ab.block_width(nblocks - 1))?;
        check_unique(keys)?;
        check_model(&model, Ab.rows())?;

        Ok(Self {
            keys: keys.to_vec(),
            Ab: Ab.active_copy(),
            model,
        })
    }

    /// Zero initialised factor with blocks of widths `dims` and `rows` rows
    pub fn with_dims(
        keys: &[Key],
        dims: &[usize],
        rows: usize,
        model: Option<GaussianNoiseModel<T>>,
    ) -> Result<Self, FactorError> {
        if keys.len() != dims.len() {
            return Err(FactorError::KeyCountMismatch {
                keys: keys.len(),
                blocks: dims.len(),
            });
        }
        check_unique(keys)?;
        check_model(&model, rows)?;

        Ok(Self {
            keys: keys.to_vec(),
            Ab: BlockMatrix::new(dims, rows, true),
            model,
        })
    }

    /// Jacobian form of any Gaussian factor
    pub fn from_gaussian_factor<F>(factor: &F) -> Self
    where
        F: GaussianFactor<T> + ?Sized,
    {
        factor.to_jacobian().into_owned()
    }

    //------------------------------------------------
    // joint factors
    //------------------------------------------------

    /// Single dense factor whose error is the sum of the errors of all
    /// factors in `graph`.  Keys are laid out in ascending order.
    pub fn from_graph(graph: &GaussianFactorGraph<T>) -> Result<Self, FactorError> {
        let factors: Vec<&dyn GaussianFactor<T>> = graph.iter().collect();
        Self::from_factors(&factors, None)
    }

    /// As [`from_graph`](JacobianFactor::from_graph), with the keys of
    /// `ordering` laid out first and any remaining keys following in
    /// ascending order.
    pub fn from_graph_with_ordering(
        graph: &GaussianFactorGraph<T>,
        ordering: &Ordering,
    ) -> Result<Self, FactorError> {
        let factors: Vec<&dyn GaussianFactor<T>> = graph.iter().collect();
        Self::from_factors(&factors, Some(ordering))
    }

    /// Joint factor of a list of factors.  Every key of `ordering` must
    /// appear in at least one factor.
    pub fn from_factors(
        factors: &[&dyn GaussianFactor<T>],
        ordering: Option<&Ordering>,
    ) -> Result<Self, FactorError> {
        let jacobians: Vec<_> = factors.iter().map(|f| f.to_jacobian()).collect();

        // block width of every key, taken from the first factor using it
        let mut dims = BTreeMap::new();
        for jf in &jacobians {
            for (j, &key) in jf.keys.iter().enumerate() {
                let width = jf.Ab.block_width(j);
                match dims.entry(key) {
                    Entry::Vacant(e) => {
                        e.insert(width);
                    }
                    Entry::Occupied(e) => check_dim(*e.get(), width)?,
                }
            }
        }

        let mut keys = Vec::with_capacity(dims.len());
        let mut placed = BTreeSet::new();
        if let Some(ordering) = ordering {
            for &key in ordering {
                if !dims.contains_key(&key) {
                    return Err(FactorError::ExtraOrderingKey(key));
                }
                if !placed.insert(key) {
                    return Err(FactorError::DuplicateKey(key));
                }
                keys.push(key);
            }
        }
        keys.extend(dims.keys().filter(|k| !placed.contains(*k)));

        let slots: BTreeMap<Key, usize> = keys.iter().enumerate().map(|(j, &k)| (k, j)).collect();
        let widths: Vec<usize> = keys.iter().map(|k| dims[k]).collect();
        let rows: usize = jacobians.iter().map(|jf| jf.rows()).sum();

        debug!(
            "assembling joint factor: {} factors, {} rows, {} keys, {} columns",
            jacobians.len(),
            rows,
            keys.len(),
            widths.iter().sum::<usize>()
        );

        let mut Ab = BlockMatrix::new(&widths, rows, true);
        let mut sigmas = Vec::with_capacity(rows);
        let mut any_model = false;
        let mut any_constrained = false;

        let mut row = 0;
        for jf in &jacobians {
            for (j, key) in jf.keys.iter().enumerate() {
                Ab.copy_block_rows(slots[key], row, &jf.Ab, j);
            }
            Ab.copy_block_rows(keys.len(), row, &jf.Ab, jf.keys.len());

            match &jf.model {
                Some(model) => {
                    any_model = true;
                    any_constrained |= model.is_constrained();
                    sigmas.extend(model.sigmas());
                }
                None => sigmas.extend(repeat(T::one()).take(jf.rows())),
            }
            trace!("factor {:?} placed at row {}", jf.keys, row);
            row += jf.rows();
        }

        let mut joint = Self {
            keys,
            Ab,
            model: None,
        };
        if any_model {
            joint.set_model(any_constrained, &sigmas)?;
        }
        Ok(joint)
    }

    //------------------------------------------------
    // access
    //------------------------------------------------

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// number of keys
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// the augmented matrix `[A₁|…|Aₙ|b]`
    pub fn matrix_object(&self) -> &BlockMatrix<T> {
        &self.Ab
    }

    pub fn matrix_object_mut(&mut self) -> &mut BlockMatrix<T> {
        &mut self.Ab
    }

    pub fn rows(&self) -> usize {
        self.Ab.rows()
    }

    /// total width of the variable blocks, excluding b
    pub fn cols(&self) -> usize {
        self.Ab.cols() - 1
    }

    /// width of the block at position `pos`
    pub fn get_dim(&self, pos: usize) -> Result<usize, FactorError> {
        self.check_pos(pos)?;
        Ok(self.Ab.block_width(pos))
    }

    /// copy of the unweighted block at position `pos`
    pub fn get_a(&self, pos: usize) -> Result<Matrix<T>, FactorError> {
        self.check_pos(pos)?;
        Ok(self.Ab.block(pos))
    }

    pub fn get_a_key(&self, key: Key) -> Result<Matrix<T>, FactorError> {
        let pos = self.position(key).ok_or(FactorError::MissingKey(key))?;
        self.get_a(pos)
    }

    /// copy of the full unweighted matrix `[A₁|…|Aₙ]`
    pub fn get_a_full(&self) -> Matrix<T> {
        self.Ab.range(0, self.keys.len())
    }

    /// unweighted right hand side
    pub fn get_b(&self) -> &[T] {
        self.Ab.column(self.keys.len(), 0)
    }

    pub fn set_b(&mut self, b: &[T]) -> Result<(), FactorError> {
        check_dim(self.rows(), b.len())?;
        let nkeys = self.keys.len();
        self.Ab.column_mut(nkeys, 0).copy_from(b);
        Ok(())
    }

    pub fn get_model(&self) -> Option<&GaussianNoiseModel<T>> {
        self.model.as_ref()
    }

    /// true if any row is a hard constraint
    pub fn is_constrained(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.is_constrained())
    }

    /// Replace the noise model with a diagonal one with the given σ, or
    /// with a constrained one if `any_constrained` is set or any σᵢ is zero.
    /// On error the current model is left in place.
    pub fn set_model(&mut self, any_constrained: bool, sigmas: &[T]) -> Result<(), FactorError> {
        check_dim(self.rows(), sigmas.len())?;
        let model = if any_constrained || sigmas.iter().any(|&s| s == T::zero()) {
            GaussianNoiseModel::constrained(sigmas)?
        } else {
            GaussianNoiseModel::diagonal(sigmas)?
        };
        self.model = Some(model);
        Ok(())
    }

    //------------------------------------------------
    // linear algebra
    //------------------------------------------------

    /// Unweighted product A·x
    pub fn multiply(&self, x: &VectorValues<T>) -> Result<Vec<T>, FactorError> {
        let mut y = vec![T::zero(); self.rows()];
        for (j, &key) in self.keys.iter().enumerate() {
            let xj = x.get(key).ok_or(FactorError::MissingKey(key))?;
            check_dim(self.Ab.block_width(j), xj.len())?;
            self.Ab.block(j).gemv(xj, &mut y, T::one(), T::one());
        }
        Ok(y)
    }

    /// Ax - b
    pub fn unweighted_error(&self, x: &VectorValues<T>) -> Result<Vec<T>, FactorError> {
        let mut e = self.multiply(x)?;
        e.axpby(-T::one(), self.get_b(), T::one());
        Ok(e)
    }

    /// Σ^{-1/2}(Ax - b)
    pub fn error_vector(&self, x: &VectorValues<T>) -> Result<Vec<T>, FactorError> {
        let mut e = self.unweighted_error(x)?;
        if let Some(model) = &self.model {
            model.whiten(&mut e);
        }
        Ok(e)
    }

    /// ½‖Σ^{-1/2}(Ax - b)‖²
    pub fn error(&self, x: &VectorValues<T>) -> Result<T, FactorError> {
        let e = self.error_vector(x)?;
        Ok(e.sumsq() * (0.5).as_T())
    }

    /// x[k] += α·Aₖᵀ·Σ^{-1}·e for every key k of the factor.   Keys absent
    /// from `x` are inserted as zeros first.  `x` is left untouched if any
    /// of its values has the wrong width.
    pub fn transpose_multiply_add(
        &self,
        α: T,
        e: &[T],
        x: &mut VectorValues<T>,
    ) -> Result<(), FactorError> {
        check_dim(self.rows(), e.len())?;
        for (j, &key) in self.keys.iter().enumerate() {
            if let Some(xk) = x.get(key) {
                check_dim(self.Ab.block_width(j), xk.len())?;
            }
        }
        let mut E = e.to_vec();
        if let Some(model) = &self.model {
            model.whiten(&mut E);
            model.whiten(&mut E);
        }
        for (j, &key) in self.keys.iter().enumerate() {
            let width = self.Ab.block_width(j);
            let xk = x.entry_or_zeros(key, width);
            self.Ab.block(j).t().gemv(&E, xk, α, T::one());
        }
        Ok(())
    }

    /// whitened augmented matrix Σ^{-1/2}[A b]
    pub fn augmented_jacobian(&self) -> Matrix<T> {
        let mut Ab = self.Ab.full();
        if let Some(model) = &self.model {
            model.whiten_matrix(&mut Ab);
        }
        Ab
    }

    /// whitened Σ^{-1/2}A and Σ^{-1/2}b
    pub fn jacobian(&self) -> (Matrix<T>, Vec<T>) {
        let mut A = self.get_a_full();
        let mut b = self.get_b().to_vec();
        if let Some(model) = &self.model {
            model.whiten_matrix(&mut A);
            model.whiten(&mut b);
        }
        (A, b)
    }

    fn position(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    fn check_pos(&self, pos: usize) -> Result<(), FactorError> {
        if pos >= self.keys.len() {
            return Err(FactorError::BlockIndexOutOfRange {
                index: pos,
                nblocks: self.keys.len(),
            });
        }
        Ok(())
    }
}

fn check_dim(expected: usize, found: usize) -> Result<(), FactorError> {
    if expected != found {
        return Err(FactorError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn check_unique(keys: &[Key]) -> Result<(), FactorError> {
    let mut seen = BTreeSet::new();
    match keys.iter().find(|&&k| !seen.insert(k)) {
        Some(&key) => Err(FactorError::DuplicateKey(key)),
        None => Ok(()),
    }
}

fn check_model<T: FloatT>(
    model: &Option<GaussianNoiseModel<T>>,
    rows: usize,
) -> Result<(), FactorError> {
    match model {
        Some(model) => check_dim(rows, model.dim()),
        None => Ok(()),
    }
}

impl<T> std::fmt::Display for JacobianFactor<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "JacobianFactor on keys {:?}", self.keys)?;
        for (j, key) in self.keys.iter().enumerate() {
            writeln!(f, "A[{key}] =")?;
            writeln!(f, "{}", self.Ab.block(j))?;
        }
        writeln!(f, "b = {:?}", self.get_b())?;
        match &self.model {
            Some(model) => writeln!(f, "sigmas = {:?}", model.sigmas()),
            None => writeln!(f, "unit noise model"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_factor() -> JacobianFactor<f64> {
        let A1 = Matrix::from(&[[1., 2.], [3., 4.], [5., 6.]]);
        let A2 = Matrix::from(&[[1.], [0.], [-1.]]);
        JacobianFactor::binary(4, A1, 9, A2, &[1., 2., 3.], None).unwrap()
    }

    #[test]
    fn test_binary_layout() {
        let jf = test_factor();
        assert_eq!(jf.keys(), &[4, 9]);
        assert_eq!(jf.rows(), 3);
        assert_eq!(jf.cols(), 3);
        assert_eq!(jf.get_dim(0).unwrap(), 2);
        assert_eq!(jf.get_b(), &[1., 2., 3.]);
        assert_eq!(jf.get_a_key(9).unwrap(), Matrix::from(&[[1.], [0.], [-1.]]));
        assert_eq!(
            jf.get_a(2),
            Err(FactorError::BlockIndexOutOfRange {
                index: 2,
                nblocks: 2
            })
        );
        assert_eq!(jf.get_a_key(5), Err(FactorError::MissingKey(5)));
        assert!(jf.get_model().is_none());
        assert!(!jf.is_constrained());
    }

    #[test]
    fn test_bad_construction() {
        let A = Matrix::from(&[[1.], [2.]]);
        let err = JacobianFactor::unary(0, A.clone(), &[1., 2., 3.], None).unwrap_err();
        assert_eq!(
            err,
            FactorError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );

        let err = JacobianFactor::binary(0, A.clone(), 0, A.clone(), &[1., 2.], None).unwrap_err();
        assert_eq!(err, FactorError::DuplicateKey(0));

        let model = GaussianNoiseModel::unit(3);
        let err = JacobianFactor::unary(0, A.clone(), &[1., 2.], Some(model)).unwrap_err();
        assert!(matches!(err, FactorError::DimensionMismatch { .. }));

        let err = JacobianFactor::from_keys_and_blocks(&[0, 1], &[A], &[1., 2.], None).unwrap_err();
        assert_eq!(err, FactorError::KeyCountMismatch { keys: 2, blocks: 1 });
    }

    #[test]
    fn test_multiply_and_error() {
        let jf = test_factor();
        let x: VectorValues = [(4, vec![1., 1.]), (9, vec![2.])].into_iter().collect();

        assert_eq!(jf.multiply(&x).unwrap(), vec![5., 7., 9.]);
        assert_eq!(jf.unweighted_error(&x).unwrap(), vec![4., 5., 6.]);
        assert_eq!(jf.error(&x).unwrap(), 0.5 * 77.);

        let mut jf = jf;
        jf.set_model(false, &[2., 1., 0.5]).unwrap();
        assert_eq!(jf.error_vector(&x).unwrap(), vec![2., 5., 12.]);
        assert_eq!(jf.error(&x).unwrap(), 0.5 * 173.);

        let short: VectorValues = [(4, vec![1.])].into_iter().collect();
        assert!(matches!(
            jf.multiply(&short),
            Err(FactorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_transpose_multiply_add() {
        let mut jf = test_factor();
        jf.set_model(false, &[1., 1., 0.5]).unwrap();

        let mut x: VectorValues = [(4, vec![1., 1.])].into_iter().collect();
        jf.transpose_multiply_add(2.0, &[1., 0., 1.], &mut x).unwrap();

        // Σ⁻¹e = [1, 0, 4]
        assert_eq!(x.get(4), Some(&[1. + 2. * 21., 1. + 2. * 26.][..]));
        assert_eq!(x.get(9), Some(&[2. * -3.][..]));
    }

    #[test]
    fn test_transpose_multiply_add_bad_width() {
        let jf = test_factor();

        // second key has the wrong width, so nothing may be written
        let mut x: VectorValues = [(4, vec![0., 0.]), (9, vec![0., 0.])].into_iter().collect();
        let before = x.clone();
        let err = jf.transpose_multiply_add(1.0, &[1., 1., 1.], &mut x).unwrap_err();
        assert_eq!(
            err,
            FactorError::DimensionMismatch {
                expected: 1,
                found: 2
            }
        );
        assert_eq!(x, before);

        // absent keys are not inserted either
        let mut x: VectorValues = [(9, vec![0., 0.])].into_iter().collect();
        assert!(jf.transpose_multiply_add(1.0, &[1., 1., 1.], &mut x).is_err());
        assert!(!x.contains(4));
    }

    #[test]
    fn test_set_model_bad_sigmas() {
        let mut jf = test_factor();
        jf.set_model(false, &[1., 2., 1.]).unwrap();
        let model = jf.get_model().cloned();

        let err = jf.set_model(false, &[-1., 1., 1.]).unwrap_err();
        assert_eq!(err, FactorError::InvalidSigma { index: 0, value: -1. });

        let err = jf.set_model(false, &[1., f64::NAN, 1.]).unwrap_err();
        assert!(matches!(err, FactorError::InvalidSigma { index: 1, .. }));

        let err = jf.set_model(true, &[0., 1., -2.]).unwrap_err();
        assert_eq!(err, FactorError::InvalidSigma { index: 2, value: -2. });

        assert_eq!(jf.get_model().cloned(), model);
    }

    #[test]
    fn test_augmented_jacobian() {
        let mut jf = test_factor();
        jf.set_model(false, &[1., 2., 1.]).unwrap();

        let Ab = jf.augmented_jacobian();
        assert_eq!(Ab.size(), (3, 4));
        assert_eq!(Ab[(1, 0)], 1.5);
        assert_eq!(Ab[(1, 3)], 1.);

        let (A, b) = jf.jacobian();
        assert_eq!(A.size(), (3, 3));
        assert_eq!(b, vec![1., 1., 3.]);
    }
}
