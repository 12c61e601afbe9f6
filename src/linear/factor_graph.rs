use super::GaussianFactor;
use crate::algebra::FloatT;
use crate::inference::{FactorIncidence, Key};

/// Collection of Gaussian factors
///
/// Factors are held in slots.  A slot is emptied by
/// [`remove`](GaussianFactorGraph::remove) so that the indices of the
/// remaining factors are unchanged.
#[derive(Default)]
pub struct GaussianFactorGraph<T>
where
    T: FloatT,
{
    factors: Vec<Option<Box<dyn GaussianFactor<T>>>>,
}

impl<T> GaussianFactorGraph<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Append a factor, returning its slot index
    pub fn push<F>(&mut self, factor: F) -> usize
    where
        F: GaussianFactor<T> + 'static,
    {
        self.factors.push(Some(Box::new(factor)));
        self.factors.len() - 1
    }

    /// Empty slot `i`, returning the factor it held
    pub fn remove(&mut self, i: usize) -> Option<Box<dyn GaussianFactor<T>>> {
        self.factors.get_mut(i).and_then(|slot| slot.take())
    }

    /// number of slots, including empty ones
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&dyn GaussianFactor<T>> {
        self.factors.get(i).and_then(|slot| slot.as_deref())
    }

    /// Iterate over the factors of all non-empty slots
    pub fn iter(&self) -> impl Iterator<Item = &dyn GaussianFactor<T>> + '_ {
        self.factors.iter().filter_map(|slot| slot.as_deref())
    }

    /// total number of rows of all factors
    pub fn rows(&self) -> usize {
        self.iter().map(|f| f.rows()).sum()
    }
}

impl<T> FactorIncidence for GaussianFactorGraph<T>
where
    T: FloatT,
{
    fn nfactors(&self) -> usize {
        self.factors.len()
    }

    fn factor_keys(&self, i: usize) -> Option<&[Key]> {
        self.get(i).map(|f| f.keys())
    }
}
