use super::FactorError;
use crate::algebra::{FloatT, VectorMath};
use crate::inference::{Key, Ordering};
use std::collections::BTreeMap;

/// Assignment of a vector value to each of a set of keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorValues<T = f64> {
    values: BTreeMap<Key, Vec<T>>,
}

impl<T> VectorValues<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Set the value of `key`, returning any previous value
    pub fn insert(&mut self, key: Key, value: Vec<T>) -> Option<Vec<T>> {
        self.values.insert(key, value)
    }

    pub fn get(&self, key: Key) -> Option<&[T]> {
        self.values.get(&key).map(|v| v.as_slice())
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut [T]> {
        self.values.get_mut(&key).map(|v| v.as_mut_slice())
    }

    pub fn contains(&self, key: Key) -> bool {
        self.values.contains_key(&key)
    }

    /// number of keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.values.keys().copied()
    }

    /// total dimension of all values
    pub fn dim(&self) -> usize {
        self.values.values().map(|v| v.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &[T])> + '_ {
        self.values.iter().map(|(&k, v)| (k, v.as_slice()))
    }

    /// Concatenation of the values of the keys of `ordering`, in
    /// ordering order
    pub fn vector(&self, ordering: &Ordering) -> Result<Vec<T>, FactorError> {
        let mut out = Vec::new();
        for &key in ordering {
            let v = self.get(key).ok_or(FactorError::MissingKey(key))?;
            out.extend_from_slice(v);
        }
        Ok(out)
    }

    // value of `key`, zero initialised with length `dim` if absent
    pub(crate) fn entry_or_zeros(&mut self, key: Key, dim: usize) -> &mut [T] {
        self.values
            .entry(key)
            .or_insert_with(|| vec![T::zero(); dim])
    }

    /// self[key] += α·v for every key of `other`.   Keys absent from self
    /// are inserted.  Nothing is changed if any width differs.
    pub fn add_scaled(&mut self, α: T, other: &VectorValues<T>) -> Result<(), FactorError> {
        for (key, v) in other.iter() {
            match self.get(key) {
                Some(dest) if dest.len() != v.len() => {
                    return Err(FactorError::DimensionMismatch {
                        expected: dest.len(),
                        found: v.len(),
                    });
                }
                _ => {}
            }
        }
        for (key, v) in other.iter() {
            self.entry_or_zeros(key, v.len()).axpby(α, v, T::one());
        }
        Ok(())
    }
}

impl<T> FromIterator<(Key, Vec<T>)> for VectorValues<T> {
    fn from_iter<I: IntoIterator<Item = (Key, Vec<T>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_values() {
        let mut x: VectorValues = [(2, vec![1., 2.]), (5, vec![3.])].into_iter().collect();
        assert_eq!(x.len(), 2);
        assert_eq!(x.dim(), 3);
        assert_eq!(x.get(5), Some(&[3.][..]));
        assert!(x.get(4).is_none());

        let ordering = Ordering::from_keys([5, 2]);
        assert_eq!(x.vector(&ordering).unwrap(), vec![3., 1., 2.]);

        let ordering = Ordering::from_keys([5, 4]);
        assert_eq!(x.vector(&ordering), Err(FactorError::MissingKey(4)));

        let y: VectorValues = [(2, vec![1., 1.]), (7, vec![2.])].into_iter().collect();
        x.add_scaled(2.0, &y).unwrap();
        assert_eq!(x.get(2), Some(&[3., 4.][..]));
        assert_eq!(x.get(7), Some(&[4.][..]));

        // 2 is fine but 5 has the wrong width, so x must not change
        let bad: VectorValues = [(2, vec![1., 1.]), (5, vec![1., 1.])].into_iter().collect();
        let before = x.clone();
        assert!(x.add_scaled(1.0, &bad).is_err());
        assert_eq!(x, before);
    }
}
