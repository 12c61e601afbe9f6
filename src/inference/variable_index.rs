use super::Key;
use std::collections::{BTreeMap, BTreeSet};

/// Read only access to the variable/factor incidence of a factor graph
///
/// This is the capability needed to build a [`VariableIndex`], and hence to
/// compute fill reducing orderings directly from a graph.   Factor slots
/// may be empty, in which case `factor_keys` returns `None` and the slot
/// is skipped.
pub trait FactorIncidence {
    /// number of factor slots in the graph
    fn nfactors(&self) -> usize;

    /// keys involved in the factor at slot `i`
    fn factor_keys(&self, i: usize) -> Option<&[Key]>;

    /// true if the graph has no factor slots
    fn is_empty(&self) -> bool {
        self.nfactors() == 0
    }

    /// Sorted set of all keys appearing in the graph
    fn keys(&self) -> BTreeSet<Key> {
        (0..self.nfactors())
            .filter_map(|i| self.factor_keys(i))
            .flat_map(|keys| keys.iter().copied())
            .collect()
    }
}

// a purely symbolic graph, with each factor given by its key list
impl FactorIncidence for Vec<Vec<Key>> {
    fn nfactors(&self) -> usize {
        self.len()
    }
    fn factor_keys(&self, i: usize) -> Option<&[Key]> {
        self.get(i).map(|keys| keys.as_slice())
    }
}

impl FactorIncidence for Vec<Option<Vec<Key>>> {
    fn nfactors(&self) -> usize {
        self.len()
    }
    fn factor_keys(&self, i: usize) -> Option<&[Key]> {
        self.get(i).and_then(|keys| keys.as_deref())
    }
}

/// Map from each variable key to the factors that involve it
///
/// Building the index costs one pass over every factor's keys.  It is
/// cheaper to build one index and reuse it for repeated ordering
/// queries than to call the graph based ordering functions, which
/// build a new index on each call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableIndex {
    index: BTreeMap<Key, Vec<usize>>,
    nfactors: usize,
    nentries: usize,
}

impl VariableIndex {
    /// Build the index from the factors of `graph`
    pub fn new<G>(graph: &G) -> Self
    where
        G: FactorIncidence + ?Sized,
    {
        let mut index = Self::default();
        index.augment(graph);
        index
    }

    /// Append the factors of `graph`.   Factor indices of the new factors
    /// continue from the current factor count.
    pub fn augment<G>(&mut self, graph: &G)
    where
        G: FactorIncidence + ?Sized,
    {
        let base = self.nfactors;
        for i in 0..graph.nfactors() {
            let Some(keys) = graph.factor_keys(i) else {
                continue;
            };
            let factor = base + i;
            for &key in keys {
                let factors = self.index.entry(key).or_default();
                // a key repeated within one factor counts once
                if factors.last() != Some(&factor) {
                    factors.push(factor);
                    self.nentries += 1;
                }
            }
        }
        self.nfactors += graph.nfactors();
    }

    /// number of distinct variable keys
    pub fn nkeys(&self) -> usize {
        self.index.len()
    }

    /// number of factor slots indexed, including empty slots
    pub fn nfactors(&self) -> usize {
        self.nfactors
    }

    /// total number of variable/factor incidences
    pub fn nentries(&self) -> usize {
        self.nentries
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.index.contains_key(&key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.index.keys().copied()
    }

    /// Indices of the factors involving `key`, in ascending order
    pub fn factors(&self, key: Key) -> Option<&[usize]> {
        self.index.get(&key).map(|f| f.as_slice())
    }

    /// Iterate over (key, factor indices) pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (Key, &[usize])> + '_ {
        self.index.iter().map(|(&k, f)| (k, f.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_index_from_graph() {
        let graph: Vec<Vec<Key>> = vec![vec![0, 1], vec![1, 2], vec![2], vec![]];
        let index = VariableIndex::new(&graph);

        assert_eq!(index.nkeys(), 3);
        assert_eq!(index.nfactors(), 4);
        assert_eq!(index.nentries(), 5);
        assert_eq!(index.keys().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(index.factors(1), Some(&[0, 1][..]));
        assert_eq!(index.factors(2), Some(&[1, 2][..]));
        assert_eq!(index.factors(7), None);
    }

    #[test]
    fn test_variable_index_skips_empty_slots() {
        let graph: Vec<Option<Vec<Key>>> = vec![Some(vec![4, 5]), None, Some(vec![5, 5])];
        let index = VariableIndex::new(&graph);

        assert_eq!(index.nfactors(), 3);
        assert_eq!(index.factors(5), Some(&[0, 2][..]));
        assert_eq!(index.nentries(), 3);
        assert_eq!(graph.keys().into_iter().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn test_variable_index_augment() {
        let first: Vec<Vec<Key>> = vec![vec![0, 1]];
        let second: Vec<Vec<Key>> = vec![vec![1, 3]];
        let mut index = VariableIndex::new(&first);
        index.augment(&second);

        assert_eq!(index.nfactors(), 2);
        assert_eq!(index.factors(1), Some(&[0, 1][..]));
        assert_eq!(index.factors(3), Some(&[1][..]));
        assert!(index.contains(0));
        assert!(!index.contains(2));
    }
}
