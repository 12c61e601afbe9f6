use super::colamd::colamd_constrained;
use super::{FactorIncidence, Key, OrderingError, OrderingSettings, VariableIndex};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Available methods for computing an elimination [`Ordering`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingType {
    /// Fill reducing ordering via approximate minimum degree
    Colamd,
    /// Nested dissection.  Recognized, but not supported by [`Ordering::create`]
    Metis,
    /// Ascending key order
    Natural,
    /// User supplied ordering.  Cannot be created from a graph.
    Custom,
}

impl FromStr for OrderingType {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "colamd" => Ok(OrderingType::Colamd),
            "metis" => Ok(OrderingType::Metis),
            "natural" => Ok(OrderingType::Natural),
            "custom" => Ok(OrderingType::Custom),
            _ => Err(OrderingError::UnknownOrderingType(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderingType::Colamd => "colamd",
            OrderingType::Metis => "metis",
            OrderingType::Natural => "natural",
            OrderingType::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

/// Variable elimination ordering
///
/// An `Ordering` is a sequence of distinct keys, with the key at position
/// 0 eliminated first.  It dereferences to a slice of keys for read-only
/// access, and can only be modified by appending keys with
/// [`push`](Ordering::push).
///
/// Orderings are usually computed from the sparsity of a factor graph,
/// either from a precomputed [`VariableIndex`] or directly from any type
/// implementing [`FactorIncidence`]:
///
/// ```no_run
/// use gaussfactor::inference::{Key, Ordering, VariableIndex};
///
/// let graph: Vec<Vec<Key>> = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
/// let index = VariableIndex::new(&graph);
///
/// let ordering = Ordering::colamd(&index).unwrap();
/// assert_eq!(ordering.len(), 4);
///
/// // keys 0 and 3 eliminated last, in that order
/// let ordering = Ordering::colamd_constrained_last(&index, &[0, 3], true).unwrap();
/// assert_eq!(&ordering[2..], &[0, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ordering {
    keys: Vec<Key>,
    // same keys as a set, for duplicate checks in push
    members: BTreeSet<Key>,
}

impl Ordering {
    /// Ordering with keys in the order given.   Keys are neither sorted
    /// nor deduplicated.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        Self::from(keys.into_iter().collect::<Vec<Key>>())
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Append `key`, returning the updated sequence.
    ///
    /// Fails if `key` is already present.  The check is logarithmic in
    /// the length of the ordering.
    pub fn push(&mut self, key: Key) -> Result<&[Key], OrderingError> {
        if !self.members.insert(key) {
            return Err(OrderingError::DuplicateKey(key));
        }
        self.keys.push(key);
        Ok(&self.keys)
    }

    /// Map from each key to its position in the ordering
    pub fn invert(&self) -> Result<BTreeMap<Key, usize>, OrderingError> {
        let mut inverse = BTreeMap::new();
        for (pos, &key) in self.keys.iter().enumerate() {
            if inverse.insert(key, pos).is_some() {
                return Err(OrderingError::DuplicateKey(key));
            }
        }
        Ok(inverse)
    }

    //------------------------------------------------
    // fill reducing orderings from a variable index
    //------------------------------------------------

    /// Fill reducing ordering of all keys in `index`
    pub fn colamd(index: &VariableIndex) -> Result<Self, OrderingError> {
        Self::colamd_with_settings(index, &OrderingSettings::default())
    }

    pub fn colamd_with_settings(
        index: &VariableIndex,
        settings: &OrderingSettings,
    ) -> Result<Self, OrderingError> {
        let keys = colamd_constrained(index, None, settings)?;
        Ok(Self::from(keys))
    }

    /// Fill reducing ordering with the keys of `constrain_last` placed at
    /// the end.   If `force_order` is set they appear exactly in the order
    /// given, otherwise their relative order is chosen to reduce fill.
    pub fn colamd_constrained_last(
        index: &VariableIndex,
        constrain_last: &[Key],
        force_order: bool,
    ) -> Result<Self, OrderingError> {
        Self::colamd_constrained_last_with_settings(
            index,
            constrain_last,
            force_order,
            &OrderingSettings::default(),
        )
    }

    pub fn colamd_constrained_last_with_settings(
        index: &VariableIndex,
        constrain_last: &[Key],
        force_order: bool,
        settings: &OrderingSettings,
    ) -> Result<Self, OrderingError> {
        if index.is_empty() {
            return Ok(Self::default());
        }
        let groups = tiered_groups(index, constrain_last, |i| {
            if force_order {
                i + 1
            } else {
                1
            }
        })?;
        let cmember = group_members(index, &groups, 0);
        let keys = colamd_constrained(index, Some(&cmember), settings)?;
        Ok(Self::from(keys))
    }

    /// Fill reducing ordering with the keys of `constrain_first` placed at
    /// the start.  If `force_order` is set they appear exactly in the order
    /// given, otherwise their relative order is chosen to reduce fill.
    pub fn colamd_constrained_first(
        index: &VariableIndex,
        constrain_first: &[Key],
        force_order: bool,
    ) -> Result<Self, OrderingError> {
        Self::colamd_constrained_first_with_settings(
            index,
            constrain_first,
            force_order,
            &OrderingSettings::default(),
        )
    }

    pub fn colamd_constrained_first_with_settings(
        index: &VariableIndex,
        constrain_first: &[Key],
        force_order: bool,
        settings: &OrderingSettings,
    ) -> Result<Self, OrderingError> {
        if index.is_empty() {
            return Ok(Self::default());
        }
        let groups = tiered_groups(index, constrain_first, |i| if force_order { i } else { 0 })?;

        // everything else follows the last constrained tier
        let rest = if force_order { constrain_first.len() } else { 1 };
        let cmember = group_members(index, &groups, rest);
        let keys = colamd_constrained(index, Some(&cmember), settings)?;
        Ok(Self::from(keys))
    }

    /// Fill reducing ordering with keys laid out in tiers of increasing
    /// group id.   Keys missing from `groups` belong to group 0.
    pub fn colamd_constrained(
        index: &VariableIndex,
        groups: &BTreeMap<Key, usize>,
    ) -> Result<Self, OrderingError> {
        Self::colamd_constrained_with_settings(index, groups, &OrderingSettings::default())
    }

    pub fn colamd_constrained_with_settings(
        index: &VariableIndex,
        groups: &BTreeMap<Key, usize>,
        settings: &OrderingSettings,
    ) -> Result<Self, OrderingError> {
        if index.is_empty() {
            return Ok(Self::default());
        }
        if let Some(&key) = groups.keys().find(|&&k| !index.contains(k)) {
            return Err(OrderingError::UnknownKey(key));
        }
        let cmember = group_members(index, groups, 0);
        let keys = colamd_constrained(index, Some(&cmember), settings)?;
        Ok(Self::from(keys))
    }

    //------------------------------------------------
    // orderings directly from a factor graph
    //------------------------------------------------

    // Each of these builds a new VariableIndex on every call.   Build the
    // index once and use the functions above for repeated queries.

    /// Fill reducing ordering of all keys in `graph`
    pub fn colamd_from_graph<G>(graph: &G) -> Result<Self, OrderingError>
    where
        G: FactorIncidence + ?Sized,
    {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        Self::colamd(&VariableIndex::new(graph))
    }

    pub fn colamd_constrained_last_from_graph<G>(
        graph: &G,
        constrain_last: &[Key],
        force_order: bool,
    ) -> Result<Self, OrderingError>
    where
        G: FactorIncidence + ?Sized,
    {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        Self::colamd_constrained_last(&VariableIndex::new(graph), constrain_last, force_order)
    }

    pub fn colamd_constrained_first_from_graph<G>(
        graph: &G,
        constrain_first: &[Key],
        force_order: bool,
    ) -> Result<Self, OrderingError>
    where
        G: FactorIncidence + ?Sized,
    {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        Self::colamd_constrained_first(&VariableIndex::new(graph), constrain_first, force_order)
    }

    pub fn colamd_constrained_from_graph<G>(
        graph: &G,
        groups: &BTreeMap<Key, usize>,
    ) -> Result<Self, OrderingError>
    where
        G: FactorIncidence + ?Sized,
    {
        if graph.is_empty() {
            return Ok(Self::default());
        }
        Self::colamd_constrained(&VariableIndex::new(graph), groups)
    }

    /// All keys of `graph` in ascending order, ignoring sparsity
    pub fn natural<G>(graph: &G) -> Self
    where
        G: FactorIncidence + ?Sized,
    {
        let keys: BTreeSet<Key> = graph.keys();
        Self::from_keys(keys)
    }

    /// Compute an ordering of `graph` with the given method
    ///
    /// Only [`Colamd`](OrderingType::Colamd) and
    /// [`Natural`](OrderingType::Natural) can be created from a graph.
    pub fn create<G>(ordering_type: OrderingType, graph: &G) -> Result<Self, OrderingError>
    where
        G: FactorIncidence + ?Sized,
    {
        match ordering_type {
            OrderingType::Colamd => Self::colamd_from_graph(graph),
            OrderingType::Natural => Ok(Self::natural(graph)),
            OrderingType::Metis | OrderingType::Custom => {
                Err(OrderingError::UnsupportedOrderingType(ordering_type))
            }
        }
    }
}

// Group ids for a list of constrained keys, with the i-th key assigned
// to group `group(i)`.  Keys must be present in the index and unique.
fn tiered_groups(
    index: &VariableIndex,
    constrained: &[Key],
    group: impl Fn(usize) -> usize,
) -> Result<BTreeMap<Key, usize>, OrderingError> {
    let mut groups = BTreeMap::new();
    for (i, &key) in constrained.iter().enumerate() {
        if !index.contains(key) {
            return Err(OrderingError::UnknownKey(key));
        }
        if groups.insert(key, group(i)).is_some() {
            return Err(OrderingError::DuplicateKey(key));
        }
    }
    Ok(groups)
}

// Constraint group of every key in the index, in ascending key order
fn group_members(index: &VariableIndex, groups: &BTreeMap<Key, usize>, default: usize) -> Vec<usize> {
    index
        .keys()
        .map(|key| groups.get(&key).copied().unwrap_or(default))
        .collect()
}

impl std::ops::Deref for Ordering {
    type Target = [Key];
    fn deref(&self) -> &[Key] {
        &self.keys
    }
}

impl<'a> IntoIterator for &'a Ordering {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;
    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl From<Vec<Key>> for Ordering {
    fn from(keys: Vec<Key>) -> Self {
        let members = keys.iter().copied().collect();
        Self { keys, members }
    }
}

impl FromIterator<Key> for Ordering {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl std::fmt::Display for Ordering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ordering (")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, ")")
    }
}

#[path = "test.rs"]
#[cfg(test)]
mod test;
