use super::*;

// a chain 0-1-2-3-4 with an extra factor tying 1 and 3
fn test_graph() -> Vec<Vec<Key>> {
    vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 4], vec![1, 3], vec![4]]
}

fn sorted(keys: &[Key]) -> Vec<Key> {
    let mut keys = keys.to_vec();
    keys.sort();
    keys
}

#[test]
fn test_ordering_basics() {
    let mut ordering = Ordering::from_keys([3, 1, 2]);
    assert_eq!(ordering.len(), 3);
    assert_eq!(ordering[0], 3);

    assert_eq!(ordering.push(7).unwrap(), &[3, 1, 2, 7]);
    assert_eq!(ordering.push(1), Err(OrderingError::DuplicateKey(1)));

    let inverse = ordering.invert().unwrap();
    assert_eq!(inverse[&3], 0);
    assert_eq!(inverse[&7], 3);

    let bad = Ordering::from(vec![1, 2, 1]);
    assert_eq!(bad.invert(), Err(OrderingError::DuplicateKey(1)));

    assert_eq!(ordering.to_string(), "Ordering (3, 1, 2, 7)");
}

#[test]
fn test_ordering_push_many() {
    let n = 20_000;
    let mut ordering = Ordering::default();
    for key in (0..n).rev() {
        ordering.push(key).unwrap();
    }
    assert_eq!(ordering.len(), n);
    assert_eq!(ordering[0], n - 1);
    assert_eq!(ordering.push(n / 2), Err(OrderingError::DuplicateKey(n / 2)));

    // keys given up front are also checked by push
    let mut ordering = Ordering::from(vec![5, 6, 5]);
    assert_eq!(ordering.push(6), Err(OrderingError::DuplicateKey(6)));
    assert_eq!(ordering.push(8).unwrap(), &[5, 6, 5, 8]);

    let collected: Ordering = [5, 6, 5, 8].into_iter().collect();
    assert_eq!(collected, ordering);
}

#[test]
fn test_colamd_is_permutation() {
    let index = VariableIndex::new(&test_graph());
    let ordering = Ordering::colamd(&index).unwrap();
    assert_eq!(sorted(&ordering), vec![0, 1, 2, 3, 4]);
    assert!(ordering.invert().is_ok());

    // repeated calls are deterministic
    assert_eq!(ordering, Ordering::colamd(&index).unwrap());
}

#[test]
fn test_colamd_constrained_last() {
    let index = VariableIndex::new(&test_graph());

    let ordering = Ordering::colamd_constrained_last(&index, &[2, 0], true).unwrap();
    assert_eq!(ordering.len(), 5);
    assert_eq!(&ordering[3..], &[2, 0]);

    let ordering = Ordering::colamd_constrained_last(&index, &[2, 0], false).unwrap();
    assert_eq!(sorted(&ordering[3..]), vec![0, 2]);
    assert_eq!(sorted(&ordering[..3]), vec![1, 3, 4]);
}

#[test]
fn test_colamd_constrained_first() {
    let index = VariableIndex::new(&test_graph());

    let ordering = Ordering::colamd_constrained_first(&index, &[4, 1, 0], true).unwrap();
    assert_eq!(&ordering[..3], &[4, 1, 0]);
    assert_eq!(sorted(&ordering[3..]), vec![2, 3]);

    let ordering = Ordering::colamd_constrained_first(&index, &[4, 1], false).unwrap();
    assert_eq!(sorted(&ordering[..2]), vec![1, 4]);
}

#[test]
fn test_colamd_constrained_groups() {
    let index = VariableIndex::new(&test_graph());
    let groups = BTreeMap::from([(0, 2), (1, 1), (4, 1)]);

    let ordering = Ordering::colamd_constrained(&index, &groups).unwrap();
    assert_eq!(sorted(&ordering[..2]), vec![2, 3]);
    assert_eq!(sorted(&ordering[2..4]), vec![1, 4]);
    assert_eq!(ordering[4], 0);
}

#[test]
fn test_constrained_bad_keys() {
    let index = VariableIndex::new(&test_graph());

    let err = Ordering::colamd_constrained_last(&index, &[1, 9], false).unwrap_err();
    assert_eq!(err, OrderingError::UnknownKey(9));

    let err = Ordering::colamd_constrained_first(&index, &[1, 1], true).unwrap_err();
    assert_eq!(err, OrderingError::DuplicateKey(1));

    let groups = BTreeMap::from([(11, 1)]);
    let err = Ordering::colamd_constrained(&index, &groups).unwrap_err();
    assert_eq!(err, OrderingError::UnknownKey(11));
}

#[test]
fn test_empty_orderings() {
    let index = VariableIndex::default();
    assert!(Ordering::colamd(&index).unwrap().is_empty());
    // constrained keys are not checked against an empty index
    assert!(Ordering::colamd_constrained_last(&index, &[3], true)
        .unwrap()
        .is_empty());

    let graph: Vec<Vec<Key>> = vec![];
    assert!(Ordering::colamd_from_graph(&graph).unwrap().is_empty());
    assert!(Ordering::natural(&graph).is_empty());
    assert!(Ordering::create(OrderingType::Colamd, &graph)
        .unwrap()
        .is_empty());
}

#[test]
fn test_natural_and_create() {
    let graph: Vec<Vec<Key>> = vec![vec![9, 2], vec![5], vec![2, 5, 0]];
    assert_eq!(Ordering::natural(&graph).keys(), &[0, 2, 5, 9]);

    let natural = Ordering::create(OrderingType::Natural, &graph).unwrap();
    assert_eq!(natural.keys(), &[0, 2, 5, 9]);

    let colamd = Ordering::create(OrderingType::Colamd, &graph).unwrap();
    assert_eq!(colamd, Ordering::colamd_from_graph(&graph).unwrap());

    let err = Ordering::create(OrderingType::Metis, &graph).unwrap_err();
    assert_eq!(err, OrderingError::UnsupportedOrderingType(OrderingType::Metis));
    let err = Ordering::create(OrderingType::Custom, &graph).unwrap_err();
    assert_eq!(err, OrderingError::UnsupportedOrderingType(OrderingType::Custom));
}

#[test]
fn test_ordering_type_from_str() {
    assert_eq!("COLAMD".parse::<OrderingType>(), Ok(OrderingType::Colamd));
    assert_eq!("natural".parse::<OrderingType>(), Ok(OrderingType::Natural));
    assert_eq!(
        "amd".parse::<OrderingType>(),
        Err(OrderingError::UnknownOrderingType("amd".to_string()))
    );
    assert_eq!(OrderingType::Metis.to_string(), "metis");
}
