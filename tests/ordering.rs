use gaussfactor::inference::*;
use std::collections::BTreeMap;

// 4x4 grid of poses, with factors between horizontal and vertical
// neighbours and a prior on the first pose
fn grid_graph(n: usize) -> Vec<Vec<Key>> {
    let key = |i: usize, j: usize| 100 + n * i + j;
    let mut graph = vec![vec![key(0, 0)]];
    for i in 0..n {
        for j in 0..n {
            if j + 1 < n {
                graph.push(vec![key(i, j), key(i, j + 1)]);
            }
            if i + 1 < n {
                graph.push(vec![key(i, j), key(i + 1, j)]);
            }
        }
    }
    graph
}

fn sorted(keys: &[Key]) -> Vec<Key> {
    let mut keys = keys.to_vec();
    keys.sort();
    keys
}

#[test]
fn test_colamd_key_set() {
    let graph = grid_graph(4);
    let ordering = Ordering::colamd_from_graph(&graph).unwrap();

    let expected: Vec<Key> = (100..116).collect();
    assert_eq!(sorted(&ordering), expected);

    let inverse = ordering.invert().unwrap();
    assert_eq!(inverse.len(), 16);
    for (i, key) in ordering.iter().enumerate() {
        assert_eq!(inverse[key], i);
    }

    let empty: Vec<Vec<Key>> = Vec::new();
    assert!(Ordering::colamd_from_graph(&empty).unwrap().is_empty());
}

#[test]
fn test_colamd_with_settings() {
    let graph = grid_graph(3);
    let index = VariableIndex::new(&graph);
    let settings = OrderingSettingsBuilder::default()
        .amd_dense_scale(2.0)
        .aggressive(false)
        .build()
        .unwrap();

    let ordering = Ordering::colamd_with_settings(&index, &settings).unwrap();
    assert_eq!(sorted(&ordering), (100..109).collect::<Vec<_>>());
}

#[test]
fn test_constrained_last_any_sparsity() {
    let graph = grid_graph(4);
    let index = VariableIndex::new(&graph);

    for last in [vec![100], vec![115, 100], vec![105, 110, 101, 114]] {
        let ordering = Ordering::colamd_constrained_last(&index, &last, true).unwrap();
        assert_eq!(ordering.len(), 16);
        assert_eq!(&ordering[16 - last.len()..], last.as_slice());

        let ordering = Ordering::colamd_constrained_last(&index, &last, false).unwrap();
        assert_eq!(sorted(&ordering[16 - last.len()..]), sorted(&last));
    }
}

#[test]
fn test_constrained_first_any_sparsity() {
    let graph = grid_graph(4);

    let first = vec![107, 102, 113];
    let ordering = Ordering::colamd_constrained_first_from_graph(&graph, &first, true).unwrap();
    assert_eq!(&ordering[..3], first.as_slice());
    assert_eq!(sorted(&ordering), (100..116).collect::<Vec<_>>());

    let ordering = Ordering::colamd_constrained_first_from_graph(&graph, &first, false).unwrap();
    assert_eq!(sorted(&ordering[..3]), sorted(&first));
}

#[test]
fn test_constrained_groups_partition() {
    let graph = grid_graph(4);
    let groups = BTreeMap::from([(100, 3), (101, 1), (102, 1), (110, 2), (111, 3)]);

    let ordering = Ordering::colamd_constrained_from_graph(&graph, &groups).unwrap();
    assert_eq!(ordering.len(), 16);

    let ids: Vec<usize> = ordering
        .iter()
        .map(|k| groups.get(k).copied().unwrap_or(0))
        .collect();
    assert!(ids.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ids.iter().filter(|&&g| g == 0).count(), 11);
}

#[test]
fn test_natural_ignores_insertion_order() {
    let a: Vec<Vec<Key>> = vec![vec![8, 3], vec![1], vec![3, 5]];
    let b: Vec<Vec<Key>> = vec![vec![5, 3], vec![3, 8], vec![1]];

    assert_eq!(Ordering::natural(&a).keys(), &[1, 3, 5, 8]);
    assert_eq!(Ordering::natural(&a), Ordering::natural(&b));
}

#[test]
fn test_create_dispatch() {
    let graph = grid_graph(2);
    for name in ["colamd", "natural"] {
        let ordering_type: OrderingType = name.parse().unwrap();
        let ordering = Ordering::create(ordering_type, &graph).unwrap();
        assert_eq!(sorted(&ordering), vec![100, 101, 102, 103]);
    }

    let ordering_type: OrderingType = "metis".parse().unwrap();
    assert!(matches!(
        Ordering::create(ordering_type, &graph),
        Err(OrderingError::UnsupportedOrderingType(OrderingType::Metis))
    ));
    assert!("spectral".parse::<OrderingType>().is_err());
}

#[test]
fn test_ordering_reuse_index() {
    let mut index = VariableIndex::new(&grid_graph(2));
    let before = Ordering::colamd(&index).unwrap();

    // a new variable attached to the corner
    let extra: Vec<Vec<Key>> = vec![vec![103, 200]];
    index.augment(&extra);
    let after = Ordering::colamd(&index).unwrap();

    assert_eq!(before.len(), 4);
    assert_eq!(after.len(), 5);
    assert!(after.contains(&200));
}
