#![allow(non_snake_case)]
use super::{Key, OrderingError, OrderingSettings, VariableIndex};
use crate::algebra::CscPattern;
use tracing::debug;

// Fill reducing ordering of the variables in a VariableIndex.
//
// The variable/factor incidence is assembled as a sparse matrix A with
// one row per factor and one column per variable.  The kernel is applied
// to the symmetric pattern of A'A, i.e. variables are adjacent when they
// share a factor, which is the column ordering problem COLAMD solves.
//
// If `cmember` is given it assigns a constraint group to every variable,
// indexed in ascending key order.   Groups are laid out in increasing
// order, and the kernel's relative order is kept within each group.

pub(crate) fn colamd_constrained(
    index: &VariableIndex,
    cmember: Option<&[usize]>,
    settings: &OrderingSettings,
) -> Result<Vec<Key>, OrderingError> {
    let keys: Vec<Key> = index.keys().collect();
    let n = keys.len();

    if n == 0 {
        return Ok(Vec::new());
    }
    if let Some(cmember) = cmember {
        assert_eq!(cmember.len(), n);
    }

    let A = incidence_pattern(index)?;
    let AtA = adjacency_pattern(&A)?;

    let mut perm = amd_ordering(&AtA, settings)?;

    if let Some(cmember) = cmember {
        // stable, so the kernel's order survives within a group
        perm.sort_by_key(|&col| cmember[col]);
    }

    Ok(perm.into_iter().map(|col| keys[col]).collect())
}

// Incidence pattern with one row per factor slot and one column per key,
// with columns in ascending key order.
pub(crate) fn incidence_pattern(index: &VariableIndex) -> Result<CscPattern, OrderingError> {
    let cols: Vec<Vec<usize>> = index.iter().map(|(_key, f)| f.to_vec()).collect();
    Ok(CscPattern::from_columns(index.nfactors(), &cols)?)
}

// Symmetric pattern of A'A excluding the diagonal.   Row indices in each
// column are sorted and unique, as required by the kernel.
pub(crate) fn adjacency_pattern(A: &CscPattern) -> Result<CscPattern, OrderingError> {
    let n = A.n;
    let At = A.transpose();

    // mark[v] == j records that v has already been added to column j
    let mut mark = vec![usize::MAX; n];
    let mut cols: Vec<Vec<usize>> = Vec::with_capacity(n);

    for j in 0..n {
        let mut rows = Vec::new();
        for &factor in A.col_rows(j) {
            for &v in At.col_rows(factor) {
                if v != j && mark[v] != j {
                    mark[v] = j;
                    rows.push(v);
                }
            }
        }
        rows.sort_unstable();
        cols.push(rows);
    }
    Ok(CscPattern::from_columns(n, &cols)?)
}

fn amd_ordering(
    AtA: &CscPattern,
    settings: &OrderingSettings,
) -> Result<Vec<usize>, OrderingError> {
    let mut control = amd::Control::default();
    control.dense *= settings.amd_dense_scale;
    control.aggressive = settings.aggressive;

    debug!(
        "computing fill reducing ordering: {} variables, {} adjacency nonzeros",
        AtA.n,
        AtA.nnz()
    );

    let (perm, _iperm, _info) = amd::order(AtA.n, &AtA.colptr, &AtA.rowval, &control)
        .map_err(|status| OrderingError::Kernel(format!("{status:?}")))?;
    Ok(perm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incidence_and_adjacency() {
        // chain 0 - 1 - 2 plus a unary factor on 2
        let graph: Vec<Vec<Key>> = vec![vec![0, 1], vec![1, 2], vec![2]];
        let index = VariableIndex::new(&graph);

        let A = incidence_pattern(&index).unwrap();
        assert_eq!(A.m, 3);
        assert_eq!(A.n, 3);
        assert_eq!(A.col_rows(1), &[0, 1]);

        let AtA = adjacency_pattern(&A).unwrap();
        assert_eq!(AtA.nnz(), 4);
        assert_eq!(AtA.col_rows(0), &[1]);
        assert_eq!(AtA.col_rows(1), &[0, 2]);
        assert_eq!(AtA.col_rows(2), &[1]);
    }

    #[test]
    fn test_colamd_constrained_groups() {
        let graph: Vec<Vec<Key>> = vec![vec![10, 11], vec![11, 12], vec![12, 13]];
        let index = VariableIndex::new(&graph);
        let settings = OrderingSettings::default();

        // key order is 10, 11, 12, 13
        let cmember = vec![1, 0, 2, 0];
        let perm = colamd_constrained(&index, Some(&cmember), &settings).unwrap();

        assert_eq!(perm.len(), 4);
        let tail = &perm[2..];
        assert_eq!(tail, &[10, 12]);
        let mut head = perm[0..2].to_vec();
        head.sort();
        assert_eq!(head, vec![11, 13]);
    }

    #[test]
    fn test_colamd_empty_index() {
        let index = VariableIndex::default();
        let perm = colamd_constrained(&index, None, &OrderingSettings::default()).unwrap();
        assert!(perm.is_empty());
    }
}
