#![allow(non_snake_case)]

use crate::algebra::{CscPattern, ShapedMatrix, SparseFormatError};

impl CscPattern {
    /// `CscPattern` constructor.
    ///
    /// Fails unless the fields describe a valid pattern, i.e. `colptr` is
    /// nondecreasing with length `n+1`, and row indices are in bounds and
    /// strictly increasing within each column.
    pub fn new(
        m: usize,
        n: usize,
        colptr: Vec<usize>,
        rowval: Vec<usize>,
    ) -> Result<Self, SparseFormatError> {
        let A = CscPattern {
            m,
            n,
            colptr,
            rowval,
        };
        A.check_format()?;
        Ok(A)
    }

    /// Pattern from a list of columns.   Each entry of `cols` lists the
    /// row indices of one column, which should be sorted and free of
    /// duplicates.
    pub fn from_columns(m: usize, cols: &[Vec<usize>]) -> Result<Self, SparseFormatError> {
        let n = cols.len();
        let nnz = cols.iter().map(|c| c.len()).sum();
        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::with_capacity(nnz);

        colptr.push(0);
        for rows in cols {
            rowval.extend_from_slice(rows);
            colptr.push(rowval.len());
        }
        CscPattern::new(m, n, colptr, rowval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Row indices of the structural nonzeros in column `col`
    pub fn col_rows(&self, col: usize) -> &[usize] {
        &self.rowval[self.colptr[col]..self.colptr[col + 1]]
    }

    /// Check that the pattern is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[0] != 0
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            if self.col_rows(col).windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Allocates a new pattern holding the transpose.   Row indices in
    /// each column of the result are sorted.
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.m, self.n);
        let nnz = self.nnz();

        // count entries in each row of self, i.e. each column of the result
        let mut colptr = vec![0; m + 1];
        for &row in &self.rowval[0..nnz] {
            colptr[row + 1] += 1;
        }
        for i in 0..m {
            colptr[i + 1] += colptr[i];
        }

        // next free slot in each column of the result
        let mut next = colptr[0..m].to_vec();
        let mut rowval = vec![0; nnz];

        for col in 0..n {
            for &row in self.col_rows(col) {
                rowval[next[row]] = col;
                next[row] += 1;
            }
        }

        CscPattern {
            m: n,
            n: m,
            colptr,
            rowval,
        }
    }
}

impl ShapedMatrix for CscPattern {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
fn test_pattern_6x5() -> CscPattern {
    // A =
    //[ ⋅  x  ⋅  ⋅  x ]
    //[ x  x  ⋅  ⋅  ⋅ ]
    //[ ⋅  x  ⋅  ⋅  x ]
    //[ x  x  x  ⋅  ⋅ ]
    //[ ⋅  x  x  ⋅  x ]
    //[ x  x  ⋅  ⋅  ⋅ ]

    CscPattern::new(
        6,                                              // m
        5,                                              // n
        vec![0, 3, 9, 11, 11, 14],                      // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4], // rowval
    )
    .unwrap()
}

#[test]
fn test_csc_transpose() {
    let A = test_pattern_6x5();
    let At = A.transpose();

    assert_eq!(At.size(), (5, 6));
    assert_eq!(At.nnz(), A.nnz());
    assert!(At.check_format().is_ok());

    for row in 0..6 {
        for col in 0..5 {
            let in_A = A.col_rows(col).contains(&row);
            let in_At = At.col_rows(row).contains(&col);
            assert_eq!(in_A, in_At);
        }
    }
    assert_eq!(At.col_rows(3), &[0, 1, 2]);
    assert_eq!(At.transpose(), A);
}

#[test]
fn test_csc_from_columns() {
    let A = CscPattern::from_columns(3, &[vec![0, 2], vec![], vec![1]]).unwrap();
    assert_eq!(A.colptr, vec![0, 2, 2, 3]);
    assert_eq!(A.col_rows(0), &[0, 2]);
    assert!(A.col_rows(1).is_empty());

    let err = CscPattern::from_columns(3, &[vec![2, 0]]).unwrap_err();
    assert_eq!(err, SparseFormatError::BadRowval);

    let err = CscPattern::from_columns(2, &[vec![0, 2]]).unwrap_err();
    assert_eq!(err, SparseFormatError::BadRowval);

    let err = CscPattern::new(3, 2, vec![0, 2, 1], vec![0]).unwrap_err();
    assert_eq!(err, SparseFormatError::BadColptr);

    let err = CscPattern::new(3, 2, vec![0, 1], vec![0]).unwrap_err();
    assert_eq!(err, SparseFormatError::IncompatibleDimension);
}
