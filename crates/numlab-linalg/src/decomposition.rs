use numlab_core::{Float, Matrix, SolverError, SolverResult};

use crate::permutation::Permutation;

/// Explicit factors of a pivoted elimination: `P A = L U`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition<T: Float> {
    /// Unit lower-triangular.
    pub l: Matrix<T>,
    /// Upper-triangular.
    pub u: Matrix<T>,
    /// Permutation matrix with `P[k, p[k]] = 1`.
    pub p: Matrix<T>,
}

impl<T: Float> LuDecomposition<T> {
    /// Split an elimination workspace into L, U and P.
    ///
    /// Logical row `k` lives in physical row `p[k]` of `lu`: columns `j < k`
    /// are multipliers and go to `L[k, j]`, columns `j >= k` go to `U[k, j]`.
    pub fn extract(lu: &Matrix<T>, perm: &Permutation) -> SolverResult<Self> {
        let n = perm.len();
        if !lu.is_square() || lu.nrows() != n {
            return Err(SolverError::DimensionMismatch(format!(
                "extract: workspace is {}x{} but permutation has {} entries",
                lu.nrows(),
                lu.ncols(),
                n
            )));
        }
        perm.validate()?;

        let mut l = Matrix::eye(n);
        let mut u = Matrix::zeros(n, n);
        for k in 0..n {
            let row = lu.row(perm[k]);
            for (j, &v) in row.iter().enumerate() {
                if j < k {
                    l[(k, j)] = v;
                } else {
                    u[(k, j)] = v;
                }
            }
        }

        Ok(LuDecomposition {
            l,
            u,
            p: perm.to_matrix(),
        })
    }

    /// `L U`, which should reproduce `P A`.
    pub fn reconstruct(&self) -> SolverResult<Matrix<T>> {
        self.l.matmul(&self.u)
    }
}
