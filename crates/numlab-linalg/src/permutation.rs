use numlab_core::{Float, Matrix, SolverError, SolverResult};
use std::ops::Index;

/// Row order of a pivoted factorization.
///
/// `p[k]` is the physical row that occupies logical position `k`. Rows are
/// never moved; the permutation changes only by swapping two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Permutation {
            indices: (0..n).collect(),
        }
    }

    /// Build from raw indices, rejecting anything that is not a bijection on `0..n`.
    pub fn from_indices(indices: Vec<usize>) -> SolverResult<Self> {
        let p = Permutation { indices };
        p.validate()?;
        Ok(p)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.indices.swap(a, b);
    }

    /// Check that every index in `0..n` appears exactly once.
    pub fn validate(&self) -> SolverResult<()> {
        let n = self.indices.len();
        let mut seen = vec![false; n];
        for (k, &i) in self.indices.iter().enumerate() {
            if i >= n {
                return Err(SolverError::InvalidState(format!(
                    "permutation entry p[{}] = {} is out of range for n = {}",
                    k, i, n
                )));
            }
            if seen[i] {
                return Err(SolverError::InvalidState(format!(
                    "permutation repeats row {} (at p[{}])",
                    i, k
                )));
            }
            seen[i] = true;
        }
        Ok(())
    }

    pub fn is_bijection(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parity of the permutation: `true` when it is a product of an odd
    /// number of transpositions.
    pub fn is_odd(&self) -> bool {
        let n = self.indices.len();
        let mut visited = vec![false; n];
        let mut swaps = 0usize;
        for i in 0..n {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            let mut j = self.indices[i];
            let mut cycle_len = 1;
            while j != i {
                visited[j] = true;
                j = self.indices[j];
                cycle_len += 1;
            }
            // A cycle of length k requires k-1 transpositions
            swaps += cycle_len - 1;
        }
        swaps % 2 == 1
    }

    /// 0/1 matrix with `P[k, p[k]] = 1`, so that `(P A)[k] = A[p[k]]`.
    pub fn to_matrix<T: Float>(&self) -> Matrix<T> {
        let n = self.indices.len();
        let mut m = Matrix::zeros(n, n);
        for (k, &i) in self.indices.iter().enumerate() {
            m[(k, i)] = T::ONE;
        }
        m
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    #[inline]
    fn index(&self, k: usize) -> &usize {
        &self.indices[k]
    }
}
