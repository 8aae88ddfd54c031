use numlab_core::{Float, Matrix, Phase, SolverError, SolverResult};

use crate::permutation::Permutation;
use crate::{check_rhs, check_square};

/// Solve `U x = b` for upper-triangular `U` by back-substitution.
///
/// Entries below the diagonal are ignored. Fails with `SingularPivot` on an
/// exact-zero diagonal entry.
pub fn back_substitute<T: Float>(upper: &Matrix<T>, b: &[T]) -> SolverResult<Vec<T>> {
    let n = check_square(upper, "back_substitute")?;
    check_rhs(n, b, "back_substitute")?;

    let mut x = vec![T::ZERO; n];
    for i in (0..n).rev() {
        let diag = upper[(i, i)];
        if diag == T::ZERO {
            return Err(SolverError::SingularPivot {
                step: i,
                phase: Phase::BackSubstitution,
            });
        }
        let row = upper.row(i);
        let sum: T = row[i + 1..].iter().zip(&x[i + 1..]).map(|(&a, &v)| a * v).sum();
        x[i] = (b[i] - sum) / diag;
    }
    Ok(x)
}

/// Workspace, permutation and right-hand side must describe one n×n system.
fn check_permuted<T: Float>(lu: &Matrix<T>, perm: &Permutation, b: &[T]) -> SolverResult<usize> {
    let n = perm.len();
    if !lu.is_square() || lu.nrows() != n || b.len() != n {
        return Err(SolverError::InvalidState(format!(
            "workspace is {}x{}, permutation has {} entries, b has {}",
            lu.nrows(),
            lu.ncols(),
            n,
            b.len()
        )));
    }
    perm.validate()?;
    Ok(n)
}

/// Replay the elimination recorded in `lu` on the right-hand side.
///
/// `lu[p[i], k]` holds the multiplier that eliminated logical row `i` at step
/// `k`; `b` is indexed by physical row.
pub fn forward_eliminate_permuted<T: Float>(
    lu: &Matrix<T>,
    perm: &Permutation,
    b: &mut [T],
) -> SolverResult<()> {
    let n = check_permuted(lu, perm, b)?;
    for k in 0..n.saturating_sub(1) {
        let pivot_b = b[perm[k]];
        for i in (k + 1)..n {
            let row = perm[i];
            b[row] -= lu[(row, k)] * pivot_b;
        }
    }
    Ok(())
}

/// Back-substitute through the permutation: logical row `ii` lives in
/// physical row `p[ii]`, and `x` comes back in logical (column) order.
pub fn back_substitute_permuted<T: Float>(
    lu: &Matrix<T>,
    perm: &Permutation,
    b: &[T],
) -> SolverResult<Vec<T>> {
    let n = check_permuted(lu, perm, b)?;
    let mut x = vec![T::ZERO; n];
    for ii in (0..n).rev() {
        let i = perm[ii];
        let diag = lu[(i, ii)];
        if diag == T::ZERO {
            return Err(SolverError::SingularPivot {
                step: ii,
                phase: Phase::BackSubstitution,
            });
        }
        let row = lu.row(i);
        let sum: T = row[ii + 1..].iter().zip(&x[ii + 1..]).map(|(&a, &v)| a * v).sum();
        x[ii] = (b[i] - sum) / diag;
    }
    Ok(x)
}
