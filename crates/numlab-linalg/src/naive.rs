use numlab_core::{Float, Matrix, Phase, SolverError, SolverResult};

use crate::substitution::back_substitute;
use crate::{check_rhs, check_square};

/// Result of forward elimination without pivoting.
///
/// `upper` is truly upper-triangular (eliminated entries are zeroed); the
/// multiplier used to clear `(i, k)` is kept in the separate strictly-lower
/// store `multipliers` so the same elimination can be replayed on any `b`.
#[derive(Debug, Clone)]
pub struct NaiveFactorization<T: Float> {
    upper: Matrix<T>,
    multipliers: Matrix<T>,
}

impl<T: Float> NaiveFactorization<T> {
    pub fn n(&self) -> usize {
        self.upper.nrows()
    }

    pub fn upper(&self) -> &Matrix<T> {
        &self.upper
    }

    pub fn multipliers(&self) -> &Matrix<T> {
        &self.multipliers
    }

    /// Apply the recorded elimination to `b`, then back-substitute.
    pub fn solve(&self, b: &[T]) -> SolverResult<Vec<T>> {
        let n = self.n();
        if b.len() != n {
            return Err(SolverError::InvalidState(format!(
                "b has {} elements but the factorization is {}x{}",
                b.len(),
                n,
                n
            )));
        }

        let mut rhs = b.to_vec();
        for k in 0..n.saturating_sub(1) {
            let pivot_rhs = rhs[k];
            for i in (k + 1)..n {
                rhs[i] -= self.multipliers[(i, k)] * pivot_rhs;
            }
        }
        back_substitute(&self.upper, &rhs)
    }
}

/// Forward elimination without pivoting.
///
/// Fails with `SingularPivot` as soon as a diagonal entry `A[k, k]` is exactly
/// zero; there is no row exchange and no retry. The caller's matrix is not
/// modified.
pub fn factorize_naive<T: Float>(a: &Matrix<T>) -> SolverResult<NaiveFactorization<T>> {
    let n = check_square(a, "factorize_naive")?;

    let mut upper = a.clone();
    let mut multipliers = Matrix::zeros(n, n);

    for k in 0..n.saturating_sub(1) {
        let pivot = upper[(k, k)];
        if pivot == T::ZERO {
            log::debug!("naive elimination: zero pivot at step {}", k);
            return Err(SolverError::SingularPivot {
                step: k,
                phase: Phase::Elimination,
            });
        }

        for i in (k + 1)..n {
            let z = upper[(i, k)] / pivot;
            upper[(i, k)] = T::ZERO;
            multipliers[(i, k)] = z;
            for j in (k + 1)..n {
                let pivot_row_entry = upper[(k, j)];
                upper[(i, j)] -= z * pivot_row_entry;
            }
        }
    }

    Ok(NaiveFactorization { upper, multipliers })
}

/// Solve with a naive factorization.
pub fn solve_naive<T: Float>(fact: &NaiveFactorization<T>, b: &[T]) -> SolverResult<Vec<T>> {
    fact.solve(b)
}

/// Full naive Gaussian elimination: eliminate without pivoting, then
/// back-substitute.
pub fn gauss_naive_solve<T: Float>(a: &Matrix<T>, b: &[T]) -> SolverResult<Vec<T>> {
    let n = check_square(a, "gauss_naive_solve")?;
    check_rhs(n, b, "gauss_naive_solve")?;
    factorize_naive(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_naive_solve_2x2() {
        // 2x + y = 5
        // x + 3y = 7
        // Solution: x=1.6, y=1.8
        let a = Matrix::from_vec2d(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let x = gauss_naive_solve(&a, &[5.0, 7.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.6, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_upper_is_triangular_and_multipliers_separate() {
        let a = Matrix::from_vec2d(&[
            vec![2.0, 1.0, 1.0],
            vec![4.0, 3.0, 3.0],
            vec![8.0, 7.0, 9.0],
        ])
        .unwrap();
        let fact = factorize_naive(&a).unwrap();
        let u = fact.upper();
        for i in 0..3 {
            for j in 0..i {
                assert_eq!(u[(i, j)], 0.0);
            }
        }
        assert_eq!(fact.multipliers()[(1, 0)], 2.0);
        assert_eq!(fact.multipliers()[(2, 0)], 4.0);
        assert_eq!(fact.multipliers()[(2, 1)], 3.0);

        // L·U reproduces A when L = I + multipliers
        let mut l = Matrix::eye(3);
        for i in 0..3 {
            for j in 0..i {
                l[(i, j)] = fact.multipliers()[(i, j)];
            }
        }
        let lu = l.matmul(u).unwrap();
        assert!(lu.max_abs_diff(&a).unwrap() < 1e-12);
    }

    #[test]
    fn test_caller_matrix_untouched() {
        let a = Matrix::from_vec2d(&[vec![4.0, 2.0], vec![2.0, 3.0]]).unwrap();
        let before = a.clone();
        let _ = gauss_naive_solve(&a, &[1.0, 1.0]).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn test_zero_first_pivot() {
        let a = Matrix::from_vec2d(&[vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let err = gauss_naive_solve(&a, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot { step: 0, phase: Phase::Elimination }
        );
    }

    #[test]
    fn test_zero_last_pivot_caught_in_back_substitution() {
        let a = Matrix::from_vec2d(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let err = gauss_naive_solve(&a, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot { step: 1, phase: Phase::BackSubstitution }
        );
    }

    #[test]
    fn test_replay_on_several_rhs() {
        let a = Matrix::from_vec2d(&[
            vec![2.0, 1.0, 1.0],
            vec![4.0, 3.0, 3.0],
            vec![8.0, 7.0, 9.0],
        ])
        .unwrap();
        let fact = factorize_naive(&a).unwrap();

        for b in [[4.0, 10.0, 24.0], [1.0, 0.0, -2.0]] {
            let x = solve_naive(&fact, &b).unwrap();
            assert!(a.residual_inf(&x, &b).unwrap() < 1e-12);
            assert_eq!(x, gauss_naive_solve(&a, &b).unwrap());
        }
        let x = fact.solve(&[4.0, 10.0, 24.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_factorization_solve_rejects_wrong_rhs_length() {
        let fact = factorize_naive(&Matrix::<f64>::eye(3)).unwrap();
        assert!(matches!(fact.solve(&[1.0, 2.0]), Err(SolverError::InvalidState(_))));
        assert!(matches!(
            solve_naive(&fact, &[1.0, 2.0, 3.0, 4.0]),
            Err(SolverError::InvalidState(_))
        ));
    }

    #[test]
    fn test_one_by_one() {
        let a = Matrix::from_vec2d(&[vec![5.0]]).unwrap();
        let x = gauss_naive_solve(&a, &[10.0]).unwrap();
        assert_eq!(x, vec![2.0]);
    }

    #[test]
    fn test_dimension_checks() {
        let rect = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(factorize_naive(&rect), Err(SolverError::DimensionMismatch(_))));

        let empty = Matrix::<f64>::zeros(0, 0);
        assert!(matches!(factorize_naive(&empty), Err(SolverError::DimensionMismatch(_))));

        let a = Matrix::<f64>::eye(3);
        assert!(matches!(
            gauss_naive_solve(&a, &[1.0, 2.0]),
            Err(SolverError::DimensionMismatch(_))
        ));
    }
}
