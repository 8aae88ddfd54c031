use numlab_core::{Float, Matrix, Phase, SolverError, SolverResult};

use crate::decomposition::LuDecomposition;
use crate::permutation::Permutation;
use crate::substitution::{back_substitute_permuted, forward_eliminate_permuted};
use crate::{check_rhs, check_square};

/// Output of Gaussian elimination with scaled partial pivoting.
///
/// The bundle owns its elimination workspace. For logical row `k` (physical
/// row `p[k]`), columns `j >= k` of `lu` hold the U entries and columns
/// `j < k` hold the multipliers that form the strict lower part of L.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFactorization<T: Float> {
    lu: Matrix<T>,
    perm: Permutation,
    scales: Vec<T>,
}

impl<T: Float> ScaledFactorization<T> {
    /// Reassemble a bundle from its parts, checking that they belong together.
    pub fn from_parts(lu: Matrix<T>, perm: Permutation, scales: Vec<T>) -> SolverResult<Self> {
        let fact = ScaledFactorization { lu, perm, scales };
        fact.validate()?;
        Ok(fact)
    }

    pub fn n(&self) -> usize {
        self.perm.len()
    }

    /// Elimination workspace: U on and above each logical diagonal, multipliers below.
    pub fn lu(&self) -> &Matrix<T> {
        &self.lu
    }

    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    /// Row scales `s[i] = max_j |A[i, j]|` of the original matrix.
    pub fn scales(&self) -> &[T] {
        &self.scales
    }

    pub fn into_parts(self) -> (Matrix<T>, Permutation, Vec<T>) {
        (self.lu, self.perm, self.scales)
    }

    /// Check that workspace, permutation and scales describe one n×n system.
    pub fn validate(&self) -> SolverResult<()> {
        let n = self.perm.len();
        if !self.lu.is_square() || self.lu.nrows() != n {
            return Err(SolverError::InvalidState(format!(
                "workspace is {}x{} but permutation has {} entries",
                self.lu.nrows(),
                self.lu.ncols(),
                n
            )));
        }
        if self.scales.len() != n {
            return Err(SolverError::InvalidState(format!(
                "scale vector has {} entries, expected {}",
                self.scales.len(),
                n
            )));
        }
        self.perm.validate()
    }

    /// Solve `A x = b` for the matrix this bundle was factorized from.
    pub fn solve(&self, b: &[T]) -> SolverResult<Vec<T>> {
        self.validate()?;
        if b.len() != self.n() {
            return Err(SolverError::InvalidState(format!(
                "b has {} elements but the factorization is {}x{}",
                b.len(),
                self.n(),
                self.n()
            )));
        }

        let mut rhs = b.to_vec();
        forward_eliminate_permuted(&self.lu, &self.perm, &mut rhs)?;
        back_substitute_permuted(&self.lu, &self.perm, &rhs)
    }

    /// Explicit `L`, `U`, `P` with `P A = L U`.
    pub fn decompose(&self) -> SolverResult<LuDecomposition<T>> {
        LuDecomposition::extract(&self.lu, &self.perm)
    }

    /// Determinant of the original matrix: product of the U diagonal, with
    /// the sign of the permutation.
    pub fn determinant(&self) -> SolverResult<T> {
        self.validate()?;
        let mut d = T::ONE;
        for k in 0..self.n() {
            d *= self.lu[(self.perm[k], k)];
        }
        if self.perm.is_odd() {
            d = -d;
        }
        Ok(d)
    }

    /// Inverse of the original matrix, one column per unit right-hand side.
    pub fn inverse(&self) -> SolverResult<Matrix<T>> {
        let n = self.n();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![T::ZERO; n];
        for col in 0..n {
            e[col] = T::ONE;
            let x = self.solve(&e)?;
            e[col] = T::ZERO;
            for (i, v) in x.into_iter().enumerate() {
                inv[(i, col)] = v;
            }
        }
        Ok(inv)
    }
}

/// Row scales of the original matrix, computed once before elimination.
fn row_scales<T: Float>(a: &Matrix<T>) -> SolverResult<Vec<T>> {
    (0..a.nrows())
        .map(|i| {
            let s = a.row(i).iter().fold(T::ZERO, |acc, &v| acc.max(v.abs()));
            if s == T::ZERO {
                Err(SolverError::SingularPivot {
                    step: i,
                    phase: Phase::Scaling,
                })
            } else {
                Ok(s)
            }
        })
        .collect()
}

/// Pick the logical row in `k..n` maximizing `|A[p[row], k]| / s[p[row]]`.
///
/// Ties go to the lowest logical index (strict `>` comparison), so repeated
/// factorizations of the same matrix pick the same pivots.
fn select_pivot<T: Float>(
    lu: &Matrix<T>,
    perm: &Permutation,
    scales: &[T],
    k: usize,
) -> (usize, T) {
    let ratio = |row: usize| {
        let i = perm[row];
        lu[(i, k)].abs() / scales[i]
    };
    let mut best = k;
    let mut best_ratio = ratio(k);
    for row in (k + 1)..perm.len() {
        let r = ratio(row);
        if r > best_ratio {
            best = row;
            best_ratio = r;
        }
    }
    (best, best_ratio)
}

/// Gaussian elimination with scaled partial pivoting.
///
/// Rows are never moved: the pivot order is recorded in the returned
/// permutation and every elimination step stores its multiplier at the
/// position it eliminates. The caller's matrix is not modified.
pub fn factorize_scaled<T: Float>(a: &Matrix<T>) -> SolverResult<ScaledFactorization<T>> {
    let n = check_square(a, "factorize_scaled")?;

    let scales = row_scales(a)?;
    let mut lu = a.clone();
    let mut perm = Permutation::identity(n);

    for k in 0..n.saturating_sub(1) {
        let (selected, ratio) = select_pivot(&lu, &perm, &scales, k);
        perm.swap(k, selected);
        log::debug!(
            "scaled pivoting step {}: logical row {} (physical {}), ratio {:e}",
            k,
            selected,
            perm[k],
            ratio
        );

        let pivot_row = perm[k];
        let pivot = lu[(pivot_row, k)];
        if pivot == T::ZERO {
            return Err(SolverError::SingularPivot {
                step: k,
                phase: Phase::Elimination,
            });
        }

        for i in (k + 1)..n {
            let row = perm[i];
            let z = lu[(row, k)] / pivot;
            lu[(row, k)] = z;
            for j in (k + 1)..n {
                let pivot_entry = lu[(pivot_row, j)];
                lu[(row, j)] -= z * pivot_entry;
            }
        }
    }

    Ok(ScaledFactorization { lu, perm, scales })
}

/// Solve `A x = b` with a scaled-pivoting factorization of `A`.
pub fn solve_scaled<T: Float>(fact: &ScaledFactorization<T>, b: &[T]) -> SolverResult<Vec<T>> {
    fact.solve(b)
}

/// Solve and also return the explicit `P A = L U` decomposition.
pub fn solve_scaled_with_decomposition<T: Float>(
    fact: &ScaledFactorization<T>,
    b: &[T],
) -> SolverResult<(Vec<T>, LuDecomposition<T>)> {
    let x = fact.solve(b)?;
    Ok((x, fact.decompose()?))
}

/// Factorize and solve in one call.
pub fn gauss_scaled_solve<T: Float>(a: &Matrix<T>, b: &[T]) -> SolverResult<Vec<T>> {
    let n = check_square(a, "gauss_scaled_solve")?;
    check_rhs(n, b, "gauss_scaled_solve")?;
    factorize_scaled(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lab_matrix() -> Matrix<f64> {
        Matrix::from_vec2d(&[
            vec![2.0, 3.0, -6.0],
            vec![1.0, -6.0, 8.0],
            vec![3.0, -2.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_scales_and_pivot_order() {
        let fact = factorize_scaled(&lab_matrix()).unwrap();
        assert_eq!(fact.scales(), &[6.0, 8.0, 3.0]);
        // Step 0 ratios: 2/6, 1/8, 3/3 -> physical row 2.
        // Step 1 ratios: (16/3)/8 for row 1, (13/3)/6 for row 0 -> physical row 0.
        assert_eq!(fact.permutation().as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn test_solve_lab_system() {
        let a = lab_matrix();
        let b = [7.0, 14.0, 28.0];
        let fact = factorize_scaled(&a).unwrap();
        let x = fact.solve(&b).unwrap();
        assert!(a.residual_inf(&x, &b).unwrap() < 1e-10);
    }

    #[test]
    fn test_multiplier_stored_in_place() {
        let a = Matrix::from_vec2d(&[vec![1.0, 2.0], vec![4.0, 1.0]]).unwrap();
        // Ratios 1/2 and 4/4 -> physical row 1 pivots; multiplier 1/4 lands at (0, 0).
        let fact = factorize_scaled(&a).unwrap();
        assert_eq!(fact.permutation().as_slice(), &[1, 0]);
        assert_abs_diff_eq!(fact.lu()[(0, 0)], 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(fact.lu()[(0, 1)], 1.75, epsilon = 1e-15);
    }

    #[test]
    fn test_tie_break_first_occurrence() {
        // Every row has the same ratio at step 0; identity order must survive.
        let a = Matrix::from_vec2d(&[vec![1.0, 1.0], vec![2.0, 1.0]]).unwrap();
        let fact = factorize_scaled(&a).unwrap();
        assert_eq!(fact.permutation().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_zero_row_rejected() {
        let a = Matrix::from_vec2d(&[vec![1.0, 2.0], vec![0.0, 0.0]]).unwrap();
        let err = factorize_scaled(&a).unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot { step: 1, phase: Phase::Scaling }
        );
    }

    #[test]
    fn test_singular_column_rejected() {
        let a = Matrix::from_vec2d(&[
            vec![0.0, 1.0, 2.0],
            vec![0.0, 3.0, 1.0],
            vec![0.0, 5.0, 4.0],
        ])
        .unwrap();
        let err = factorize_scaled(&a).unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot { step: 0, phase: Phase::Elimination }
        );
    }

    #[test]
    fn test_rank_deficient_caught_in_back_substitution() {
        let a = Matrix::from_vec2d(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let fact = factorize_scaled(&a).unwrap();
        let err = fact.solve(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot { step: 1, phase: Phase::BackSubstitution }
        );
    }

    #[test]
    fn test_from_parts_rejects_mismatched_bundle() {
        let fact = factorize_scaled(&lab_matrix()).unwrap();
        let (lu, perm, mut scales) = fact.into_parts();

        scales.pop();
        assert!(matches!(
            ScaledFactorization::from_parts(lu.clone(), perm.clone(), scales),
            Err(SolverError::InvalidState(_))
        ));

        let small = Matrix::<f64>::eye(2);
        assert!(matches!(
            ScaledFactorization::from_parts(small, perm, vec![1.0, 1.0, 1.0]),
            Err(SolverError::InvalidState(_))
        ));
    }

    #[test]
    fn test_solve_rejects_wrong_rhs_length() {
        let fact = factorize_scaled(&lab_matrix()).unwrap();
        assert!(matches!(fact.solve(&[1.0, 2.0]), Err(SolverError::InvalidState(_))));
    }

    #[test]
    fn test_determinant() {
        let a = Matrix::from_vec2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let d = factorize_scaled(&a).unwrap().determinant().unwrap();
        // det = 1*4 - 2*3 = -2
        assert_abs_diff_eq!(d, -2.0, epsilon = 1e-12);

        // 2(-6+16) - 3(1-24) + (-6)(-2+18) = 20 + 69 - 96 = -7
        let d = factorize_scaled(&lab_matrix()).unwrap().determinant().unwrap();
        assert_abs_diff_eq!(d, -7.0, epsilon = 1e-10);
    }

    #[test]
    fn test_inverse() {
        let a = lab_matrix();
        let inv = factorize_scaled(&a).unwrap().inverse().unwrap();
        let product = a.matmul(&inv).unwrap();
        assert!(product.max_abs_diff(&Matrix::eye(3)).unwrap() < 1e-10);
    }

    #[test]
    fn test_caller_matrix_untouched() {
        let a = lab_matrix();
        let before = a.clone();
        let _ = factorize_scaled(&a).unwrap();
        assert_eq!(a, before);
    }
}
