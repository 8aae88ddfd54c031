//! Dense linear system solvers built on Gaussian elimination.
//!
//! Two paths share the same back-substitution contract:
//! - [`naive`]: elimination without pivoting, fails on any zero pivot;
//! - [`scaled`]: scaled partial pivoting through a row permutation, with an
//!   explicit `PA = LU` [`decomposition`].

pub mod batch;
pub mod decomposition;
pub mod naive;
pub mod permutation;
pub mod scaled;
pub mod substitution;

pub use batch::*;
pub use decomposition::*;
pub use naive::*;
pub use permutation::Permutation;
pub use scaled::*;
pub use substitution::*;

use numlab_core::{Float, Matrix, SolverError, SolverResult};

/// Reject empty or non-square matrices before any work is done.
pub(crate) fn check_square<T: Float>(a: &Matrix<T>, op: &str) -> SolverResult<usize> {
    if a.is_empty() {
        return Err(SolverError::DimensionMismatch(format!("{}: matrix is empty", op)));
    }
    if !a.is_square() {
        return Err(SolverError::DimensionMismatch(format!(
            "{}: A must be square, got {}x{}",
            op,
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(a.nrows())
}

/// Reject a right-hand side whose length differs from the system size.
pub(crate) fn check_rhs<T: Float>(n: usize, b: &[T], op: &str) -> SolverResult<()> {
    if b.len() != n {
        return Err(SolverError::DimensionMismatch(format!(
            "{}: b has {} elements but A is {}x{}",
            op,
            b.len(),
            n,
            n
        )));
    }
    Ok(())
}
