use numlab_core::{Float, Matrix, SolverResult};
use rayon::prelude::*;

use crate::scaled::gauss_scaled_solve;

/// Solve many independent systems in parallel with scaled pivoting.
///
/// Each system is factorized and solved inside its own task; results come
/// back in input order and one failure does not affect the others.
pub fn solve_batch<T: Float>(systems: &[(Matrix<T>, Vec<T>)]) -> Vec<SolverResult<Vec<T>>> {
    let results: Vec<SolverResult<Vec<T>>> = systems
        .par_iter()
        .map(|(a, b)| gauss_scaled_solve(a, b))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        log::warn!("batch solve: {} of {} systems failed", failed, systems.len());
    }
    results
}
