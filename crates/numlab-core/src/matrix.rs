use crate::dtype::Float;
use crate::error::{SolverError, SolverResult};

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Dense 2-D matrix, the shared container of every NumLab solver.
///
/// Stores data in a flat contiguous `Vec<T>` with row-major layout. Vectors
/// are plain `Vec<T>` / `&[T]`. Serializes as a list of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound = "T: Float",
    try_from = "Vec<Vec<T>>",
    into = "Vec<Vec<T>>"
)]
pub struct Matrix<T: Float> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Float> Matrix<T> {
    /// Create a matrix from row-major data.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> SolverResult<Self> {
        if data.len() != rows * cols {
            return Err(SolverError::ShapeMismatch {
                rows,
                cols,
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// Identity matrix of size n×n.
    pub fn eye(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::ONE;
        }
        m
    }

    /// Create a matrix from a list of rows.
    pub fn from_vec2d(rows: &[Vec<T>]) -> SolverResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }
        let cols = rows[0].len();
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(SolverError::InvalidOperation(format!(
                "row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        let flat: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(flat, rows.len(), cols)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Borrow row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy rows out as nested vectors.
    pub fn to_vec2d(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    // ─── Products ───────────────────────────────────────────────────────────

    /// Matrix multiply.
    pub fn matmul(&self, other: &Matrix<T>) -> SolverResult<Matrix<T>> {
        if self.cols != other.rows {
            return Err(SolverError::DimensionMismatch(format!(
                "matmul: inner dimensions must match, got {} and {}",
                self.cols, other.rows
            )));
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut data = vec![T::ZERO; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::ZERO;
                for p in 0..k {
                    sum += self.data[i * k + p] * other.data[p * n + j];
                }
                data[i * n + j] = sum;
            }
        }
        Matrix::new(data, m, n)
    }

    /// Matrix-vector product `A x`.
    pub fn matvec(&self, x: &[T]) -> SolverResult<Vec<T>> {
        if x.len() != self.cols {
            return Err(SolverError::DimensionMismatch(format!(
                "matvec: vector has {} elements but matrix is {}x{}",
                x.len(),
                self.rows,
                self.cols
            )));
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(x).map(|(&a, &v)| a * v).sum())
            .collect())
    }

    // ─── Norms ──────────────────────────────────────────────────────────────

    /// Largest absolute element-wise difference between two same-shaped matrices.
    pub fn max_abs_diff(&self, other: &Matrix<T>) -> SolverResult<T> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(SolverError::DimensionMismatch(format!(
                "max_abs_diff: {}x{} vs {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(T::ZERO, |acc, (&a, &b)| acc.max((a - b).abs())))
    }

    /// Infinity norm of the residual `A x - b`.
    pub fn residual_inf(&self, x: &[T], b: &[T]) -> SolverResult<T> {
        if b.len() != self.rows {
            return Err(SolverError::DimensionMismatch(format!(
                "residual: b has {} elements but matrix has {} rows",
                b.len(),
                self.rows
            )));
        }
        let ax = self.matvec(x)?;
        Ok(ax
            .iter()
            .zip(b)
            .fold(T::ZERO, |acc, (&l, &r)| acc.max((l - r).abs())))
    }
}

impl<T: Float> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T: Float> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Float> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = SolverError;

    fn try_from(rows: Vec<Vec<T>>) -> SolverResult<Self> {
        Matrix::from_vec2d(&rows)
    }
}

impl<T: Float> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(m: Matrix<T>) -> Self {
        m.to_vec2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_shape_mismatch() {
        let err = Matrix::<f64>::new(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(err, SolverError::ShapeMismatch { expected: 4, got: 3, .. }));
    }

    #[test]
    fn test_from_vec2d_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Matrix::<f64>::from_vec2d(&rows).is_err());
    }

    #[test]
    fn test_indexing() {
        let mut m = Matrix::<f64>::from_vec2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m[(1, 0)], 3.0);
        m[(0, 1)] = 7.0;
        assert_eq!(m.row(0), &[1.0, 7.0]);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_matmul_identity() {
        let a = Matrix::<f64>::from_vec2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let i = Matrix::eye(2);
        assert_eq!(a.matmul(&i).unwrap(), a);
        assert_eq!(i.matmul(&a).unwrap(), a);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(a.matmul(&b), Err(SolverError::DimensionMismatch(_))));
    }

    #[test]
    fn test_matvec_and_residual() {
        let a = Matrix::<f64>::from_vec2d(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let x = [1.6, 1.8];
        let ax = a.matvec(&x).unwrap();
        assert_abs_diff_eq!(ax[0], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ax[1], 7.0, epsilon = 1e-12);
        assert!(a.residual_inf(&x, &[5.0, 7.0]).unwrap() < 1e-12);
        assert!(a.residual_inf(&x, &[5.0]).is_err());
    }

    #[test]
    fn test_serde_rows() {
        let a = Matrix::<f64>::from_vec2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
        let back: Matrix<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_str::<Matrix<f64>>("[[1.0],[2.0,3.0]]").is_err());
    }
}
