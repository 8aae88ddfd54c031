use std::fmt;

use thiserror::Error;

/// Which stage of a solve detected a zero pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Row scale computation (a row with no non-zero entry).
    Scaling,
    /// Forward elimination.
    Elimination,
    /// Back-substitution.
    BackSubstitution,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scaling => write!(f, "scaling"),
            Phase::Elimination => write!(f, "elimination"),
            Phase::BackSubstitution => write!(f, "back-substitution"),
        }
    }
}

/// Core error type for all matrix and solver operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("Shape mismatch: expected {expected} elements for a {rows}x{cols} matrix, got {got}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Singular pivot at logical step {step} during {phase}")]
    SingularPivot { step: usize, phase: Phase },

    #[error("Invalid factorization state: {0}")]
    InvalidState(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type SolverResult<T> = Result<T, SolverError>;
