use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplineError {
    #[error("Need at least 3 knots, got {0}")]
    TooFewKnots(usize),

    #[error("Knots and values differ in length: {knots} vs {values}")]
    LengthMismatch { knots: usize, values: usize },

    #[error("Knots must be strictly increasing, violated after t[{index}]")]
    UnsortedKnots { index: usize },

    #[error("x = {x} is outside [{lo}, {hi}]")]
    OutOfRange { x: f64, lo: f64, hi: f64 },
}

pub type SplineResult<T> = Result<T, SplineError>;
