use thiserror::Error;

/// Failures of the root-finding iterations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RootError {
    #[error("Derivative is zero at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("Secant denominator f(x1) - f(x0) is zero at iteration {iteration}")]
    ZeroDenominator { iteration: usize },

    #[error("f(a) = {fa} and f(b) = {fb} must have opposite signs")]
    NoSignChange { fa: f64, fb: f64 },

    #[error("No convergence within {iterations} iterations")]
    NoConvergence { iterations: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type RootResult<T> = Result<T, RootError>;
