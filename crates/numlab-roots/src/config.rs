use numlab_core::Float;
use serde::{Deserialize, Serialize};

use crate::error::{RootError, RootResult};

/// Stopping rules shared by all methods.
///
/// An iteration stops when the step is shorter than `delta` or the residual
/// `|f(x)|` is below `epsilon`; it fails after `max_iter` steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub delta: f64,
    pub epsilon: f64,
    pub max_iter: usize,
}

impl RootConfig {
    pub fn new(delta: f64, epsilon: f64, max_iter: usize) -> Self {
        RootConfig {
            delta,
            epsilon,
            max_iter,
        }
    }

    pub(crate) fn validate(&self) -> RootResult<()> {
        if !(self.delta >= 0.0 && self.epsilon >= 0.0) {
            return Err(RootError::InvalidConfig(format!(
                "tolerances must be non-negative, got delta = {}, epsilon = {}",
                self.delta, self.epsilon
            )));
        }
        if self.max_iter == 0 {
            return Err(RootError::InvalidConfig("max_iter must be at least 1".into()));
        }
        Ok(())
    }

    pub(crate) fn converged<T: Float>(&self, step: T, fx: T) -> bool {
        step.abs() < T::from_f64(self.delta) || fx.abs() < T::from_f64(self.epsilon)
    }
}

impl Default for RootConfig {
    fn default() -> Self {
        RootConfig::new(1e-7, 1e-7, 100)
    }
}

/// An approximate root and the number of iterations it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root<T: Float> {
    pub x: T,
    pub iterations: usize,
}
