use numlab_core::Float;
use serde::{Deserialize, Serialize};

use crate::error::{HeatError, HeatResult};

/// Finest grid accepted, in cells across `[0, 1]`.
pub const MAX_CELLS: usize = 1_000_000;

/// Grid for the explicit scheme: spatial step `h`, time step `k`, and the
/// number of time steps to take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    pub h: f64,
    pub k: f64,
    pub steps: usize,
}

impl Default for HeatConfig {
    fn default() -> Self {
        HeatConfig {
            h: 0.1,
            k: 0.005125,
            steps: 200,
        }
    }
}

impl HeatConfig {
    /// Mesh ratio `s = k / h²`; the scheme is stable for `s <= 1/2`.
    pub fn mesh_ratio(&self) -> f64 {
        self.k / (self.h * self.h)
    }

    /// Number of interior grid points, `round(1 / h) - 1`.
    pub fn interior_points(&self) -> HeatResult<usize> {
        if !(self.h > 0.0 && self.h < 1.0) {
            return Err(HeatError::InvalidGrid(format!("h must lie in (0, 1), got {}", self.h)));
        }
        if !(self.k > 0.0 && self.k.is_finite()) {
            return Err(HeatError::InvalidGrid(format!("k must be positive, got {}", self.k)));
        }
        let cells = (1.0 / self.h).round();
        if cells > MAX_CELLS as f64 {
            return Err(HeatError::InvalidGrid(format!(
                "h = {} needs more than {} cells",
                self.h, MAX_CELLS
            )));
        }
        let cells = cells as usize;
        if cells < 2 {
            return Err(HeatError::InvalidGrid(format!(
                "h = {} leaves no interior grid point",
                self.h
            )));
        }
        Ok(cells - 1)
    }
}

/// Numerical and exact solution at the final time.
#[derive(Debug, Clone)]
pub struct HeatSolution<T: Float> {
    pub x: Vec<T>,
    pub u_numeric: Vec<T>,
    pub u_exact: Vec<T>,
    pub t_final: T,
    pub s: T,
    pub error_inf: T,
}

/// Explicit finite differences for `u_t = u_xx` on `0 < x < 1` with
/// `u(x, 0) = sin(πx)` and `u(0, t) = u(1, t) = 0`.
///
/// The exact solution is `exp(-π² t) sin(πx)`.
pub fn solve_heat<T: Float>(config: &HeatConfig) -> HeatResult<HeatSolution<T>> {
    let n = config.interior_points()?;
    let s_f64 = config.mesh_ratio();
    if s_f64 > 0.5 {
        log::warn!("mesh ratio s = {} exceeds 1/2, the explicit scheme is unstable", s_f64);
    }

    let s = T::from_f64(s_f64);
    let k = T::from_f64(config.k);
    let last = n + 1;
    let x: Vec<T> = (0..=last)
        .map(|i| T::from_usize(i) / T::from_usize(last))
        .collect();

    let mut w: Vec<T> = x.iter().map(|&xi| (T::PI * xi).sin()).collect();
    // Boundary values are zero; sin(π·1) is not exactly zero in floating point.
    w[0] = T::ZERO;
    w[last] = T::ZERO;

    let mut v = vec![T::ZERO; last + 1];
    let mut t = T::ZERO;
    for j in 1..=config.steps {
        t = T::from_usize(j) * k;
        v[0] = T::ZERO;
        v[last] = T::ZERO;
        for i in 1..=n {
            v[i] = s * w[i - 1] + (T::ONE - T::TWO * s) * w[i] + s * w[i + 1];
        }
        std::mem::swap(&mut w, &mut v);
    }

    let decay = (-(T::PI * T::PI) * t).exp();
    let u_exact: Vec<T> = x.iter().map(|&xi| decay * (T::PI * xi).sin()).collect();
    let error_inf = w
        .iter()
        .zip(&u_exact)
        .fold(T::ZERO, |acc, (&a, &b)| acc.max((a - b).abs()));
    log::info!(
        "heat equation: {} steps, t = {}, s = {}, max error = {:e}",
        config.steps,
        t,
        s,
        error_inf
    );

    Ok(HeatSolution {
        x,
        u_numeric: w,
        u_exact,
        t_final: t,
        s,
        error_inf,
    })
}
