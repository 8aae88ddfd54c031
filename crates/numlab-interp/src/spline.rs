use numlab_core::Float;

use crate::error::{SplineError, SplineResult};

/// Natural cubic spline through `(t_i, y_i)`.
///
/// The second derivatives `z_i` at the knots solve a symmetric tridiagonal
/// system with `z_0 = z_n = 0`; it is eliminated directly by its two-term
/// recurrence instead of a general dense solve.
#[derive(Debug, Clone)]
pub struct CubicSpline<T: Float> {
    t: Vec<T>,
    y: Vec<T>,
    h: Vec<T>,
    z: Vec<T>,
}

impl<T: Float> CubicSpline<T> {
    pub fn new(t: &[T], y: &[T]) -> SplineResult<Self> {
        if t.len() != y.len() {
            return Err(SplineError::LengthMismatch {
                knots: t.len(),
                values: y.len(),
            });
        }
        if t.len() < 3 {
            return Err(SplineError::TooFewKnots(t.len()));
        }
        if let Some(index) = t.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(SplineError::UnsortedKnots { index });
        }

        // n intervals, n + 1 knots
        let n = t.len() - 1;
        let six = T::from_f64(6.0);
        let h: Vec<T> = t.windows(2).map(|w| w[1] - w[0]).collect();
        let b: Vec<T> = (0..n).map(|i| six * (y[i + 1] - y[i]) / h[i]).collect();

        let mut u = vec![T::ZERO; n + 1];
        let mut v = vec![T::ZERO; n + 1];
        let mut z = vec![T::ZERO; n + 1];

        u[1] = T::TWO * (h[0] + h[1]);
        v[1] = b[1] - b[0];
        for i in 2..n {
            u[i] = T::TWO * (h[i - 1] + h[i]) - h[i - 1] * h[i - 1] / u[i - 1];
            v[i] = b[i] - b[i - 1] - h[i - 1] * v[i - 1] / u[i - 1];
        }
        for i in (1..n).rev() {
            z[i] = (v[i] - h[i] * z[i + 1]) / u[i];
        }
        log::debug!("cubic spline: {} intervals, z = {:?}", n, z);

        Ok(CubicSpline {
            t: t.to_vec(),
            y: y.to_vec(),
            h,
            z,
        })
    }

    /// Second derivatives at the knots (zero at both ends).
    pub fn second_derivatives(&self) -> &[T] {
        &self.z
    }

    pub fn knots(&self) -> &[T] {
        &self.t
    }

    /// Evaluate the spline at `x` within `[t_0, t_n]`.
    pub fn evaluate(&self, x: T) -> SplineResult<T> {
        let n = self.h.len();
        let (lo, hi) = (self.t[0], self.t[n]);
        if !(x >= lo && x <= hi) {
            return Err(SplineError::OutOfRange {
                x: x.to_f64(),
                lo: lo.to_f64(),
                hi: hi.to_f64(),
            });
        }

        // First interval with t[i] <= x <= t[i + 1]
        let i = self.t[1..].partition_point(|&knot| knot < x).min(n - 1);

        let six = T::from_f64(6.0);
        let (ti, ti1) = (self.t[i], self.t[i + 1]);
        let (zi, zi1) = (self.z[i], self.z[i + 1]);
        let hi = self.h[i];
        let right = ti1 - x;
        let left = x - ti;

        Ok((zi / six * right.powi(3) + zi1 / six * left.powi(3)) / hi
            + (self.y[i + 1] / hi - zi1 * hi / six) * left
            + (self.y[i] / hi - zi * hi / six) * right)
    }
}
