//! Floating-point precision helpers: machine epsilon discovery and
//! cancellation-free rewrites of two classic expressions.

use crate::dtype::Float;

/// Below this magnitude `x - sin(x)` loses most of its significant digits.
const SERIES_THRESHOLD: f64 = 1e-3;

/// Find machine epsilon by halving until `1 + eps/2` rounds to `1`.
///
/// Returns the epsilon and the number of halvings performed.
pub fn machine_epsilon<T: Float>() -> (T, u32) {
    let mut eps = T::ONE;
    let mut k = 0;
    while T::ONE + eps / T::TWO > T::ONE {
        eps = eps / T::TWO;
        k += 1;
    }
    (eps, k)
}

/// `sqrt(x² + 1) - 1` evaluated directly. Cancels badly for small `x`.
pub fn sqrt1p_minus_one_naive<T: Float>(x: T) -> T {
    (x * x + T::ONE).sqrt() - T::ONE
}

/// `sqrt(x² + 1) - 1` rewritten as `x² / (sqrt(x² + 1) + 1)`.
pub fn sqrt1p_minus_one<T: Float>(x: T) -> T {
    let x2 = x * x;
    x2 / ((x2 + T::ONE).sqrt() + T::ONE)
}

/// `x - sin(x)`, switching to its Taylor series near zero.
pub fn x_minus_sin<T: Float>(x: T) -> T {
    if x.abs() < T::from_f64(SERIES_THRESHOLD) {
        x.powi(3) / T::from_f64(6.0) - x.powi(5) / T::from_f64(120.0)
            + x.powi(7) / T::from_f64(5040.0)
    } else {
        x - x.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_machine_epsilon_matches_std() {
        let (eps64, k64) = machine_epsilon::<f64>();
        assert_eq!(eps64, f64::EPSILON);
        assert_eq!(k64, 52);

        let (eps32, k32) = machine_epsilon::<f32>();
        assert_eq!(eps32, f32::EPSILON);
        assert_eq!(k32, 23);
    }

    #[test]
    fn test_sqrt1p_minus_one_small_x() {
        // 8^-10: the naive form collapses to zero, the rewrite keeps x²/2.
        let x = 8.0f64.powi(-10);
        assert_eq!(sqrt1p_minus_one_naive(x), 0.0);
        assert_relative_eq!(sqrt1p_minus_one(x), x * x / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_sqrt1p_minus_one_agrees_for_large_x() {
        let x = 3.0f64;
        assert_relative_eq!(sqrt1p_minus_one(x), sqrt1p_minus_one_naive(x), max_relative = 1e-14);
    }

    #[test]
    fn test_x_minus_sin() {
        let x = 1e-5f64;
        assert_relative_eq!(x_minus_sin(x), x.powi(3) / 6.0, max_relative = 1e-9);

        let x = 1.0f64;
        assert_relative_eq!(x_minus_sin(x), 1.0 - 1.0f64.sin(), max_relative = 1e-15);
    }
}
