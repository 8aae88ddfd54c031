use numlab_core::Float;

use crate::config::{Root, RootConfig};
use crate::error::{RootError, RootResult};

/// Secant method from the two starting points `x0`, `x1`.
pub fn secant<T, F>(f: F, x0: T, x1: T, config: &RootConfig) -> RootResult<Root<T>>
where
    T: Float,
    F: Fn(T) -> T,
{
    config.validate()?;

    let (mut a, mut b) = (x0, x1);
    let (mut fa, mut fb) = (f(a), f(b));
    for n in 0..config.max_iter {
        if fb - fa == T::ZERO {
            return Err(RootError::ZeroDenominator { iteration: n });
        }

        let next = b - fb * (b - a) / (fb - fa);
        let f_next = f(next);
        log::debug!("secant iteration {}: x = {}", n + 1, next);

        if config.converged(next - b, f_next) {
            return Ok(Root {
                x: next,
                iterations: n + 1,
            });
        }
        a = b;
        fa = fb;
        b = next;
        fb = f_next;
    }

    Err(RootError::NoConvergence {
        iterations: config.max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sqrt_two() {
        let root = secant(|x: f64| x * x - 2.0, 1.0, 2.0, &RootConfig::default()).unwrap();
        assert_abs_diff_eq!(root.x, 2.0f64.sqrt(), epsilon = 1e-9);
        assert!(root.iterations <= 8);
    }

    #[test]
    fn test_flat_function() {
        let err = secant(|_x: f64| 3.0, 0.0, 1.0, &RootConfig::default()).unwrap_err();
        assert_eq!(err, RootError::ZeroDenominator { iteration: 0 });
    }

    #[test]
    fn test_iteration_cap() {
        let config = RootConfig::new(0.0, 0.0, 3);
        let err = secant(|x: f64| x * x - 2.0, 1.0, 2.0, &config).unwrap_err();
        assert_eq!(err, RootError::NoConvergence { iterations: 3 });
    }
}
