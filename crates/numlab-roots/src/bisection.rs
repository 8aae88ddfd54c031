use numlab_core::Float;

use crate::config::{Root, RootConfig};
use crate::error::{RootError, RootResult};

/// Sign as -1, 0 or 1; unlike `signum`, zero maps to zero.
fn sign<T: Float>(v: T) -> i8 {
    if v > T::ZERO {
        1
    } else if v < T::ZERO {
        -1
    } else {
        0
    }
}

/// Bisection on `[a, b]`; `f(a)` and `f(b)` must differ in sign.
pub fn bisection<T, F>(f: F, a: T, b: T, config: &RootConfig) -> RootResult<Root<T>>
where
    T: Float,
    F: Fn(T) -> T,
{
    config.validate()?;

    let mut a = a;
    let mut u = f(a);
    let v = f(b);
    if sign(u) == sign(v) {
        return Err(RootError::NoSignChange {
            fa: u.to_f64(),
            fb: v.to_f64(),
        });
    }

    let mut e = b - a;
    for k in 1..=config.max_iter {
        e = e / T::TWO;
        let c = a + e;
        let w = f(c);
        log::debug!("bisection iteration {}: x = {}", k, c);

        if config.converged(e, w) {
            return Ok(Root { x: c, iterations: k });
        }

        // Keep the half that still brackets the sign change
        if sign(u) == sign(w) {
            a = c;
            u = w;
        }
    }

    Err(RootError::NoConvergence {
        iterations: config.max_iter,
    })
}
