use numlab_core::Float;

use crate::config::{Root, RootConfig};
use crate::error::{RootError, RootResult};

/// Newton's method: `x ← x - f(x) / f'(x)` starting from `x0`.
pub fn newton<T, F, D>(f: F, df: D, x0: T, config: &RootConfig) -> RootResult<Root<T>>
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    config.validate()?;

    let mut x = x0;
    for n in 0..config.max_iter {
        let dfx = df(x);
        if dfx == T::ZERO {
            return Err(RootError::ZeroDerivative { x: x.to_f64() });
        }

        let next = x - f(x) / dfx;
        log::debug!("newton iteration {}: x = {}", n + 1, next);

        if config.converged(next - x, f(next)) {
            return Ok(Root {
                x: next,
                iterations: n + 1,
            });
        }
        x = next;
    }

    Err(RootError::NoConvergence {
        iterations: config.max_iter,
    })
}
