//! Scalar root finding: Newton, secant and bisection.
//!
//! Every method is a bounded loop capped by [`RootConfig::max_iter`].

pub mod bisection;
pub mod config;
pub mod error;
pub mod newton;
pub mod secant;

pub use bisection::bisection;
pub use config::{Root, RootConfig};
pub use error::{RootError, RootResult};
pub use newton::newton;
pub use secant::secant;
