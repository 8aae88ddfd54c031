pub mod error;
pub mod spline;

pub use error::{SplineError, SplineResult};
pub use spline::CubicSpline;
