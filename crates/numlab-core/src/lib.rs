pub mod dtype;
pub mod error;
pub mod matrix;
pub mod precision;

pub use dtype::Float;
pub use error::{Phase, SolverError, SolverResult};
pub use matrix::Matrix;
