pub mod error;
pub mod heat;

pub use error::{HeatError, HeatResult};
pub use heat::{solve_heat, HeatConfig, HeatSolution, MAX_CELLS};
