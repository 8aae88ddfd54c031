//! # NumLab
//!
//! Numerical methods in pure Rust.
//!
//! ## Modules
//!
//! - **core**: `Matrix` container, `Float` trait, solver errors, floating-point precision helpers
//! - **linalg**: Gaussian elimination: naive and scaled partial pivoting, `PA = LU`, batch solves
//! - **roots**: Newton, secant and bisection root finding
//! - **interp**: Natural cubic spline interpolation
//! - **pde**: Explicit finite-difference heat equation

/// Matrix container and shared types.
pub use numlab_core as core;

/// Linear system solvers.
pub use numlab_linalg as linalg;

/// Root finding.
pub use numlab_roots as roots;

/// Interpolation.
pub use numlab_interp as interp;

/// Partial differential equations.
pub use numlab_pde as pde;
