//! Linear solvers for the thermofin crates.
//!
//! # Solvers
//!
//! - [`tridiagonal`]: Thomas algorithm for banded systems produced by 1D
//!   finite-difference discretizations

pub mod tridiagonal;
