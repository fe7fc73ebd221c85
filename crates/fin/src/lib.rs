//! Steady-state temperature and performance of a one-dimensional cooling fin.
//!
//! A fin of constant cross-section conducts heat from a base at `T_b` along
//! its length while convecting to a surrounding fluid at `T_inf`. The excess
//! temperature `θ = T - T_inf` satisfies
//!
//! ```text
//! d²θ/dx² - m²θ = 0,    m² = hP / kA
//! ```
//!
//! # Workflow
//!
//! 1. Validate inputs: [`FinConfig`] → [`FinParameters::new`].
//! 2. Solve for the profile: [`solve`] or [`solve_with`].
//! 3. Derive metrics: [`analyze`].
//!
//! [`evaluate`] runs all three steps, and [`sweep_lengths`] repeats them over
//! a set of fin lengths in parallel. The [`analytical`] module holds the
//! closed-form solutions used for the adiabatic heat rate and for checking
//! the numerical profile.

pub mod analytical;
pub mod report;

mod analyze;
mod grid;
mod params;
mod profile;
mod solve;
mod sweep;

pub use analyze::{
    AnalyzeError, Degeneracy, EXCESS_TOLERANCE, Efficiency, HeatRateMethod, POSITION_TOLERANCE,
    PerformanceMetrics, ProfileMismatch, analyze, base_heat_flow,
};
pub use grid::Grid;
pub use params::{
    FinConfig, FinParameters, MAX_NODES, MIN_NODES, ParameterError, RectangularSection,
    TipCondition,
};
pub use profile::{ProfilePoint, TemperatureProfile};
pub use solve::{SolveError, solve, solve_with};
pub use sweep::{EvaluateError, Evaluation, evaluate, sweep_lengths};

pub use thermofin_solvers::tridiagonal::{Action, Config, Event};
