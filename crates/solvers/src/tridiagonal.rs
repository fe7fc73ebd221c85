//! Thomas algorithm for tridiagonal linear systems.
//!
//! # Algorithm
//!
//! A tridiagonal system has non-zero coefficients only on the main diagonal
//! and its two neighbors. The Thomas algorithm solves it directly in two
//! sweeps:
//!
//! 1. Forward elimination removes the sub-diagonal row by row, producing a
//!    pivot per row and modified super-diagonal and right-hand side entries.
//! 2. Back-substitution recovers the unknowns from the last row upward.
//!
//! Both sweeps are O(n) in time and the solver keeps O(n) auxiliary storage.
//!
//! # Pivot Policy
//!
//! The algorithm does not pivot, so a vanishing pivot means the system is
//! singular or too ill-conditioned to trust. Each pivot is compared against
//! the largest coefficient magnitude of its original row:
//!
//! ```text
//! |pivot| <= pivot_tolerance * max(|sub|, |diag|, |sup|)  =>  Error::Singular
//! ```
//!
//! The test is relative, so uniformly scaling a row does not change the
//! outcome.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per eliminated row, before the pivot test.
//! Observers can return [`Action::TreatAsSingular`] to fail the solve at that
//! row, which is how callers impose a stricter conditioning policy than the
//! configured tolerance.

mod action;
mod config;
mod error;
mod event;
mod solution;
mod system;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::Solution;
pub use system::System;

use thermofin_core::Observer;

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// The observer receives an [`Event`] for each row during forward
/// elimination. See the [module docs](self) for the pivot policy.
///
/// # Errors
///
/// - [`Error::Empty`] if the system has no rows.
/// - [`Error::Singular`] if a pivot is not finite or falls below the
///   configured relative tolerance.
/// - [`Error::Rejected`] if the observer returns [`Action::TreatAsSingular`].
/// - [`Error::NonFinite`] if back-substitution produces a non-finite value.
pub fn solve<Obs>(system: &System, config: &Config, mut observer: Obs) -> Result<Solution, Error>
where
    Obs: Observer<Event, Action>,
{
    let n = system.len();
    if n == 0 {
        return Err(Error::Empty);
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    let mut min_relative_pivot = f64::INFINITY;

    for row in 0..n {
        let [sub, diag, sup] = system.coefficients(row);
        let rhs = system.rhs(row);

        let (pivot, carried) = if row == 0 {
            (diag, rhs)
        } else {
            (
                diag - sub * c_prime[row - 1],
                rhs - sub * d_prime[row - 1],
            )
        };
        let scale = sub.abs().max(diag.abs()).max(sup.abs());

        let event = Event { row, pivot, scale };
        if let Some(Action::TreatAsSingular) = observer.observe(&event) {
            return Err(Error::Rejected { row, pivot });
        }

        if !pivot.is_finite() || pivot.abs() <= config.pivot_tolerance() * scale {
            return Err(Error::Singular { row, pivot });
        }
        min_relative_pivot = min_relative_pivot.min(event.relative_pivot());

        c_prime[row] = sup / pivot;
        d_prime[row] = carried / pivot;
    }

    let mut x = d_prime;
    for row in (0..n - 1).rev() {
        x[row] -= c_prime[row] * x[row + 1];
    }

    if let Some(row) = x.iter().position(|value| !value.is_finite()) {
        return Err(Error::NonFinite { row });
    }

    Ok(Solution {
        x,
        min_relative_pivot,
    })
}

/// Solves a tridiagonal system with a no-op observer.
#[cfg(test)]
pub(crate) fn solve_unobserved(system: &System, config: &Config) -> Result<Solution, Error> {
    solve(system, config, ())
}
