//! Core traits and types shared across the thermofin crates.
//!
//! - [`constraint`]: numeric invariants (non-negative, strictly positive,
//!   unit interval) enforced once at construction
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`units`]: quantities and temperature helpers missing from `uom`

mod observer;

pub mod constraint;
pub mod units;

pub use observer::Observer;
