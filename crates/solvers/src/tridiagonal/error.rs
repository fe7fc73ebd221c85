use thiserror::Error;

/// Errors that can occur during a tridiagonal solve.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("system has no rows")]
    Empty,

    #[error("singular system: pivot {pivot:e} at row {row}")]
    Singular { row: usize, pivot: f64 },

    #[error("observer rejected pivot {pivot:e} at row {row}")]
    Rejected { row: usize, pivot: f64 },

    #[error("non-finite solution value at row {row}")]
    NonFinite { row: usize },
}
