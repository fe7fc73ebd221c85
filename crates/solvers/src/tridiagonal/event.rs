/// Event emitted by the tridiagonal solver for each eliminated row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Index of the row being eliminated.
    pub row: usize,

    /// Pivot of the row after eliminating its sub-diagonal entry.
    pub pivot: f64,

    /// Largest coefficient magnitude of the original row.
    pub scale: f64,
}

impl Event {
    /// Returns the pivot magnitude relative to the row scale.
    ///
    /// Returns `f64::NAN` for an all-zero row.
    #[must_use]
    pub fn relative_pivot(&self) -> f64 {
        self.pivot.abs() / self.scale
    }
}
