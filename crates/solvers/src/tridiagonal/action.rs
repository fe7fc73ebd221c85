/// Control actions supported by the tridiagonal solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fail the solve at the current row as if its pivot had vanished.
    TreatAsSingular,
}
