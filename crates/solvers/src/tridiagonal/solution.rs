/// The result of a tridiagonal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution vector, one entry per row.
    pub x: Vec<f64>,

    /// Smallest pivot magnitude relative to its row scale.
    ///
    /// Values close to the configured tolerance indicate a poorly
    /// conditioned system.
    pub min_relative_pivot: f64,
}
