/// A square tridiagonal linear system `A x = d`.
///
/// Row `i` stores its sub-diagonal coefficient (the multiplier of
/// `x[i - 1]`), its diagonal coefficient, its super-diagonal coefficient (the
/// multiplier of `x[i + 1]`) and its right-hand side.
/// The sub-diagonal entry of the first row and the super-diagonal entry of the
/// last row fall outside the matrix and are always stored as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    rhs: Vec<f64>,
}

impl System {
    /// Creates a system of `n` rows with all coefficients set to zero.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    /// Returns the number of rows (and unknowns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Returns `true` if the system has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Sets the coefficients `[sub, diag, sup]` and right-hand side of a row.
    ///
    /// Coefficients that fall outside the matrix (`sub` on the first row,
    /// `sup` on the last row) are discarded.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn set_row(&mut self, row: usize, [sub, diag, sup]: [f64; 3], rhs: f64) {
        let last = self.len() - 1;
        self.sub[row] = if row == 0 { 0.0 } else { sub };
        self.diag[row] = diag;
        self.sup[row] = if row == last { 0.0 } else { sup };
        self.rhs[row] = rhs;
    }

    /// Returns the coefficients `[sub, diag, sup]` of a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn coefficients(&self, row: usize) -> [f64; 3] {
        [self.sub[row], self.diag[row], self.sup[row]]
    }

    /// Returns the right-hand side of a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn rhs(&self, row: usize) -> f64 {
        self.rhs[row]
    }

    /// Computes the residual `A x - d` for a candidate solution.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not have one entry per row.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn residual(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.len(), "solution length must match system size");

        (0..self.len())
            .map(|row| {
                let below = if row == 0 { 0.0 } else { self.sub[row] * x[row - 1] };
                let above = if row + 1 == self.len() {
                    0.0
                } else {
                    self.sup[row] * x[row + 1]
                };
                below + self.diag[row] * x[row] + above - self.rhs[row]
            })
            .collect()
    }
}
