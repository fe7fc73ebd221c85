use thiserror::Error;

/// Configuration for the tridiagonal solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pivot_tolerance: f64,
}

/// Errors that can occur when validating a tridiagonal solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pivot_tolerance must be finite and non-negative")]
    PivotTolerance,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-12).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated relative pivot tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn new(pivot_tolerance: f64) -> Result<Self, ConfigError> {
        if !pivot_tolerance.is_finite() || pivot_tolerance < 0.0 {
            return Err(ConfigError::PivotTolerance);
        }

        Ok(Self { pivot_tolerance })
    }

    /// Returns the relative pivot tolerance.
    #[must_use]
    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }
}
