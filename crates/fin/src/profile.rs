use thermofin_core::units::TemperatureUnit;
use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::meter,
};

/// A temperature at one grid node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub position: Length,
    pub temperature: ThermodynamicTemperature,
}

/// Steady-state temperatures along the fin, ordered from base to tip.
///
/// Produced by [`crate::solve`] or [`crate::analytical::profile`] and
/// consumed by [`crate::analyze`] and by presentation code.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureProfile {
    points: Vec<ProfilePoint>,
}

impl TemperatureProfile {
    /// Wraps points already in grid order.
    #[must_use]
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at `x = 0`.
    #[must_use]
    pub fn base(&self) -> Option<&ProfilePoint> {
        self.points.first()
    }

    /// The point at `x = L`.
    #[must_use]
    pub fn tip(&self) -> Option<&ProfilePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfilePoint> {
        self.points.iter()
    }

    /// Yields `(x, T)` as plain numbers, `x` in meters and `T` on `unit`.
    ///
    /// # Example
    ///
    /// ```
    /// use thermofin_core::units::TemperatureUnit;
    /// use thermofin_fin::{ProfilePoint, TemperatureProfile};
    /// use uom::si::{f64::{Length, ThermodynamicTemperature}, length::meter, thermodynamic_temperature::kelvin};
    ///
    /// let profile = TemperatureProfile::new(vec![ProfilePoint {
    ///     position: Length::new::<meter>(0.0),
    ///     temperature: ThermodynamicTemperature::new::<kelvin>(373.15),
    /// }]);
    ///
    /// let rows: Vec<_> = profile.rows(TemperatureUnit::Celsius).collect();
    /// assert_eq!(rows.len(), 1);
    /// assert!((rows[0].1 - 100.0).abs() < 1e-9);
    /// ```
    pub fn rows(&self, unit: TemperatureUnit) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .map(move |point| (point.position.get::<meter>(), unit.value(point.temperature)))
    }
}

impl<'a> IntoIterator for &'a TemperatureProfile {
    type Item = &'a ProfilePoint;
    type IntoIter = std::slice::Iter<'a, ProfilePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
