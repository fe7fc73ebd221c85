//! Unit helpers missing from `uom`'s predefined quantities.

use std::marker::PhantomData;

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin as abs_kelvin},
    },
    typenum::{N1, Z0},
};

/// Reciprocal length, 1/m in SI.
///
/// The fin parameter `m = sqrt(hP/kA)` has this dimension: it is the inverse
/// of the characteristic decay length of the excess temperature.
pub type ReciprocalLength = Quantity<ISQ<N1, Z0, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`ReciprocalLength`] from a value in 1/m.
#[must_use]
pub fn per_meter(value: f64) -> ReciprocalLength {
    ReciprocalLength {
        dimension: PhantomData,
        units: PhantomData,
        value,
    }
}

/// Extension method for `ThermodynamicTemperature` to compute a temperature difference.
pub trait TemperatureOps {
    /// Computes the signed difference `self - other`.
    ///
    /// A `TemperatureInterval` (a temperature change) is distinct from a
    /// `ThermodynamicTemperature` (a specific temperature value), so the
    /// subtraction goes through kelvin explicitly.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureOps for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

/// A temperature scale chosen by the caller for plain-number input and output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Builds a temperature from a plain number on this scale.
    #[must_use]
    pub fn temperature(self, value: f64) -> ThermodynamicTemperature {
        match self {
            Self::Kelvin => ThermodynamicTemperature::new::<abs_kelvin>(value),
            Self::Celsius => ThermodynamicTemperature::new::<degree_celsius>(value),
            Self::Fahrenheit => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
        }
    }

    /// Reads a temperature as a plain number on this scale.
    #[must_use]
    pub fn value(self, temperature: ThermodynamicTemperature) -> f64 {
        match self {
            Self::Kelvin => temperature.get::<abs_kelvin>(),
            Self::Celsius => temperature.get::<degree_celsius>(),
            Self::Fahrenheit => temperature.get::<degree_fahrenheit>(),
        }
    }

    /// Returns the unit symbol used in table headers.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::meter, temperature_interval::degree_celsius as delta_celsius};

    #[test]
    fn subtract_temperatures() {
        let t_base = ThermodynamicTemperature::new::<abs_kelvin>(373.0);
        let t_inf = ThermodynamicTemperature::new::<abs_kelvin>(298.0);

        assert_relative_eq!(t_base.minus(t_inf).get::<delta_kelvin>(), 75.0);
        assert_relative_eq!(t_inf.minus(t_base).get::<delta_celsius>(), -75.0);
    }

    #[test]
    fn reciprocal_length_times_length_is_dimensionless() {
        let m = per_meter(4.0);
        let length = Length::new::<meter>(0.25);
        let ml = m * length;
        assert_relative_eq!(ml.value, 1.0);
    }

    #[test]
    fn temperature_units_roundtrip() {
        let t = TemperatureUnit::Celsius.temperature(100.0);
        assert_relative_eq!(TemperatureUnit::Kelvin.value(t), 373.15, epsilon = 1e-12);
        assert_relative_eq!(TemperatureUnit::Fahrenheit.value(t), 212.0, epsilon = 1e-9);
        assert_relative_eq!(TemperatureUnit::Celsius.value(t), 100.0, epsilon = 1e-12);
        assert_eq!(TemperatureUnit::Celsius.symbol(), "°C");
    }
}
