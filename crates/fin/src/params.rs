use thermofin_core::{
    constraint::{Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive},
    units::{ReciprocalLength, per_meter},
};
use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

/// Fewest grid nodes that still leave one interior node.
pub const MIN_NODES: usize = 3;

/// Most grid nodes a single solve will allocate.
pub const MAX_NODES: usize = 10_000_000;

/// Boundary condition applied at the free end of the fin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TipCondition {
    /// No heat leaves through the tip: `dT/dx = 0` at `x = L`.
    Adiabatic,

    /// The tip face convects to the ambient with the same coefficient as the
    /// lateral surface: `-k dT/dx = h (T - T_inf)` at `x = L`.
    Convective,

    /// The tip is held at a prescribed temperature.
    FixedTemperature(ThermodynamicTemperature),
}

/// Raw, unvalidated fin inputs.
///
/// Validate with [`FinParameters::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinConfig {
    pub length: Length,
    pub perimeter: Length,
    pub area: Area,
    pub conductivity: ThermalConductivity,
    pub convection: HeatTransfer,
    pub base_temperature: ThermodynamicTemperature,
    pub ambient_temperature: ThermodynamicTemperature,
    pub nodes: usize,
    pub tip: TipCondition,
}

/// A rectangular fin cross-section of thickness `t` and width `b`.
///
/// Gives `A = t·b` and `P = 2(t + b)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularSection {
    pub thickness: Length,
    pub width: Length,
}

impl RectangularSection {
    /// Cross-sectional area `t·b`.
    #[must_use]
    pub fn area(&self) -> Area {
        self.thickness * self.width
    }

    /// Wetted perimeter `2(t + b)`.
    #[must_use]
    pub fn perimeter(&self) -> Length {
        (self.thickness + self.width) * 2.0
    }
}

/// Errors from validating a [`FinConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ParameterError {
    #[error("invalid {field}: {source}")]
    Constraint {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("at least 3 grid nodes are required, got {0}")]
    TooFewNodes(usize),

    #[error("at most {max} grid nodes are allowed, got {0}", max = MAX_NODES)]
    TooManyNodes(usize),

    #[error("grid spacing is not resolvable: dx = {0:e} m")]
    UnresolvableSpacing(f64),

    #[error("fin parameter m² is not finite")]
    NonFiniteFinParameter,
}

/// Validated, immutable fin parameters.
///
/// Geometry and conductivity are strictly positive, the convection
/// coefficient is non-negative, every temperature is finite, and the grid
/// has between [`MIN_NODES`] and [`MAX_NODES`] nodes with a resolvable
/// spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinParameters {
    length: Constrained<Length, StrictlyPositive>,
    perimeter: Constrained<Length, StrictlyPositive>,
    area: Constrained<Area, StrictlyPositive>,
    conductivity: Constrained<ThermalConductivity, StrictlyPositive>,
    convection: Constrained<HeatTransfer, NonNegative>,
    base_temperature: ThermodynamicTemperature,
    ambient_temperature: ThermodynamicTemperature,
    nodes: usize,
    tip: TipCondition,
}

impl FinParameters {
    /// Validates a [`FinConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first field that is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use thermofin_fin::{FinConfig, FinParameters, TipCondition};
    /// use uom::si::{
    ///     area::square_meter,
    ///     f64::{Area, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
    ///     heat_transfer::watt_per_square_meter_kelvin,
    ///     length::meter,
    ///     thermal_conductivity::watt_per_meter_kelvin,
    ///     thermodynamic_temperature::kelvin,
    /// };
    ///
    /// let config = FinConfig {
    ///     length: Length::new::<meter>(0.05),
    ///     perimeter: Length::new::<meter>(0.02),
    ///     area: Area::new::<square_meter>(1e-4),
    ///     conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
    ///     convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(20.0),
    ///     base_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
    ///     ambient_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
    ///     nodes: 50,
    ///     tip: TipCondition::Adiabatic,
    /// };
    ///
    /// assert!(FinParameters::new(config).is_ok());
    /// assert!(FinParameters::new(FinConfig { nodes: 2, ..config }).is_err());
    /// ```
    pub fn new(config: FinConfig) -> Result<Self, ParameterError> {
        let FinConfig {
            length,
            perimeter,
            area,
            conductivity,
            convection,
            base_temperature,
            ambient_temperature,
            nodes,
            tip,
        } = config;

        let params = Self {
            length: constrained("length", length, length.get::<meter>())?,
            perimeter: constrained("perimeter", perimeter, perimeter.get::<meter>())?,
            area: constrained("area", area, area.get::<square_meter>())?,
            conductivity: constrained(
                "conductivity",
                conductivity,
                conductivity.get::<watt_per_meter_kelvin>(),
            )?,
            convection: constrained(
                "convection coefficient",
                convection,
                convection.get::<watt_per_square_meter_kelvin>(),
            )?,
            base_temperature: finite("base temperature", base_temperature)?,
            ambient_temperature: finite("ambient temperature", ambient_temperature)?,
            nodes,
            tip: match tip {
                TipCondition::FixedTemperature(t) => {
                    TipCondition::FixedTemperature(finite("tip temperature", t)?)
                }
                other => other,
            },
        };

        params.validate()?;
        Ok(params)
    }

    /// Re-checks the invariants that depend on more than one field.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the node count, the grid spacing or
    /// `m²` is unusable.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.nodes < MIN_NODES {
            return Err(ParameterError::TooFewNodes(self.nodes));
        }
        if self.nodes > MAX_NODES {
            return Err(ParameterError::TooManyNodes(self.nodes));
        }

        let dx = self.spacing().get::<meter>();
        if !dx.is_finite() || dx <= 0.0 {
            return Err(ParameterError::UnresolvableSpacing(dx));
        }

        if !self.m_squared().is_finite() {
            return Err(ParameterError::NonFiniteFinParameter);
        }

        Ok(())
    }

    /// Returns the inputs these parameters were validated from.
    #[must_use]
    pub fn config(&self) -> FinConfig {
        FinConfig {
            length: self.length(),
            perimeter: self.perimeter(),
            area: self.area(),
            conductivity: self.conductivity(),
            convection: self.convection(),
            base_temperature: self.base_temperature,
            ambient_temperature: self.ambient_temperature,
            nodes: self.nodes,
            tip: self.tip,
        }
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length.into_inner()
    }

    #[must_use]
    pub fn perimeter(&self) -> Length {
        self.perimeter.into_inner()
    }

    #[must_use]
    pub fn area(&self) -> Area {
        self.area.into_inner()
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity.into_inner()
    }

    #[must_use]
    pub fn convection(&self) -> HeatTransfer {
        self.convection.into_inner()
    }

    #[must_use]
    pub fn base_temperature(&self) -> ThermodynamicTemperature {
        self.base_temperature
    }

    #[must_use]
    pub fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.ambient_temperature
    }

    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[must_use]
    pub fn tip(&self) -> TipCondition {
        self.tip
    }

    /// Uniform grid spacing `L / (N - 1)`.
    #[must_use]
    pub fn spacing(&self) -> Length {
        // Widening a node count to f64 is exact for any realistic grid.
        #[allow(clippy::cast_precision_loss)]
        let intervals = (self.nodes.saturating_sub(1)) as f64;
        self.length() / intervals
    }

    /// The fin parameter `m = sqrt(hP / kA)`.
    #[must_use]
    pub fn fin_parameter(&self) -> ReciprocalLength {
        per_meter(self.m_squared().sqrt())
    }

    /// `m² = hP / kA` in 1/m².
    pub(crate) fn m_squared(&self) -> f64 {
        self.h() * self.p() / (self.k() * self.a())
    }

    pub(crate) fn h(&self) -> f64 {
        self.convection().get::<watt_per_square_meter_kelvin>()
    }

    pub(crate) fn k(&self) -> f64 {
        self.conductivity().get::<watt_per_meter_kelvin>()
    }

    pub(crate) fn a(&self) -> f64 {
        self.area().get::<square_meter>()
    }

    pub(crate) fn p(&self) -> f64 {
        self.perimeter().get::<meter>()
    }

    pub(crate) fn l(&self) -> f64 {
        self.length().get::<meter>()
    }
}

fn constrained<T, C: Constraint<T>>(
    field: &'static str,
    quantity: T,
    raw: f64,
) -> Result<Constrained<T, C>, ParameterError> {
    if raw.is_infinite() {
        return Err(ParameterError::NonFinite { field });
    }
    Constrained::new(quantity).map_err(|source| ParameterError::Constraint { field, source })
}

fn finite(
    field: &'static str,
    temperature: ThermodynamicTemperature,
) -> Result<ThermodynamicTemperature, ParameterError> {
    if temperature.value.is_finite() {
        Ok(temperature)
    } else {
        Err(ParameterError::NonFinite { field })
    }
}
