//! Performance metrics derived from a solved temperature profile.
//!
//! | metric | definition |
//! |---|---|
//! | heat transfer rate `Q` | heat leaving the base into the fin |
//! | efficiency `η` | `Q / (h·P·L·θ_b)`, actual over an isothermal fin at `T_b` |
//! | effectiveness `ε` | `Q / (h·A·θ_b)`, actual over the bare base area |
//! | fin parameter `m` | `sqrt(hP / kA)` |
//!
//! Here `θ_b = T_b - T_inf` is the base excess temperature.
//!
//! `Q` comes from the closed form for an adiabatic tip and from the
//! second-order base flux of the profile otherwise. The method used is
//! recorded on the result as a [`HeatRateMethod`].

use std::ops::Deref;

use thermofin_core::{
    constraint::{Constrained, ConstraintResult, UnitInterval},
    units::{ReciprocalLength, TemperatureOps},
};
use thiserror::Error;
use uom::si::{
    f64::{Power, Ratio},
    length::meter,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{FinParameters, Grid, TemperatureProfile, TipCondition, analytical};

/// Relative tolerance for matching profile positions against the grid, in
/// units of the fin length.
pub const POSITION_TOLERANCE: f64 = 1e-9;

/// Base excess temperatures at or below this fraction of the absolute
/// temperature scale are treated as zero.
pub const EXCESS_TOLERANCE: f64 = 1e-12;

/// How the total heat transfer rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatRateMethod {
    /// Closed-form solution for the tip condition.
    ClosedForm,

    /// Fourier's law at the base, `-k·A·dT/dx` from a second-order
    /// one-sided difference on the profile.
    BaseFlux,
}

/// Fin efficiency, `Q / (h·P·L·θ_b)`.
///
/// Not clamped. A value outside `[0, 1]` points at an unresolved grid or an
/// unusual tip condition and is reported as computed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Efficiency(Ratio);

impl Efficiency {
    #[must_use]
    pub fn new(value: Ratio) -> Self {
        Self(value)
    }

    /// Returns `true` if the efficiency lies in `[0, 1]`.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.checked().is_ok()
    }

    /// Returns the efficiency constrained to the unit interval.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`](thermofin_core::constraint::ConstraintError)
    /// if the value is negative, above one, or NaN.
    pub fn checked(&self) -> ConstraintResult<Constrained<Ratio, UnitInterval>> {
        UnitInterval::new(self.0)
    }
}

impl Deref for Efficiency {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Aggregate thermal performance of a fin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    pub heat_transfer_rate: Power,
    pub efficiency: Efficiency,
    pub effectiveness: Ratio,
    pub fin_parameter: ReciprocalLength,
    pub method: HeatRateMethod,
}

impl PerformanceMetrics {
    /// Returns `true` if the fin dissipates more than the bare base would.
    #[must_use]
    pub fn is_beneficial(&self) -> bool {
        self.effectiveness.get::<ratio>() > 1.0
    }
}

/// Errors from analyzing a fin profile.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalyzeError {
    #[error("profile does not match the fin grid: {0}")]
    ProfileMismatch(#[from] ProfileMismatch),

    #[error("metrics are undefined: {0}")]
    DegenerateGeometry(#[from] Degeneracy),
}

/// Ways a profile can disagree with the parameters it is analyzed against.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProfileMismatch {
    #[error("expected {expected} points, found {found}")]
    Length { expected: usize, found: usize },

    #[error("node {node} is at {found} m, expected {expected} m")]
    Position {
        node: usize,
        expected: f64,
        found: f64,
    },

    #[error("node {node} has a non-finite temperature")]
    NonFiniteTemperature { node: usize },
}

/// Conditions under which a metric has a zero or undefined denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    #[error("base and ambient temperatures coincide")]
    NoBaseExcess,

    #[error("convection coefficient is zero")]
    NoConvection,

    #[error("conduction cross-section k·A is not positive")]
    NoConduction,

    #[error("a metric overflowed or lost its denominator")]
    NonFiniteMetric,
}

/// Derives performance metrics from a solved profile.
///
/// # Errors
///
/// - [`AnalyzeError::ProfileMismatch`] if the profile does not sit on the
///   grid described by `params` or holds a non-finite temperature.
/// - [`AnalyzeError::DegenerateGeometry`] if `T_b = T_inf`, `h = 0`, `k·A`
///   is not positive, or a metric is not finite.
pub fn analyze(
    params: &FinParameters,
    profile: &TemperatureProfile,
) -> Result<PerformanceMetrics, AnalyzeError> {
    check_profile(params, profile)?;

    let theta_b = base_excess(params)?;
    let fin_parameter = analytical::fin_parameter(params)?;
    if params.h() <= 0.0 {
        return Err(Degeneracy::NoConvection.into());
    }

    let (heat_transfer_rate, method) = match params.tip() {
        TipCondition::Adiabatic => (
            analytical::heat_transfer_rate(params)?,
            HeatRateMethod::ClosedForm,
        ),
        TipCondition::Convective | TipCondition::FixedTemperature(_) => {
            (base_heat_flow(params, profile)?, HeatRateMethod::BaseFlux)
        }
    };

    let q = heat_transfer_rate.get::<watt>();
    let efficiency = q / (params.h() * params.p() * params.l() * theta_b);
    let effectiveness = q / (params.h() * params.a() * theta_b);
    if !(efficiency.is_finite() && effectiveness.is_finite()) {
        return Err(Degeneracy::NonFiniteMetric.into());
    }

    Ok(PerformanceMetrics {
        heat_transfer_rate,
        efficiency: Efficiency::new(Ratio::new::<ratio>(efficiency)),
        effectiveness: Ratio::new::<ratio>(effectiveness),
        fin_parameter,
        method,
    })
}

/// Heat entering the fin at its base, `-k·A·dT/dx` at `x = 0`.
///
/// The gradient uses the second-order one-sided difference
/// `(-3T_0 + 4T_1 - T_2) / (2Δx)`.
///
/// # Errors
///
/// Returns [`AnalyzeError::ProfileMismatch`] if the profile does not match
/// the grid described by `params`.
pub fn base_heat_flow(
    params: &FinParameters,
    profile: &TemperatureProfile,
) -> Result<Power, AnalyzeError> {
    check_profile(params, profile)?;

    let t = |i: usize| profile.points()[i].temperature.get::<kelvin>();
    let dx = params.spacing().get::<meter>();
    let gradient = (-3.0 * t(0) + 4.0 * t(1) - t(2)) / (2.0 * dx);

    Ok(Power::new::<watt>(-params.k() * params.a() * gradient))
}

/// Returns the base excess temperature in kelvin, or an error if it is
/// indistinguishable from zero.
fn base_excess(params: &FinParameters) -> Result<f64, Degeneracy> {
    let t_base = params.base_temperature();
    let t_inf = params.ambient_temperature();

    let theta_b = t_base.minus(t_inf).get::<delta_kelvin>();
    let scale = t_base.get::<kelvin>().abs().max(t_inf.get::<kelvin>().abs());

    if theta_b.abs() <= EXCESS_TOLERANCE * scale {
        Err(Degeneracy::NoBaseExcess)
    } else {
        Ok(theta_b)
    }
}

fn check_profile(
    params: &FinParameters,
    profile: &TemperatureProfile,
) -> Result<(), ProfileMismatch> {
    let grid = Grid::for_fin(params);
    if profile.len() != grid.len() {
        return Err(ProfileMismatch::Length {
            expected: grid.len(),
            found: profile.len(),
        });
    }

    let tolerance = POSITION_TOLERANCE * params.l();
    for (node, (point, expected)) in profile.iter().zip(grid.positions()).enumerate() {
        let found = point.position;
        if (found - *expected).get::<meter>().abs() > tolerance
            || !found.get::<meter>().is_finite()
        {
            return Err(ProfileMismatch::Position {
                node,
                expected: expected.get::<meter>(),
                found: found.get::<meter>(),
            });
        }
        if !point.temperature.get::<kelvin>().is_finite() {
            return Err(ProfileMismatch::NonFiniteTemperature { node });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
        heat_transfer::watt_per_square_meter_kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
    };

    use crate::{FinConfig, ProfilePoint, solve};

    fn config() -> FinConfig {
        FinConfig {
            length: Length::new::<meter>(0.05),
            perimeter: Length::new::<meter>(0.02),
            area: Area::new::<square_meter>(1e-4),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
            convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(20.0),
            base_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
            nodes: 50,
            tip: TipCondition::Adiabatic,
        }
    }

    #[test]
    fn adiabatic_uses_closed_form() {
        let params = FinParameters::new(config()).unwrap();
        let profile = solve(&params).unwrap();

        let metrics = analyze(&params, &profile).unwrap();

        let m = 20.0_f64.sqrt();
        let q = (20.0 * 0.02 * 200.0 * 1e-4_f64).sqrt() * 75.0 * (m * 0.05).tanh();
        assert_eq!(metrics.method, HeatRateMethod::ClosedForm);
        assert_relative_eq!(metrics.heat_transfer_rate.get::<watt>(), q, max_relative = 1e-12);
        assert_relative_eq!(metrics.fin_parameter.value, m, max_relative = 1e-12);
        assert_relative_eq!(
            metrics.efficiency.get::<ratio>(),
            (m * 0.05).tanh() / (m * 0.05),
            max_relative = 1e-12
        );
        assert!(metrics.efficiency.is_physical());
        assert!(metrics.is_beneficial());
    }

    #[test]
    fn convective_uses_base_flux() {
        let params = FinParameters::new(FinConfig {
            tip: TipCondition::Convective,
            ..config()
        })
        .unwrap();
        let profile = solve(&params).unwrap();

        let metrics = analyze(&params, &profile).unwrap();

        assert_eq!(metrics.method, HeatRateMethod::BaseFlux);
        assert_eq!(
            metrics.heat_transfer_rate,
            base_heat_flow(&params, &profile).unwrap()
        );
    }

    #[test]
    fn unphysical_efficiency_is_reported_not_clamped() {
        let efficiency = Efficiency::new(Ratio::new::<ratio>(1.02));
        assert!(!efficiency.is_physical());
        assert!(efficiency.checked().is_err());
        assert_relative_eq!(efficiency.get::<ratio>(), 1.02);
    }

    #[test]
    fn short_convective_fin_exceeds_unit_efficiency() {
        // The tip face A outweighs the lateral area PL, so η ≈ (PL + A)/PL = 6.
        let params = FinParameters::new(FinConfig {
            length: Length::new::<meter>(0.001),
            tip: TipCondition::Convective,
            ..config()
        })
        .unwrap();
        let profile = solve(&params).unwrap();

        let metrics = analyze(&params, &profile).unwrap();

        assert_relative_eq!(metrics.efficiency.get::<ratio>(), 6.0, max_relative = 1e-3);
        assert!(!metrics.efficiency.is_physical());
        assert!(metrics.efficiency.checked().is_err());
        assert!(metrics.is_beneficial());
    }

    #[test]
    fn equal_temperatures_are_degenerate() {
        let params = FinParameters::new(FinConfig {
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
            ..config()
        })
        .unwrap();
        let profile = solve(&params).unwrap();

        assert_eq!(
            analyze(&params, &profile),
            Err(AnalyzeError::DegenerateGeometry(Degeneracy::NoBaseExcess))
        );
    }

    #[test]
    fn zero_convection_is_degenerate() {
        let params = FinParameters::new(FinConfig {
            convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(0.0),
            tip: TipCondition::Convective,
            ..config()
        })
        .unwrap();
        let profile = solve(&params).unwrap();

        assert_eq!(
            analyze(&params, &profile),
            Err(AnalyzeError::DegenerateGeometry(Degeneracy::NoConvection))
        );
    }

    #[test]
    fn mismatched_profiles() {
        let params = FinParameters::new(config()).unwrap();
        let coarse = FinParameters::new(FinConfig {
            nodes: 20,
            ..config()
        })
        .unwrap();
        let profile = solve(&coarse).unwrap();

        assert_eq!(
            analyze(&params, &profile),
            Err(AnalyzeError::ProfileMismatch(ProfileMismatch::Length {
                expected: 50,
                found: 20,
            }))
        );

        let longer = FinParameters::new(FinConfig {
            length: Length::new::<meter>(0.06),
            ..config()
        })
        .unwrap();
        let profile = solve(&longer).unwrap();
        assert!(matches!(
            analyze(&params, &profile),
            Err(AnalyzeError::ProfileMismatch(ProfileMismatch::Position { node: 1, .. }))
        ));
    }

    #[test]
    fn non_finite_profile_is_rejected() {
        let params = FinParameters::new(FinConfig {
            nodes: 3,
            ..config()
        })
        .unwrap();
        let points = Grid::for_fin(&params)
            .positions()
            .iter()
            .map(|&position| ProfilePoint {
                position,
                temperature: ThermodynamicTemperature::new::<kelvin>(f64::NAN),
            })
            .collect();

        assert_eq!(
            base_heat_flow(&params, &TemperatureProfile::new(points)),
            Err(AnalyzeError::ProfileMismatch(
                ProfileMismatch::NonFiniteTemperature { node: 0 }
            ))
        );
    }
}
