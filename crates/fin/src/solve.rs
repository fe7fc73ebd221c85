use thermofin_core::Observer;
use thermofin_solvers::tridiagonal::{self, Action, Config, Event, System};
use thiserror::Error;
use uom::si::{f64::ThermodynamicTemperature, length::meter, thermodynamic_temperature::kelvin};

use crate::{FinParameters, Grid, ParameterError, ProfilePoint, TemperatureProfile, TipCondition};

/// Errors from solving for a fin temperature profile.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("fin system is singular or ill-conditioned")]
    SingularSystem(#[source] tridiagonal::Error),
}

/// Solves for the steady-state temperature profile of a fin.
///
/// Uses the default elimination [`Config`] and no observer.
///
/// # Errors
///
/// See [`solve_with`].
///
/// # Example
///
/// ```
/// use thermofin_fin::{FinConfig, FinParameters, TipCondition, solve};
/// use uom::si::{
///     area::square_meter,
///     f64::{Area, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
///     heat_transfer::watt_per_square_meter_kelvin,
///     length::meter,
///     thermal_conductivity::watt_per_meter_kelvin,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let params = FinParameters::new(FinConfig {
///     length: Length::new::<meter>(0.05),
///     perimeter: Length::new::<meter>(0.02),
///     area: Area::new::<square_meter>(1e-4),
///     conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
///     convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(20.0),
///     base_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
///     ambient_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
///     nodes: 50,
///     tip: TipCondition::Adiabatic,
/// })
/// .unwrap();
///
/// let profile = solve(&params).unwrap();
/// assert_eq!(profile.len(), 50);
/// ```
pub fn solve(params: &FinParameters) -> Result<TemperatureProfile, SolveError> {
    solve_with(params, &Config::default(), ())
}

/// Solves for the fin temperature profile with an explicit elimination
/// config and an observer.
///
/// The governing balance `d²T/dx² - m²(T - T_inf) = 0` is discretized with
/// second-order central differences on the uniform grid. The base node is
/// held at `T_b` and the last row encodes the tip condition, with adiabatic
/// and convective tips folded in through a mirrored ghost node.
///
/// The observer sees one [`Event`] per eliminated row and may return
/// [`Action::TreatAsSingular`] to stop the solve.
///
/// # Errors
///
/// - [`SolveError::InvalidParameter`] if the grid spacing or `m²` is unusable.
/// - [`SolveError::SingularSystem`] if elimination meets a vanishing pivot, the
///   observer rejects a row, or the solution is not finite.
pub fn solve_with<Obs>(
    params: &FinParameters,
    config: &Config,
    observer: Obs,
) -> Result<TemperatureProfile, SolveError>
where
    Obs: Observer<Event, Action>,
{
    params.validate()?;

    let system = assemble(params);
    let solution =
        tridiagonal::solve(&system, config, observer).map_err(SolveError::SingularSystem)?;

    let grid = Grid::for_fin(params);
    let points = grid
        .positions()
        .iter()
        .zip(solution.x)
        .map(|(&position, t)| ProfilePoint {
            position,
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
        })
        .collect();

    Ok(TemperatureProfile::new(points))
}

/// Assembles the finite-difference system in kelvin.
fn assemble(params: &FinParameters) -> System {
    let n = params.nodes();
    let dx = params.spacing().get::<meter>();
    let m2 = params.m_squared();
    let t_base = params.base_temperature().get::<kelvin>();
    let t_inf = params.ambient_temperature().get::<kelvin>();

    let a = 1.0 / (dx * dx);
    let mut system = System::zeros(n);

    system.set_row(0, [0.0, 1.0, 0.0], t_base);

    for row in 1..n - 1 {
        system.set_row(row, [a, -(2.0 * a + m2), a], -m2 * t_inf);
    }

    let tip = n - 1;
    match params.tip() {
        TipCondition::Adiabatic => {
            system.set_row(tip, [2.0 * a, -(2.0 * a + m2), 0.0], -m2 * t_inf);
        }
        TipCondition::Convective => {
            let face = 2.0 * params.h() / (params.k() * dx);
            system.set_row(
                tip,
                [2.0 * a, -(2.0 * a + m2 + face), 0.0],
                -(m2 + face) * t_inf,
            );
        }
        TipCondition::FixedTemperature(t_tip) => {
            system.set_row(tip, [0.0, 1.0, 0.0], t_tip.get::<kelvin>());
        }
    }

    system
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, HeatTransfer, Length, ThermalConductivity},
        heat_transfer::watt_per_square_meter_kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
    };

    use crate::FinConfig;

    fn params(nodes: usize, tip: TipCondition) -> FinParameters {
        FinParameters::new(FinConfig {
            length: Length::new::<meter>(0.05),
            perimeter: Length::new::<meter>(0.02),
            area: Area::new::<square_meter>(1e-4),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
            convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(20.0),
            base_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
            nodes,
            tip,
        })
        .unwrap()
    }

    #[test]
    fn interior_rows() {
        let params = params(5, TipCondition::Adiabatic);
        let system = assemble(&params);

        let dx = 0.05 / 4.0;
        let a = 1.0 / (dx * dx);
        let [sub, diag, sup] = system.coefficients(2);
        assert_relative_eq!(sub, a);
        assert_relative_eq!(sup, a);
        assert_relative_eq!(diag, -(2.0 * a + 20.0), max_relative = 1e-12);
        assert_relative_eq!(system.rhs(2), -20.0 * 298.0, max_relative = 1e-12);
    }

    #[test]
    fn boundary_rows() {
        let dx = 0.05 / 4.0;
        let a = 1.0 / (dx * dx);

        let adiabatic = assemble(&params(5, TipCondition::Adiabatic));
        assert_eq!(adiabatic.coefficients(0), [0.0, 1.0, 0.0]);
        assert_relative_eq!(adiabatic.rhs(0), 373.0);

        let [sub, diag, sup] = adiabatic.coefficients(4);
        assert_relative_eq!(sub, 2.0 * a, max_relative = 1e-12);
        assert_relative_eq!(diag, -(2.0 * a + 20.0), max_relative = 1e-12);
        assert_eq!(sup, 0.0);

        let convective = assemble(&params(5, TipCondition::Convective));
        let face = 2.0 * 20.0 / (200.0 * dx);
        let [_, diag_conv, _] = convective.coefficients(4);
        assert_relative_eq!(diag_conv - diag, -face, max_relative = 1e-9);
        assert_relative_eq!(
            convective.rhs(4),
            -(20.0 + face) * 298.0,
            max_relative = 1e-12
        );

        let t_tip = ThermodynamicTemperature::new::<kelvin>(310.0);
        let fixed = assemble(&params(5, TipCondition::FixedTemperature(t_tip)));
        assert_eq!(fixed.coefficients(4), [0.0, 1.0, 0.0]);
        assert_relative_eq!(fixed.rhs(4), 310.0);
    }

    #[test]
    fn profile_starts_at_base_temperature() {
        let profile = solve(&params(50, TipCondition::Adiabatic)).unwrap();

        assert_eq!(profile.len(), 50);
        let base = profile.base().unwrap();
        assert_eq!(base.position.get::<meter>(), 0.0);
        assert_relative_eq!(base.temperature.get::<kelvin>(), 373.0, epsilon = 1e-9);
        assert_relative_eq!(profile.tip().unwrap().position.get::<meter>(), 0.05);
    }

    #[test]
    fn fixed_tip_is_honored() {
        let t_tip = ThermodynamicTemperature::new::<kelvin>(320.0);
        let profile = solve(&params(20, TipCondition::FixedTemperature(t_tip))).unwrap();
        assert_relative_eq!(
            profile.tip().unwrap().temperature.get::<kelvin>(),
            320.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn observer_sees_every_row() {
        let mut rows = 0;
        let observer = |_: &Event| -> Option<Action> {
            rows += 1;
            None
        };

        solve_with(&params(12, TipCondition::Convective), &Config::default(), observer)
            .unwrap();

        assert_eq!(rows, 12);
    }

    #[test]
    fn observer_rejection_is_singular() {
        let observer = |event: &Event| (event.row == 3).then_some(Action::TreatAsSingular);

        let error = solve_with(&params(12, TipCondition::Adiabatic), &Config::default(), observer)
            .unwrap_err();

        assert!(matches!(
            error,
            SolveError::SingularSystem(tridiagonal::Error::Rejected { row: 3, .. })
        ));
    }

    #[test]
    fn strict_tolerance_is_singular() {
        // A tolerance of one fails even the base row, whose pivot equals its scale.
        let config = Config::new(1.0).unwrap();
        let error = solve_with(&params(12, TipCondition::Adiabatic), &config, ()).unwrap_err();
        assert!(matches!(error, SolveError::SingularSystem(_)));
    }
}
