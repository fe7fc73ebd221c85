use rayon::prelude::*;
use thiserror::Error;
use uom::si::f64::Length;

use crate::{
    AnalyzeError, FinConfig, FinParameters, ParameterError, PerformanceMetrics, SolveError,
    TemperatureProfile, analyze, solve,
};

/// A solved and analyzed fin.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub params: FinParameters,
    pub profile: TemperatureProfile,
    pub metrics: PerformanceMetrics,
}

/// Errors from evaluating a fin end to end.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Validates, solves and analyzes a fin configuration.
///
/// # Errors
///
/// Returns the first [`EvaluateError`] raised along the way.
pub fn evaluate(config: FinConfig) -> Result<Evaluation, EvaluateError> {
    let params = FinParameters::new(config)?;
    let profile = solve(&params)?;
    let metrics = analyze(&params, &profile)?;
    Ok(Evaluation {
        params,
        profile,
        metrics,
    })
}

/// Evaluates `config` once per fin length, in parallel.
///
/// Every other field of `config` is held fixed. Results come back in the
/// order of `lengths`, each with its own outcome.
#[must_use]
pub fn sweep_lengths(
    config: &FinConfig,
    lengths: &[Length],
) -> Vec<Result<Evaluation, EvaluateError>> {
    lengths
        .par_iter()
        .map(|&length| evaluate(FinConfig { length, ..*config }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        area::square_meter,
        f64::{Area, HeatTransfer, ThermalConductivity, ThermodynamicTemperature},
        heat_transfer::watt_per_square_meter_kelvin,
        length::meter,
        thermal_conductivity::watt_per_meter_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::TipCondition;

    fn config() -> FinConfig {
        FinConfig {
            length: Length::new::<meter>(0.05),
            perimeter: Length::new::<meter>(0.02),
            area: Area::new::<square_meter>(1e-4),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(200.0),
            convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(20.0),
            base_temperature: ThermodynamicTemperature::new::<kelvin>(373.0),
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
            nodes: 30,
            tip: TipCondition::Convective,
        }
    }

    #[test]
    fn results_follow_input_order() {
        let lengths: Vec<_> = [0.02, 0.08, 0.01, 0.05]
            .into_iter()
            .map(Length::new::<meter>)
            .collect();

        let results = sweep_lengths(&config(), &lengths);

        assert_eq!(results.len(), 4);
        for (result, length) in results.iter().zip(&lengths) {
            let evaluation = result.as_ref().unwrap();
            assert_eq!(evaluation.params.length(), *length);
        }
    }

    #[test]
    fn matches_serial_evaluation() {
        let lengths = [Length::new::<meter>(0.03)];
        let parallel = sweep_lengths(&config(), &lengths);
        let serial = evaluate(FinConfig {
            length: lengths[0],
            ..config()
        });
        assert_eq!(parallel[0], serial);
    }

    #[test]
    fn errors_stay_with_their_length() {
        let lengths = [Length::new::<meter>(0.05), Length::new::<meter>(-1.0)];

        let results = sweep_lengths(&config(), &lengths);

        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(EvaluateError::Parameter(ParameterError::Constraint {
                field: "length",
                ..
            }))
        ));
    }
}
