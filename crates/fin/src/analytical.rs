//! Closed-form solutions for a constant cross-section fin.
//!
//! With `θ = T - T_inf`, `m = sqrt(hP / kA)` and `M = sqrt(hPkA)·θ_b`:
//!
//! | tip | `θ(x) / θ_b` | `Q` |
//! |---|---|---|
//! | adiabatic | `cosh m(L-x) / cosh mL` | `M tanh mL` |
//! | convective | `[cosh m(L-x) + β sinh m(L-x)] / [cosh mL + β sinh mL]` | `M [sinh mL + β cosh mL] / [cosh mL + β sinh mL]` |
//! | fixed | `[(θ_L/θ_b) sinh mx + sinh m(L-x)] / sinh mL` | `M [cosh mL - θ_L/θ_b] / sinh mL` |
//!
//! where `β = h / (mk)`. The hyperbolic ratios are evaluated in decaying
//! exponential form so long fins do not overflow.

use thermofin_core::units::{ReciprocalLength, TemperatureOps, per_meter};
use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature},
    length::meter,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{Degeneracy, FinParameters, Grid, ProfilePoint, TemperatureProfile, TipCondition};

/// Returns the fin parameter `m = sqrt(hP / kA)`.
///
/// # Errors
///
/// Returns [`Degeneracy::NoConduction`] if `k·A` is not positive.
pub fn fin_parameter(params: &FinParameters) -> Result<ReciprocalLength, Degeneracy> {
    let conduction = params.k() * params.a();
    if conduction.is_nan() || conduction <= 0.0 {
        return Err(Degeneracy::NoConduction);
    }
    Ok(per_meter((params.h() * params.p() / conduction).sqrt()))
}

/// Exact temperature at position `x`.
///
/// # Errors
///
/// Returns a [`Degeneracy`] if `m` is zero or undefined.
pub fn temperature(
    params: &FinParameters,
    x: Length,
) -> Result<ThermodynamicTemperature, Degeneracy> {
    let theory = Theory::new(params)?;
    Ok(theory.temperature(x.get::<meter>()))
}

/// Exact temperatures on the grid a solve over `params` would use.
///
/// # Errors
///
/// Returns a [`Degeneracy`] if `m` is zero or undefined.
pub fn profile(params: &FinParameters) -> Result<TemperatureProfile, Degeneracy> {
    let theory = Theory::new(params)?;
    let points = Grid::for_fin(params)
        .positions()
        .iter()
        .map(|&position| ProfilePoint {
            position,
            temperature: theory.temperature(position.get::<meter>()),
        })
        .collect();
    Ok(TemperatureProfile::new(points))
}

/// Exact heat transfer rate through the fin base.
///
/// # Errors
///
/// Returns a [`Degeneracy`] if `m` is zero or undefined.
pub fn heat_transfer_rate(params: &FinParameters) -> Result<Power, Degeneracy> {
    let theory = Theory::new(params)?;
    Ok(Power::new::<watt>(theory.heat_transfer_rate()))
}

/// Precomputed terms shared by the closed forms, all in SI base units.
struct Theory {
    m: f64,
    length: f64,
    t_inf: f64,
    theta_b: f64,
    /// `sqrt(hPkA)`
    conductance: f64,
    tip: Tip,
}

enum Tip {
    Adiabatic,
    Convective { beta: f64 },
    Fixed { theta_l: f64 },
}

impl Theory {
    fn new(params: &FinParameters) -> Result<Self, Degeneracy> {
        let m = fin_parameter(params)?.value;
        if m.is_nan() || m <= 0.0 {
            return Err(Degeneracy::NoConvection);
        }

        let t_inf = params.ambient_temperature();
        let tip = match params.tip() {
            TipCondition::Adiabatic => Tip::Adiabatic,
            TipCondition::Convective => Tip::Convective {
                beta: params.h() / (m * params.k()),
            },
            TipCondition::FixedTemperature(t_tip) => Tip::Fixed {
                theta_l: t_tip.minus(t_inf).get::<delta_kelvin>(),
            },
        };

        Ok(Self {
            m,
            length: params.l(),
            t_inf: t_inf.get::<kelvin>(),
            theta_b: params
                .base_temperature()
                .minus(t_inf)
                .get::<delta_kelvin>(),
            conductance: (params.h() * params.p() * params.k() * params.a()).sqrt(),
            tip,
        })
    }

    fn temperature(&self, x: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.t_inf + self.excess(x))
    }

    /// `θ(x)` in kelvin.
    fn excess(&self, x: f64) -> f64 {
        let Self {
            m,
            length,
            theta_b,
            ..
        } = *self;

        let decay = (-m * x).exp();
        let reflected = (-2.0 * m * (length - x)).exp();
        let round_trip = (-2.0 * m * length).exp();

        match self.tip {
            Tip::Adiabatic => theta_b * decay * (1.0 + reflected) / (1.0 + round_trip),
            Tip::Convective { beta } => {
                theta_b * decay * ((1.0 + beta) + (1.0 - beta) * reflected)
                    / ((1.0 + beta) + (1.0 - beta) * round_trip)
            }
            Tip::Fixed { theta_l } => {
                // sinh(a) / sinh(mL) = exp(a - mL) (1 - exp(-2a)) / (1 - exp(-2mL))
                let denominator = -(-2.0 * m * length).exp_m1();
                let from_tip =
                    (-m * (length - x)).exp() * -(-2.0 * m * x).exp_m1() / denominator;
                let from_base = decay * -(-2.0 * m * (length - x)).exp_m1() / denominator;
                theta_l * from_tip + theta_b * from_base
            }
        }
    }

    /// `Q` in watts.
    fn heat_transfer_rate(&self) -> f64 {
        let ml = self.m * self.length;
        let round_trip = (-2.0 * ml).exp();

        match self.tip {
            Tip::Adiabatic => self.conductance * self.theta_b * ml.tanh(),
            Tip::Convective { beta } => {
                self.conductance * self.theta_b * ((1.0 + beta) - (1.0 - beta) * round_trip)
                    / ((1.0 + beta) + (1.0 - beta) * round_trip)
            }
            Tip::Fixed { theta_l } => {
                // 1 / sinh(mL) = 2 exp(-mL) / (1 - exp(-2mL))
                let csch = 2.0 * (-ml).exp() / -(-2.0 * ml).exp_m1();
                self.conductance * (self.theta_b / ml.tanh() - theta_l * csch)
            }
        }
    }
}
