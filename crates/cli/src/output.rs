//! Text, JSON and CSV renderings of a fin evaluation.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use thermofin_core::units::TemperatureUnit;
use thermofin_fin::{
    Evaluation, FinConfig, HeatRateMethod, PerformanceMetrics, TipCondition, report::MetricRow,
};
use uom::si::{
    area::square_meter, heat_transfer::watt_per_square_meter_kelvin, length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// The results box: `Q`, `η`, `ε` and `m`.
pub fn summary(metrics: &PerformanceMetrics) -> String {
    let [q, eta, eps, m] = metrics.rows();
    format!(
        "{} = {:.2} {}\n{} = {:.3} ({})\n{} = {:.3} ({})\n{} = {:.1} {}\n",
        q.symbol, q.value, q.unit, eta.symbol, eta.value, eta.unit, eps.symbol, eps.value,
        eps.unit, m.symbol, m.value, m.unit,
    )
}

#[derive(Debug, Serialize)]
struct JsonMetric {
    label: &'static str,
    symbol: &'static str,
    unit: &'static str,
    value: f64,
}

impl From<MetricRow> for JsonMetric {
    fn from(row: MetricRow) -> Self {
        Self {
            label: row.label,
            symbol: row.symbol,
            unit: row.unit,
            value: row.value,
        }
    }
}

/// The inputs an evaluation was solved from, temperatures on the output scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct InputRecord {
    conductivity: f64,
    convection: f64,
    area: f64,
    perimeter: f64,
    length: f64,
    base_temperature: f64,
    ambient_temperature: f64,
    nodes: usize,
    tip: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tip_temperature: Option<f64>,
}

impl InputRecord {
    fn new(config: &FinConfig, unit: TemperatureUnit) -> Self {
        let (tip, tip_temperature) = match config.tip {
            TipCondition::Adiabatic => ("adiabatic", None),
            TipCondition::Convective => ("convective", None),
            TipCondition::FixedTemperature(t) => ("fixed", Some(unit.value(t))),
        };

        Self {
            conductivity: config.conductivity.get::<watt_per_meter_kelvin>(),
            convection: config.convection.get::<watt_per_square_meter_kelvin>(),
            area: config.area.get::<square_meter>(),
            perimeter: config.perimeter.get::<meter>(),
            length: config.length.get::<meter>(),
            base_temperature: unit.value(config.base_temperature),
            ambient_temperature: unit.value(config.ambient_temperature),
            nodes: config.nodes,
            tip,
            tip_temperature,
        }
    }

    fn write_csv<W: Write>(&self, out: &mut W, unit: TemperatureUnit) -> std::io::Result<()> {
        let t = unit.symbol();
        writeln!(out, "# Thermal conductivity [W/(m·K)],{}", self.conductivity)?;
        writeln!(out, "# Convection coefficient [W/(m²·K)],{}", self.convection)?;
        writeln!(out, "# Cross-sectional area [m²],{}", self.area)?;
        writeln!(out, "# Perimeter [m],{}", self.perimeter)?;
        writeln!(out, "# Fin length [m],{}", self.length)?;
        writeln!(out, "# Base temperature [{t}],{}", self.base_temperature)?;
        writeln!(out, "# Ambient temperature [{t}],{}", self.ambient_temperature)?;
        writeln!(out, "# Grid nodes [-],{}", self.nodes)?;
        writeln!(out, "# Tip condition [-],{}", self.tip)?;
        if let Some(tip_temperature) = self.tip_temperature {
            writeln!(out, "# Tip temperature [{t}],{tip_temperature}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonPoint {
    x: f64,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    length: f64,
    heat_rate_method: &'static str,
    temperature_unit: &'static str,
    params: InputRecord,
    metrics: Vec<JsonMetric>,
    profile: Vec<JsonPoint>,
}

fn method_name(method: HeatRateMethod) -> &'static str {
    match method {
        HeatRateMethod::ClosedForm => "closed-form",
        HeatRateMethod::BaseFlux => "base-flux",
    }
}

fn json_report(evaluation: &Evaluation, unit: TemperatureUnit) -> JsonReport {
    let Evaluation {
        params,
        profile,
        metrics,
    } = evaluation;

    JsonReport {
        length: params.length().get::<meter>(),
        heat_rate_method: method_name(metrics.method),
        temperature_unit: unit.symbol(),
        params: InputRecord::new(&params.config(), unit),
        metrics: metrics.rows().into_iter().map(JsonMetric::from).collect(),
        profile: profile
            .rows(unit)
            .map(|(x, temperature)| JsonPoint { x, temperature })
            .collect(),
    }
}

/// Serializes one evaluation as pretty-printed JSON.
pub fn json(evaluation: &Evaluation, unit: TemperatureUnit) -> Result<String> {
    serde_json::to_string_pretty(&json_report(evaluation, unit))
        .context("Failed to serialize results")
}

/// Serializes several evaluations as a JSON array.
pub fn json_many(evaluations: &[Evaluation], unit: TemperatureUnit) -> Result<String> {
    let reports: Vec<_> = evaluations
        .iter()
        .map(|evaluation| json_report(evaluation, unit))
        .collect();
    serde_json::to_string_pretty(&reports).context("Failed to serialize results")
}

/// Writes input rows, metric rows, then the `x [m],T [unit]` table.
pub fn write_csv<W: Write>(
    mut out: W,
    evaluation: &Evaluation,
    unit: TemperatureUnit,
) -> std::io::Result<()> {
    InputRecord::new(&evaluation.params.config(), unit).write_csv(&mut out, unit)?;
    for row in evaluation.metrics.rows() {
        writeln!(out, "# {} [{}],{}", row.label, row.unit, row.value)?;
    }
    writeln!(out, "x [m],T [{}]", unit.symbol())?;
    for (x, t) in evaluation.profile.rows(unit) {
        writeln!(out, "{x},{t}")?;
    }
    out.flush()
}

/// Writes [`write_csv`] output to a file.
pub fn export_csv(path: &Path, evaluation: &Evaluation, unit: TemperatureUnit) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(BufWriter::new(file), evaluation, unit)
        .with_context(|| format!("Failed to write {}", path.display()))
}
