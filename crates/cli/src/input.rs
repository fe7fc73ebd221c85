//! Layered fin input: baseline, then a preset, then a TOML file, then flags.
//!
//! Each layer is a [`FinPatch`] whose unset fields leave the layer below
//! untouched. Temperatures in a patch are read on that patch's `unit`, or on
//! the current output unit if it names none.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;
use thermofin_core::units::TemperatureUnit;
use thermofin_fin::{FinConfig, RectangularSection, TipCondition};
use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Grid nodes used when no layer sets a count.
pub const DEFAULT_NODES: usize = 300;

/// Temperature scale accepted on input and used for output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl From<Scale> for TemperatureUnit {
    fn from(scale: Scale) -> Self {
        match scale {
            Scale::Kelvin => TemperatureUnit::Kelvin,
            Scale::Celsius => TemperatureUnit::Celsius,
            Scale::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

/// Tip condition as written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TipInput {
    Adiabatic,
    Convective,
    Fixed { temperature: f64 },
}

/// A partial fin description. Lengths in meters, areas in square meters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinPatch {
    pub conductivity: Option<f64>,
    pub convection: Option<f64>,
    pub thickness: Option<f64>,
    pub width: Option<f64>,
    pub area: Option<f64>,
    pub perimeter: Option<f64>,
    pub length: Option<f64>,
    pub base_temperature: Option<f64>,
    pub ambient_temperature: Option<f64>,
    pub nodes: Option<usize>,
    pub tip: Option<TipInput>,
    pub unit: Option<Scale>,
}

impl FinPatch {
    /// Reads a patch from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid fin config in {}", path.display()))
    }
}

/// Fully resolved fin input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinInput {
    pub conductivity: f64,
    pub convection: f64,
    pub thickness: f64,
    pub width: f64,
    pub area: Option<f64>,
    pub perimeter: Option<f64>,
    pub length: f64,
    pub base_temperature: ThermodynamicTemperature,
    pub ambient_temperature: ThermodynamicTemperature,
    pub nodes: usize,
    pub tip: TipCondition,
    pub unit: TemperatureUnit,
}

impl Default for FinInput {
    /// The baseline fin: a 30 mm steel fin, 3 mm by 10 mm, in hot gas.
    fn default() -> Self {
        Self {
            conductivity: 15.0,
            convection: 120.0,
            thickness: 0.003,
            width: 0.010,
            area: None,
            perimeter: None,
            length: 0.03,
            base_temperature: ThermodynamicTemperature::new::<kelvin>(900.0),
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(600.0),
            nodes: DEFAULT_NODES,
            tip: TipCondition::Adiabatic,
            unit: TemperatureUnit::Kelvin,
        }
    }
}

impl FinInput {
    /// Overlays the fields `patch` sets.
    pub fn apply(&mut self, patch: &FinPatch) {
        let unit = patch.unit.map_or(self.unit, TemperatureUnit::from);

        set(&mut self.conductivity, patch.conductivity);
        set(&mut self.convection, patch.convection);
        set(&mut self.length, patch.length);
        set(&mut self.nodes, patch.nodes);

        if patch.thickness.is_some() || patch.width.is_some() {
            set(&mut self.thickness, patch.thickness);
            set(&mut self.width, patch.width);
            self.area = None;
            self.perimeter = None;
        }
        if patch.area.is_some() {
            self.area = patch.area;
        }
        if patch.perimeter.is_some() {
            self.perimeter = patch.perimeter;
        }

        if let Some(t) = patch.base_temperature {
            self.base_temperature = unit.temperature(t);
        }
        if let Some(t) = patch.ambient_temperature {
            self.ambient_temperature = unit.temperature(t);
        }
        if let Some(tip) = patch.tip {
            self.tip = match tip {
                TipInput::Adiabatic => TipCondition::Adiabatic,
                TipInput::Convective => TipCondition::Convective,
                TipInput::Fixed { temperature } => {
                    TipCondition::FixedTemperature(unit.temperature(temperature))
                }
            };
        }

        self.unit = unit;
    }

    /// Converts to typed fin inputs.
    ///
    /// An explicit area and perimeter take precedence over the rectangular
    /// thickness and width.
    pub fn to_config(&self) -> Result<FinConfig> {
        let (area, perimeter) = match (self.area, self.perimeter) {
            (Some(area), Some(perimeter)) => (
                Area::new::<square_meter>(area),
                Length::new::<meter>(perimeter),
            ),
            (None, None) => {
                let section = RectangularSection {
                    thickness: Length::new::<meter>(self.thickness),
                    width: Length::new::<meter>(self.width),
                };
                (section.area(), section.perimeter())
            }
            _ => bail!("area and perimeter must be given together"),
        };

        Ok(FinConfig {
            length: Length::new::<meter>(self.length),
            perimeter,
            area,
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(self.conductivity),
            convection: HeatTransfer::new::<watt_per_square_meter_kelvin>(self.convection),
            base_temperature: self.base_temperature,
            ambient_temperature: self.ambient_temperature,
            nodes: self.nodes,
            tip: self.tip,
        })
    }
}

fn set<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
