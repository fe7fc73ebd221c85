use clap::ValueEnum;

use crate::input::FinPatch;

/// Named starting points, each applied on top of the baseline fin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// k = 15, h = 120, t = 3 mm, b = 10 mm, L = 30 mm, T_b = 900 K, T_inf = 600 K.
    Baseline,
    /// h = 300 and a thinner fin, t = 2 mm.
    HighConvection,
    /// t = 5 mm and a longer fin, L = 50 mm.
    ThickLong,
    /// T_inf = 500 K with a hotter base, T_b = 1000 K.
    CoolAmbient,
}

impl Preset {
    pub const ALL: [Self; 4] = [
        Self::Baseline,
        Self::HighConvection,
        Self::ThickLong,
        Self::CoolAmbient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::HighConvection => "high-convection",
            Self::ThickLong => "thick-long",
            Self::CoolAmbient => "cool-ambient",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Baseline => "k=15, h=120, t=3mm, b=10mm, L=30mm, Tb=900K, T∞=600K",
            Self::HighConvection => "high convection (h=300) and a thinner fin (t=2mm)",
            Self::ThickLong => "thick fin (t=5mm), long (L=50mm)",
            Self::CoolAmbient => "cool ambient (T∞=500K) and a hot base (Tb=1000K)",
        }
    }

    /// The changes this preset makes, temperatures in kelvin.
    pub fn patch(self) -> FinPatch {
        let kelvin = Some(crate::input::Scale::Kelvin);
        match self {
            Self::Baseline => FinPatch {
                conductivity: Some(15.0),
                convection: Some(120.0),
                thickness: Some(0.003),
                width: Some(0.010),
                length: Some(0.03),
                base_temperature: Some(900.0),
                ambient_temperature: Some(600.0),
                unit: kelvin,
                ..FinPatch::default()
            },
            Self::HighConvection => FinPatch {
                convection: Some(300.0),
                thickness: Some(0.002),
                ..FinPatch::default()
            },
            Self::ThickLong => FinPatch {
                thickness: Some(0.005),
                length: Some(0.050),
                ..FinPatch::default()
            },
            Self::CoolAmbient => FinPatch {
                base_temperature: Some(1000.0),
                ambient_temperature: Some(500.0),
                unit: kelvin,
                ..FinPatch::default()
            },
        }
    }
}
