//! Labels and units for presenting fin results.
//!
//! Export formats share these so a CSV file, a text summary and a JSON
//! document all name the four metrics the same way.

use uom::si::{power::watt, ratio::ratio};

use crate::PerformanceMetrics;

/// Column names for a temperature profile table.
pub const PROFILE_COLUMNS: [&str; 2] = ["position", "temperature"];

/// One labeled scalar metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRow {
    /// Human-readable name, such as `"Fin efficiency"`.
    pub label: &'static str,
    /// Short symbol, such as `"η"`.
    pub symbol: &'static str,
    /// Unit symbol, `"-"` for dimensionless values.
    pub unit: &'static str,
    pub value: f64,
}

impl PerformanceMetrics {
    /// Returns the four metrics in reporting order.
    ///
    /// Values are in watts, plain ratios, and 1/m.
    #[must_use]
    pub fn rows(&self) -> [MetricRow; 4] {
        [
            MetricRow {
                label: "Total heat transfer",
                symbol: "Q",
                unit: "W",
                value: self.heat_transfer_rate.get::<watt>(),
            },
            MetricRow {
                label: "Fin efficiency",
                symbol: "η",
                unit: "-",
                value: self.efficiency.get::<ratio>(),
            },
            MetricRow {
                label: "Fin effectiveness",
                symbol: "ε",
                unit: "-",
                value: self.effectiveness.get::<ratio>(),
            },
            MetricRow {
                label: "Parameter m",
                symbol: "m",
                unit: "1/m",
                value: self.fin_parameter.value,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thermofin_core::units::per_meter;
    use uom::si::f64::{Power, Ratio};

    use crate::{Efficiency, HeatRateMethod};

    #[test]
    fn rows_are_labeled_in_order() {
        let metrics = PerformanceMetrics {
            heat_transfer_rate: Power::new::<watt>(6.6),
            efficiency: Efficiency::new(Ratio::new::<ratio>(0.98)),
            effectiveness: Ratio::new::<ratio>(9.8),
            fin_parameter: per_meter(4.47),
            method: HeatRateMethod::ClosedForm,
        };

        let rows = metrics.rows();
        let labels: Vec<_> = rows.iter().map(|row| row.label).collect();
        assert_eq!(
            labels,
            [
                "Total heat transfer",
                "Fin efficiency",
                "Fin effectiveness",
                "Parameter m"
            ]
        );
        assert_eq!(rows[0].unit, "W");
        assert_eq!(rows[1].value, 0.98);
        assert_eq!(rows[3].value, 4.47);
    }
}
