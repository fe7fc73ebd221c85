use uom::si::f64::Length;

use crate::FinParameters;

/// Uniformly spaced node positions from the fin base to its tip.
///
/// Node `i` sits at `x_i = L·i/(N-1)`, so the first node is exactly zero and
/// the last is exactly `L`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    positions: Vec<Length>,
    spacing: Length,
}

impl Grid {
    /// Builds the grid a solve over `params` uses.
    #[must_use]
    pub fn for_fin(params: &FinParameters) -> Self {
        Self::uniform(params.length(), params.nodes())
    }

    /// Builds `nodes` equally spaced positions over `[0, length]`.
    ///
    /// Fewer than two nodes collapse to the base alone. Node counts from
    /// validated [`FinParameters`] never exceed [`MAX_NODES`](crate::MAX_NODES).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform(length: Length, nodes: usize) -> Self {
        if nodes < 2 {
            return Self {
                positions: vec![length * 0.0; nodes],
                spacing: length * 0.0,
            };
        }

        let intervals = (nodes - 1) as f64;
        let positions = (0..nodes)
            .map(|i| length * (i as f64 / intervals))
            .collect();

        Self {
            positions,
            spacing: length / intervals,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Length] {
        &self.positions
    }

    #[must_use]
    pub fn spacing(&self) -> Length {
        self.spacing
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
