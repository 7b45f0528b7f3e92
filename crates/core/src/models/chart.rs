use serde::{Deserialize, Serialize};

use super::stock::Trend;

/// Number of distinct colours the allocation pie cycles through.
pub const PALETTE_SIZE: usize = 5;

/// One slice of the allocation pie chart.
///
/// The core computes the geometry (as fractions of a full turn);
/// the frontend only maps it onto pixels and colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub symbol: String,

    /// Market value of the holding
    pub value: f64,

    /// Share of the total portfolio value, in `0.0..=1.0`
    pub fraction: f64,

    /// Sum of the fractions of all preceding slices
    pub start_fraction: f64,

    /// Index into the chart palette (`0..PALETTE_SIZE`)
    pub color_index: usize,
}

impl AllocationSlice {
    /// Percent label as drawn on the pie, e.g. `"42.9%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    /// Whether `turn` (a fraction of a full circle, `0.0..1.0`) falls inside this slice.
    pub fn contains(&self, turn: f64) -> bool {
        turn >= self.start_fraction && turn < self.start_fraction + self.fraction
    }
}

/// One bar of the "recent performance" chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBar {
    pub symbol: String,
    pub trend: Trend,

    /// Fixed change for the trend, as a fraction (0.05 = +5%)
    pub change_pct: f64,
}

impl TrendBar {
    /// Signed percent label, e.g. `"+5.0%"` or `"-6.0%"`.
    pub fn label(&self) -> String {
        format!("{:+.1}%", self.change_pct * 100.0)
    }
}

/// Both chart datasets for one redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub allocation: Vec<AllocationSlice>,
    pub trend: Vec<TrendBar>,
}

impl ChartData {
    /// True when there is nothing to plot (empty portfolio).
    pub fn is_empty(&self) -> bool {
        self.allocation.is_empty() && self.trend.is_empty()
    }
}
