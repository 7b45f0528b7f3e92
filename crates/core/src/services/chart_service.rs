use crate::models::chart::{AllocationSlice, ChartData, TrendBar, PALETTE_SIZE};
use crate::models::portfolio::Portfolio;

/// Generates chart-ready data sets from the holdings.
///
/// The core computes all the numbers — the frontend only renders.
/// - Allocation pie: each holding's share of total value
/// - Trend bars: the fixed up/down change per holding
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Pie slices in portfolio order. Empty when there is nothing to plot.
    ///
    /// A portfolio whose total is zero yields no slices rather than NaN fractions.
    pub fn allocation(&self, portfolio: &Portfolio) -> Vec<AllocationSlice> {
        let total = portfolio.total_value();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut start_fraction = 0.0;
        portfolio
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let value = entry.value();
                let fraction = value / total;
                let slice = AllocationSlice {
                    symbol: entry.symbol.clone(),
                    value,
                    fraction,
                    start_fraction,
                    color_index: i % PALETTE_SIZE,
                };
                start_fraction += fraction;
                slice
            })
            .collect()
    }

    /// One bar per holding, signed by its trend.
    pub fn trend(&self, portfolio: &Portfolio) -> Vec<TrendBar> {
        portfolio
            .entries
            .iter()
            .map(|entry| TrendBar {
                symbol: entry.symbol.clone(),
                trend: entry.trend,
                change_pct: entry.trend.change_pct(),
            })
            .collect()
    }

    /// Both datasets for one redraw.
    pub fn chart_data(&self, portfolio: &Portfolio) -> ChartData {
        ChartData {
            allocation: self.allocation(portfolio),
            trend: self.trend(portfolio),
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
