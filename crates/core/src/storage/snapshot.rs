use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::portfolio::Portfolio;
use crate::models::stock::Trend;

use super::format::TIMESTAMP_FORMAT;

/// One exported holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub symbol: String,
    pub company: String,
    pub quantity: u32,
    pub price: f64,
    pub value: f64,
    pub trend: Trend,
}

/// Everything an exporter writes: the rows, their total and when the
/// snapshot was taken. Built once so all three writers agree on the numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    pub timestamp: NaiveDateTime,
    pub rows: Vec<ExportRow>,
    pub total_value: f64,
}

impl ExportSnapshot {
    pub fn from_portfolio(portfolio: &Portfolio, timestamp: NaiveDateTime) -> Self {
        let rows = portfolio
            .entries
            .iter()
            .map(|e| ExportRow {
                symbol: e.symbol.clone(),
                company: e.company.clone(),
                quantity: e.quantity,
                price: e.unit_price,
                value: e.value(),
                trend: e.trend,
            })
            .collect();

        Self {
            timestamp,
            rows,
            total_value: portfolio.total_value(),
        }
    }

    /// Header timestamp, e.g. `"2024-03-01 14:05:09"`.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
