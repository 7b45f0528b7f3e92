pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use log::debug;
use models::{
    chart::ChartData,
    holding::StockEntry,
    portfolio::Portfolio,
    stock::StockQuote,
};
use providers::{static_table::StaticQuoteTable, traits::QuoteProvider};
use services::{
    chart_service::ChartService,
    portfolio_service::{AddOutcome, PortfolioService},
};
use storage::{
    format::ExportFormat,
    manager::{ExportManager, ExportReport},
};

use errors::CoreError;

/// Main entry point for the Stock Portfolio core library.
/// Holds the holdings and all services needed to operate on them.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    provider: Box<dyn QuoteProvider>,
    portfolio_service: PortfolioService,
    chart_service: ChartService,
    /// Tracks whether any mutation has occurred since the last export.
    dirty: bool,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("holdings", &self.portfolio.len())
            .field("provider", &self.provider.name())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for PortfolioTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioTracker {
    /// Create an empty portfolio priced from the built-in quote table.
    pub fn new() -> Self {
        Self::with_provider(Box::new(StaticQuoteTable::new()))
    }

    /// Create an empty portfolio priced from a custom quote source.
    pub fn with_provider(provider: Box<dyn QuoteProvider>) -> Self {
        Self {
            portfolio: Portfolio::new(),
            provider,
            portfolio_service: PortfolioService::new(),
            chart_service: ChartService::new(),
            dirty: false,
        }
    }

    // ── Catalogue ───────────────────────────────────────────────────

    /// Every stock that can be added, in catalogue order.
    #[must_use]
    pub fn available_stocks(&self) -> Vec<StockQuote> {
        self.provider.quotes()
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add shares. `selection` may be a picker label (`"AAPL - Apple Inc."`)
    /// or a bare symbol. Repeated adds of one symbol accumulate.
    pub fn add_stock(&mut self, selection: &str, quantity: u32) -> Result<AddOutcome, CoreError> {
        let symbol = PortfolioService::parse_selection(selection)?;
        let outcome = self.portfolio_service.add(
            &mut self.portfolio,
            self.provider.as_ref(),
            &symbol,
            quantity,
        )?;
        self.dirty = true;
        Ok(outcome)
    }

    /// Remove the selected holding. `None` means no row is selected.
    pub fn remove_stock(&mut self, selection: Option<&str>) -> Result<StockEntry, CoreError> {
        let removed = self
            .portfolio_service
            .remove(&mut self.portfolio, selection)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Remove every holding. Returns how many rows were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.portfolio_service.clear(&mut self.portfolio);
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    #[must_use]
    pub fn entries(&self) -> &[StockEntry] {
        self.portfolio.entries()
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&StockEntry> {
        self.portfolio.get(symbol)
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    // ── Totals & Charts ─────────────────────────────────────────────

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolio.total_value()
    }

    /// `"Total Portfolio Value: $1,234.00"`
    #[must_use]
    pub fn total_label(&self) -> String {
        format::total_label(self.total_value())
    }

    /// Recompute both chart datasets from the current holdings.
    #[must_use]
    pub fn chart_data(&self) -> ChartData {
        self.chart_service.chart_data(&self.portfolio)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export to `path`, stamped with the current local time.
    /// Clears the unsaved-changes flag on success.
    pub fn export_to_file(&mut self, path: impl AsRef<Path>) -> Result<ExportReport, CoreError> {
        self.export_to_file_at(path, Local::now().naive_local())
    }

    /// Export to `path` with an explicit timestamp.
    pub fn export_to_file_at(
        &mut self,
        path: impl AsRef<Path>,
        timestamp: NaiveDateTime,
    ) -> Result<ExportReport, CoreError> {
        let report = ExportManager::export_to_file(&self.portfolio, path.as_ref(), timestamp)?;
        self.dirty = false;
        debug!("Unsaved-changes flag cleared after export to {}", report.path.display());
        Ok(report)
    }

    /// Render an export in memory (does not touch the unsaved-changes flag).
    pub fn export_to_string(
        &self,
        format: ExportFormat,
        timestamp: NaiveDateTime,
    ) -> Result<String, CoreError> {
        let bytes = ExportManager::export_to_bytes(&self.portfolio, format, timestamp)?;
        String::from_utf8(bytes).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Whether holdings changed since the last successful export.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }
}
