use log::debug;

use crate::errors::CoreError;
use crate::models::holding::StockEntry;
use crate::models::portfolio::Portfolio;
use crate::providers::traits::QuoteProvider;

/// Result of a successful `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended.
    Added,
    /// The symbol was already held; its quantity was increased.
    Merged { new_quantity: u32 },
}

/// Manages the holdings list: add, merge, remove, clear.
///
/// Pure business logic — no I/O. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Add `quantity` shares of `symbol`.
    ///
    /// Rules:
    /// - The symbol must exist in the quote table
    /// - Quantity must be at least 1
    /// - A symbol already held is merged into its row, never duplicated
    pub fn add(
        &self,
        portfolio: &mut Portfolio,
        provider: &dyn QuoteProvider,
        symbol: &str,
        quantity: u32,
    ) -> Result<AddOutcome, CoreError> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(
                "Quantity must be at least 1".into(),
            ));
        }

        let quote = provider
            .quote(symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.trim().to_uppercase()))?;

        if let Some(idx) = portfolio.position(&quote.symbol) {
            let entry = &mut portfolio.entries[idx];
            let new_quantity = entry.quantity.checked_add(quantity).ok_or_else(|| {
                CoreError::InvalidQuantity(format!(
                    "Cannot hold more than {} shares of {}",
                    u32::MAX,
                    entry.symbol
                ))
            })?;
            entry.quantity = new_quantity;
            debug!("Merged {quantity} shares into {} (now {new_quantity})", entry.symbol);
            return Ok(AddOutcome::Merged { new_quantity });
        }

        debug!("Added new holding {} x{quantity}", quote.symbol);
        portfolio.entries.push(StockEntry::from_quote(&quote, quantity));
        Ok(AddOutcome::Added)
    }

    /// Remove the selected row. `None` means nothing is selected.
    pub fn remove(
        &self,
        portfolio: &mut Portfolio,
        selection: Option<&str>,
    ) -> Result<StockEntry, CoreError> {
        let symbol = selection.ok_or(CoreError::NothingSelected)?;
        let idx = portfolio
            .position(symbol)
            .ok_or_else(|| CoreError::HoldingNotFound(symbol.to_uppercase()))?;
        let removed = portfolio.entries.remove(idx);
        debug!("Removed holding {}", removed.symbol);
        Ok(removed)
    }

    /// Remove every row. Returns how many rows were dropped.
    pub fn clear(&self, portfolio: &mut Portfolio) -> usize {
        let count = portfolio.entries.len();
        portfolio.entries.clear();
        debug!("Cleared {count} holdings");
        count
    }

    /// Turn a picker label into a symbol.
    ///
    /// Accepts `"AAPL - Apple Inc."` as well as a bare `"aapl"`.
    pub fn parse_selection(label: &str) -> Result<String, CoreError> {
        let symbol = label.split(" - ").next().unwrap_or("").trim();
        if symbol.is_empty() {
            return Err(CoreError::NothingSelected);
        }
        Ok(symbol.to_uppercase())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
