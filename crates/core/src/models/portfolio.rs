use serde::{Deserialize, Serialize};

use super::holding::StockEntry;

/// The main data container: an ordered list of holdings, unique by symbol.
///
/// Rows keep the order in which symbols were first added. Nothing here is
/// persisted; the collection lives only as long as the process unless it
/// is exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub entries: Vec<StockEntry>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    /// Look up a row by symbol (case-insensitive).
    pub fn get(&self, symbol: &str) -> Option<&StockEntry> {
        self.position(symbol).map(|idx| &self.entries[idx])
    }

    /// Index of the row holding `symbol` (case-insensitive).
    pub fn position(&self, symbol: &str) -> Option<usize> {
        let upper = symbol.to_uppercase();
        self.entries.iter().position(|e| e.symbol == upper)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all row values. Zero for an empty portfolio.
    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(StockEntry::value).sum()
    }

    /// Sum of all share quantities.
    pub fn total_shares(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}
