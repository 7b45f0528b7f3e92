use serde::{Deserialize, Serialize};

use super::stock::{StockQuote, Trend};

/// A single row of the portfolio: how many shares of one symbol are held.
///
/// Company, unit price and trend are copied from the quote table when the
/// row is created; only `quantity` changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Company name from the quote table
    pub company: String,

    /// Number of shares held (always >= 1)
    pub quantity: u32,

    /// Unit price from the quote table
    pub unit_price: f64,

    pub trend: Trend,
}

impl StockEntry {
    pub fn from_quote(quote: &StockQuote, quantity: u32) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            company: quote.company.clone(),
            quantity,
            unit_price: quote.price,
            trend: quote.trend,
        }
    }

    /// Market value of the row: quantity × unit price.
    pub fn value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}
