use crate::models::stock::{StockQuote, Trend};

use super::traits::QuoteProvider;

/// (symbol, company, price, trend) — the whole market this program knows.
const STOCKS: &[(&str, &str, f64, Trend)] = &[
    ("AAPL", "Apple Inc.", 180.0, Trend::Up),
    ("TSLA", "Tesla Inc.", 250.0, Trend::Down),
    ("GOOGL", "Alphabet Inc.", 2800.0, Trend::Up),
    ("AMZN", "Amazon.com Inc.", 3400.0, Trend::Up),
    ("MSFT", "Microsoft Corp.", 300.0, Trend::Down),
    ("NFLX", "Netflix Inc.", 600.0, Trend::Down),
    ("META", "Meta Platforms Inc.", 350.0, Trend::Up),
];

/// Hardcoded quote table. Prices and trends never change at runtime.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteTable;

impl StaticQuoteTable {
    pub fn new() -> Self {
        Self
    }
}

impl QuoteProvider for StaticQuoteTable {
    fn name(&self) -> &str {
        "StaticQuoteTable"
    }

    fn quote(&self, symbol: &str) -> Option<StockQuote> {
        let upper = symbol.trim().to_uppercase();
        STOCKS
            .iter()
            .find(|(s, ..)| *s == upper)
            .map(|&(s, company, price, trend)| StockQuote::new(s, company, price, trend))
    }

    fn quotes(&self) -> Vec<StockQuote> {
        STOCKS
            .iter()
            .map(|&(s, company, price, trend)| StockQuote::new(s, company, price, trend))
            .collect()
    }
}
