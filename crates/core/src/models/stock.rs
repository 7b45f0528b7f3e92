use serde::{Deserialize, Serialize};

/// Static "recent performance" direction of a stock.
///
/// This is a hardcoded flag per symbol, unrelated to real market movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Glyph shown in the holdings table and in exports.
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }

    /// Fixed percentage change plotted by the trend bar chart (as a fraction).
    pub fn change_pct(self) -> f64 {
        match self {
            Trend::Up => 0.05,
            Trend::Down => -0.06,
        }
    }

    pub fn is_up(self) -> bool {
        self == Trend::Up
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

/// One row of the quote table: a symbol with its company name,
/// fixed unit price and trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Company name (e.g., "Apple Inc.")
    pub company: String,

    /// Unit price in dollars
    pub price: f64,

    pub trend: Trend,
}

impl StockQuote {
    pub fn new(
        symbol: impl Into<String>,
        company: impl Into<String>,
        price: f64,
        trend: Trend,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            company: company.into(),
            price,
            trend,
        }
    }

    /// Picker label, e.g. `"AAPL - Apple Inc."`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.symbol, self.company)
    }
}
