use crate::models::stock::StockQuote;

/// Abstraction over where quotes come from.
///
/// The application ships a single hardcoded table, but the portfolio
/// service and the facade only ever talk to this trait, so tests can
/// substitute their own catalogue.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Look up a quote by symbol (case-insensitive).
    fn quote(&self, symbol: &str) -> Option<StockQuote>;

    /// Every quote this provider knows, in catalogue order.
    fn quotes(&self) -> Vec<StockQuote>;
}
