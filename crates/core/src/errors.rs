use thiserror::Error;

/// Unified error type for the entire stock-portfolio-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User input ──────────────────────────────────────────────────
    #[error("Stock symbol not found: {0}")]
    UnknownSymbol(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Please select a stock")]
    NothingSelected,

    #[error("Stock not in portfolio: {0}")]
    HoldingNotFound(String),

    // ── Export ──────────────────────────────────────────────────────
    #[error("Unsupported export format: {0} (expected .csv, .json or .txt)")]
    UnsupportedExportFormat(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// True for errors caused by what the user typed or selected,
    /// as opposed to failures of the environment (disk, encoding).
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownSymbol(_)
                | CoreError::InvalidQuantity(_)
                | CoreError::NothingSelected
                | CoreError::HoldingNotFound(_)
                | CoreError::UnsupportedExportFormat(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        // csv wraps the underlying io::Error; surface it as an I/O failure
        if e.is_io_error() {
            return CoreError::FileIO(e.to_string());
        }
        CoreError::Serialization(e.to_string())
    }
}
