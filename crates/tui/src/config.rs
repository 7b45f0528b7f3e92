use std::env;
use std::path::PathBuf;

/// Prefilled path in the export prompt.
pub const EXPORT_PATH_VAR: &str = "STOCK_PORTFOLIO_EXPORT_PATH";
/// Ask before remove / clear / quit-with-changes.
pub const CONFIRM_VAR: &str = "STOCK_PORTFOLIO_CONFIRM";
/// File that receives log records while the window is open.
pub const LOG_FILE_VAR: &str = "STOCK_PORTFOLIO_LOG_FILE";

pub const DEFAULT_EXPORT_PATH: &str = "portfolio.csv";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub export_path: String,
    pub confirm_destructive: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_path: DEFAULT_EXPORT_PATH.to_string(),
            confirm_destructive: true,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source; unset or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            export_path: lookup(EXPORT_PATH_VAR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.export_path),
            confirm_destructive: lookup(CONFIRM_VAR)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.confirm_destructive),
            log_file: lookup(LOG_FILE_VAR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
