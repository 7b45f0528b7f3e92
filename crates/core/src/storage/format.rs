use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Extension appended when the user gives a path without one.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Width of the dashed separator lines in the text snapshot.
pub const TEXT_RULE_WIDTH: usize = 50;

/// Timestamp layout written into every export header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One of the three flat export layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Text];

    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "txt" => Ok(ExportFormat::Text),
            "" => Err(CoreError::UnsupportedExportFormat(
                "missing file extension".into(),
            )),
            other => Err(CoreError::UnsupportedExportFormat(format!(".{other}"))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Text => write!(f, "Text"),
        }
    }
}

/// Resolve a user-typed export path: trims whitespace and appends
/// `.csv` when no extension was given. Returns the path and its format.
pub fn resolve_path(raw: &str) -> Result<(PathBuf, ExportFormat), CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::UnsupportedExportFormat("empty file name".into()));
    }

    // "report." has an empty extension; treat it like none
    let bare = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let mut path = PathBuf::from(bare);
    if path.extension().map_or(true, |e| e.is_empty()) {
        path.set_extension(DEFAULT_EXTENSION);
    }

    let format = ExportFormat::from_path(&path)?;
    Ok((path, format))
}
