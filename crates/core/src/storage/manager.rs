use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::info;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::format::{self, ExportFormat};
use super::snapshot::ExportSnapshot;
use super::writers;

/// What a successful export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub rows: usize,
    pub total_value: f64,
}

/// High-level export operations: snapshot the portfolio and hand it to
/// the writer matching the requested format.
pub struct ExportManager;

impl ExportManager {
    /// Render a snapshot into memory.
    pub fn export_to_bytes(
        portfolio: &Portfolio,
        format: ExportFormat,
        timestamp: NaiveDateTime,
    ) -> Result<Vec<u8>, CoreError> {
        let snapshot = ExportSnapshot::from_portfolio(portfolio, timestamp);
        let mut buf = Vec::new();
        Self::write_snapshot(&mut buf, &snapshot, format)?;
        Ok(buf)
    }

    /// Write a snapshot to `path`, choosing the format from its extension.
    /// A path without an extension is written as `.csv`.
    pub fn export_to_file(
        portfolio: &Portfolio,
        path: &Path,
        timestamp: NaiveDateTime,
    ) -> Result<ExportReport, CoreError> {
        let raw = path.to_string_lossy();
        let (path, format) = format::resolve_path(&raw)?;
        let snapshot = ExportSnapshot::from_portfolio(portfolio, timestamp);

        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);
        Self::write_snapshot(&mut out, &snapshot, format)?;
        out.flush()?;

        info!(
            "Exported {} holdings ({}) to {}",
            snapshot.rows.len(),
            format,
            path.display()
        );

        Ok(ExportReport {
            path,
            format,
            rows: snapshot.rows.len(),
            total_value: snapshot.total_value,
        })
    }

    fn write_snapshot<W: Write>(
        out: &mut W,
        snapshot: &ExportSnapshot,
        format: ExportFormat,
    ) -> Result<(), CoreError> {
        match format {
            ExportFormat::Csv => writers::write_csv(out, snapshot),
            ExportFormat::Json => writers::write_json(out, snapshot),
            ExportFormat::Text => writers::write_text(out, snapshot),
        }
    }
}
