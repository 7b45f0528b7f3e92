use std::io::Write;

use serde::Serialize;

use crate::errors::CoreError;
use crate::format::format_money;

use super::format::TEXT_RULE_WIDTH;
use super::snapshot::{ExportRow, ExportSnapshot};

/// Write the CSV snapshot.
///
/// Layout:
/// ```text
/// Stock Portfolio,Generated on,<timestamp>
/// Symbol,Company,Shares,Price,Value,Trend
/// <one row per holding>
///
/// Total Portfolio Value:,<total>
/// ```
pub fn write_csv<W: Write>(out: &mut W, snapshot: &ExportSnapshot) -> Result<(), CoreError> {
    {
        // Records have different widths (3, 6 and 2 fields)
        let timestamp = snapshot.timestamp_label();
        let mut wtr = csv_writer(&mut *out);
        wtr.write_record(["Stock Portfolio", "Generated on", timestamp.as_str()])?;
        wtr.write_record(["Symbol", "Company", "Shares", "Price", "Value", "Trend"])?;
        for row in &snapshot.rows {
            let quantity = row.quantity.to_string();
            let price = format_money(row.price);
            let value = format_money(row.value);
            wtr.write_record([
                row.symbol.as_str(),
                row.company.as_str(),
                quantity.as_str(),
                price.as_str(),
                value.as_str(),
                row.trend.arrow(),
            ])?;
        }
        wtr.flush()?;
    }

    // csv writes an empty record as `""`, so the blank separator goes in raw
    out.write_all(b"\n")?;

    let total = format_money(snapshot.total_value);
    let mut wtr = csv_writer(&mut *out);
    wtr.write_record(["Total Portfolio Value:", total.as_str()])?;
    wtr.flush()?;
    Ok(())
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    portfolio: &'a [ExportRow],
    total_value: f64,
    timestamp: String,
}

/// Write the JSON snapshot: `{ "portfolio": [...], "total_value": n, "timestamp": "..." }`.
pub fn write_json<W: Write>(out: &mut W, snapshot: &ExportSnapshot) -> Result<(), CoreError> {
    let doc = JsonDocument {
        portfolio: &snapshot.rows,
        total_value: snapshot.total_value,
        timestamp: snapshot.timestamp_label(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Write the plain-text snapshot: one block of `Field: value` lines per
/// holding, separated by dashed rules, followed by the total.
pub fn write_text<W: Write>(out: &mut W, snapshot: &ExportSnapshot) -> Result<(), CoreError> {
    let rule = "-".repeat(TEXT_RULE_WIDTH);

    writeln!(out, "Stock Portfolio Snapshot")?;
    writeln!(out, "Generated on: {}", snapshot.timestamp_label())?;
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    for row in &snapshot.rows {
        writeln!(out, "Symbol: {}", row.symbol)?;
        writeln!(out, "Company: {}", row.company)?;
        writeln!(out, "Shares: {}", row.quantity)?;
        writeln!(out, "Price: {}", format_money(row.price))?;
        writeln!(out, "Value: {}", format_money(row.value))?;
        writeln!(out, "Trend: {}", row.trend.arrow())?;
        writeln!(out, "{rule}")?;
    }
    writeln!(out)?;
    writeln!(out, "Total Portfolio Value: {}", format_money(snapshot.total_value))?;
    Ok(())
}
