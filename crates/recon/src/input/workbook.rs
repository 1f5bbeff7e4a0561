//! Spreadsheet loader (XLSX, XLSM, XLSB, XLS, ODS).
//!
//! Reads the first worksheet: its first row is the header, every following
//! non-blank row is a record.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::dataset::Dataset;
use crate::error::{ReconError, Result};
use crate::value::CellValue;

use super::normalize_headers;

/// Parse workbook bytes into a dataset named `name`.
pub fn parse_workbook(name: &str, bytes: &[u8]) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ReconError::malformed(name, format!("cannot open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReconError::malformed(name, "workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::malformed(name, format!("cannot read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ReconError::malformed(name, "No header row found"))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_value(cell).to_string())
        .collect();

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|record| record.iter().any(|v| !v.is_null()))
        .collect();

    tracing::debug!(
        source = name,
        sheet = %sheet_name,
        columns = headers.len(),
        rows = records.len(),
        "loaded worksheet"
    );

    Dataset::from_records(name, normalize_headers(headers), records)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => from_excel_serial(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso(s),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Convert an Excel serial date (1900 date system) to a date or date-time.
///
/// Serials outside chrono's date range stay numbers.
fn from_excel_serial(serial: f64) -> CellValue {
    if !serial.is_finite() {
        return CellValue::Number(serial);
    }
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return CellValue::Number(serial);
    };

    // Round to whole seconds first so a fraction just under midnight rolls
    // into the next day. The cast saturates for huge serials.
    let total_seconds = (serial * 86_400.0).round() as i64;
    let days = total_seconds.div_euclid(86_400);
    let seconds = total_seconds.rem_euclid(86_400) as u32;

    let date = TimeDelta::try_days(days).and_then(|delta| epoch.checked_add_signed(delta));
    let Some(date) = date else {
        return CellValue::Number(serial);
    };

    if seconds == 0 {
        return CellValue::Date(date);
    }
    match NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
        Some(time) => CellValue::DateTime(date.and_time(time)),
        None => CellValue::Number(serial),
    }
}

fn parse_iso(s: &str) -> CellValue {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    CellValue::text(s)
}
