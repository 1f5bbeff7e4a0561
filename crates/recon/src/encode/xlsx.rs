//! Multi-sheet XLSX layout.
//!
//! `Summary` holds a `Metric | Value` table. Each detail sheet starts with
//! four metadata lines in column A, followed by the row table whose header
//! sits on row 5.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::Result;
use crate::report::{DetailSection, MetricValue, ReportModel};
use crate::value::CellValue;

use super::ReportEncoder;

/// Zero-based row of the detail table header.
pub const DETAIL_HEADER_ROW: u32 = 4;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Default, Clone)]
pub struct XlsxEncoder;

impl XlsxEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReportEncoder for XlsxEncoder {
    fn encode(&self, report: &ReportModel) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let styles = Styles::new();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Summary")?;
            write_summary(sheet, report, &styles)?;
        }

        for section in report.sections() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(section.title())?;
            write_detail(sheet, section, &styles)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

struct Styles {
    header: Format,
    date: Format,
    datetime: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

fn write_summary(sheet: &mut Worksheet, report: &ReportModel, styles: &Styles) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Metric", &styles.header)?;
    sheet.write_string_with_format(0, 1, "Value", &styles.header)?;

    for (idx, metric) in report.summary.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &metric.name)?;
        match &metric.value {
            MetricValue::Text(s) => sheet.write_string(row, 1, s)?,
            MetricValue::Count(n) => sheet.write_number(row, 1, *n as f64)?,
        };
    }

    sheet.set_column_width(0, 22)?;
    sheet.set_column_width(1, 30)?;
    Ok(())
}

fn write_detail(sheet: &mut Worksheet, section: &DetailSection, styles: &Styles) -> Result<()> {
    for (idx, entry) in section.metadata.iter().enumerate() {
        sheet.write_string(idx as u32, 0, entry.to_string())?;
    }

    for (col, name) in section.columns.iter().enumerate() {
        sheet.write_string_with_format(DETAIL_HEADER_ROW, col as u16, name, &styles.header)?;
    }

    for (idx, row) in section.rows.iter().enumerate() {
        let row_num = DETAIL_HEADER_ROW + 1 + idx as u32;
        for (col, name) in section.columns.iter().enumerate() {
            if let Some(value) = row.get(name) {
                write_cell(sheet, row_num, col as u16, value, styles)?;
            }
        }
    }

    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    styles: &Styles,
) -> Result<()> {
    match value {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::Number(n) if n.is_finite() => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Number(n) => {
            sheet.write_string(row, col, n.to_string())?;
        }
        CellValue::Date(d) => {
            sheet.write_number_with_format(row, col, date_serial(*d), &styles.date)?;
        }
        CellValue::DateTime(dt) => {
            sheet.write_number_with_format(row, col, datetime_serial(*dt), &styles.datetime)?;
        }
        CellValue::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Excel serial day number (1900 date system) of a date.
fn date_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (date - epoch).num_days() as f64
}

fn datetime_serial(dt: NaiveDateTime) -> f64 {
    date_serial(dt.date()) + dt.num_seconds_from_midnight() as f64 / 86_400.0
}
