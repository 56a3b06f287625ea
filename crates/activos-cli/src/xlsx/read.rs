use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

use activos_core::types::RawCell;

const SPREADSHEET_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

/// Reject anything that is not an Excel file before calamine touches it.
pub fn validate_spreadsheet_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "'{}' is not an Excel file (expected .xlsx, .xlsm or .xls)",
            path.display()
        )
        .into());
    }
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}

/// Sheet names of the workbook, in file order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    validate_spreadsheet_path(path)?;
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read every row of a named sheet as boundary cells.
pub fn read_rows(
    path: &Path,
    sheet: &str,
) -> Result<Vec<Vec<RawCell>>, Box<dyn std::error::Error>> {
    validate_spreadsheet_path(path)?;
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| format!("Cannot read sheet '{sheet}': {e}"))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(to_raw_cell).collect())
        .collect())
}

fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => Decimal::from_f64(*f)
            .map(RawCell::Number)
            .unwrap_or_else(|| RawCell::Text(f.to_string())),
        Data::Int(i) => RawCell::Number(Decimal::from(*i)),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| RawCell::Date(ndt.date()))
            .unwrap_or(RawCell::Empty),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Empty,
    }
}
