use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::normalize::{parse_currency_cell, parse_date_cell};
use crate::types::*;
use crate::DepreResult;

/// Which 0-based columns of the master sheet hold each asset field.
///
/// The default reproduces the legacy layout: identifier in B, address in C,
/// cost in E, purchase date in F. Alternate layouts only need a different
/// mapping, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub identifier: usize,
    pub address: usize,
    pub cost: usize,
    pub purchase_date: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            identifier: 1,
            address: 2,
            cost: 4,
            purchase_date: 5,
        }
    }
}

/// Policy for cost cells that fail currency parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPolicy {
    /// Drop the row and record a warning (default).
    #[default]
    SkipAsset,
    /// Keep the row with a cost of zero, recording a warning.
    TreatAsZero,
    /// Abort the extraction with the parse error.
    Fail,
}

/// One asset row of the master sheet in normalised form.
///
/// The four cell references point back at the original row so generated
/// sheets can link to the master sheet instead of copying its values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub identifier: String,
    pub address: String,
    pub cost: Money,
    /// Canonical `DD-MM-YYYY` purchase date.
    pub purchase_date: String,
    pub identifier_ref: CellRef,
    pub address_ref: CellRef,
    pub cost_ref: CellRef,
    pub date_ref: CellRef,
}

static EMPTY_CELL: RawCell = RawCell::Empty;

fn cell_at<'a>(row: &'a [RawCell], index: usize) -> &'a RawCell {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

/// Map the raw rows of the chosen master sheet into asset records.
///
/// Row 0 is always the header and is skipped. Rows whose identifier cell is
/// empty are dropped silently; that is policy, not an error. Rows whose cost
/// cell cannot be parsed are handled per `policy`. Output order follows input
/// order, which later fixes the order of the generated sheets.
pub fn extract_assets(
    master_sheet: &str,
    rows: &[Vec<RawCell>],
    mapping: &ColumnMapping,
    policy: CurrencyPolicy,
) -> DepreResult<ComputationOutput<Vec<AssetRecord>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if index == 0 {
            continue; // header
        }

        let identifier_cell = cell_at(row, mapping.identifier);
        if identifier_cell.is_empty() {
            continue;
        }
        let identifier = identifier_cell.display().trim().to_string();
        let address = cell_at(row, mapping.address).display();

        let cost = match parse_currency_cell(cell_at(row, mapping.cost)) {
            Ok(value) => value,
            Err(e) => match policy {
                CurrencyPolicy::SkipAsset => {
                    warnings.push(format!(
                        "Row {}: asset '{identifier}' skipped ({e})",
                        index + 1
                    ));
                    continue;
                }
                CurrencyPolicy::TreatAsZero => {
                    warnings.push(format!(
                        "Row {}: asset '{identifier}' cost treated as zero ({e})",
                        index + 1
                    ));
                    Money::ZERO
                }
                CurrencyPolicy::Fail => return Err(e),
            },
        };

        let purchase_date = match parse_date_cell(cell_at(row, mapping.purchase_date)) {
            Ok(value) => value,
            Err(e) => {
                warnings.push(format!(
                    "Row {}: asset '{identifier}' skipped ({e})",
                    index + 1
                ));
                continue;
            }
        };

        let row_index = index as u32;
        records.push(AssetRecord {
            identifier,
            address,
            cost,
            purchase_date,
            identifier_ref: CellRef::new(master_sheet, mapping.identifier as u32, row_index),
            address_ref: CellRef::new(master_sheet, mapping.address as u32, row_index),
            cost_ref: CellRef::new(master_sheet, mapping.cost as u32, row_index),
            date_ref: CellRef::new(master_sheet, mapping.purchase_date as u32, row_index),
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Asset Record Extraction",
        &serde_json::json!({
            "master_sheet": master_sheet,
            "input_rows": rows.len(),
            "mapping": mapping,
            "currency_policy": policy,
        }),
        warnings,
        elapsed,
        records,
    ))
}
