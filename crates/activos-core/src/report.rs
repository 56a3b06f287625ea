use std::time::Instant;

use crate::depreciation::{compute_schedule, AssetSummary, TargetPeriod};
use crate::extract::AssetRecord;
use crate::normalize::{parse_currency_cell, parse_date_cell};
use crate::tables::asset_sheet;
use crate::types::*;
use crate::workbook::{resolve_sheet_names, Cell, OutputWorkbook, Sheet, SheetNamePolicy};
use crate::DepreResult;

/// Fixed name of the summary sheet.
pub const SUMMARY_SHEET_NAME: &str = "Resumen";

pub const COVER_SHEET_WIDTHS: [f64; 9] =
    [10.0, 15.0, 94.0, 32.0, 18.0, 14.0, 15.0, 21.0, 21.0];
pub const SUMMARY_SHEET_WIDTHS: [f64; 3] = [15.0, 22.0, 22.0];

/// Columns of the master sheet retyped on the cover. D and E carry currency
/// amounts, F the purchase date; everything else passes through as text.
const COVER_CURRENCY_COLUMNS: [usize; 2] = [3, 4];
const COVER_DATE_COLUMN: usize = 5;
const COVER_COLUMN_COUNT: usize = 8;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Transcribe the master sheet into the cover sheet, retyping the known
/// currency and date columns. Unparsable currency cells render as zero here;
/// the cover is a presentation copy, gating already happened at extraction.
pub fn cover_sheet(master_name: &str, rows: &[Vec<RawCell>]) -> DepreResult<Sheet> {
    let mut sheet = Sheet::new(master_name, COVER_SHEET_WIDTHS.to_vec())?;

    for (index, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(COVER_COLUMN_COUNT);

        for col in 0..COVER_COLUMN_COUNT {
            let raw = row.get(col).unwrap_or(&EMPTY_CELL);

            if index == 0 {
                cells.push(Cell::text(raw.display()));
            } else if COVER_CURRENCY_COLUMNS.contains(&col) {
                let value = parse_currency_cell(raw).unwrap_or(Money::ZERO);
                cells.push(Cell::currency(value));
            } else if col == COVER_DATE_COLUMN {
                let text = parse_date_cell(raw).unwrap_or_default();
                cells.push(Cell::text(text));
            } else {
                cells.push(Cell::text(raw.display()));
            }
        }

        sheet.push_row(cells);
    }

    Ok(sheet)
}

/// The "Resumen" sheet: header row plus one row per asset.
pub fn summary_sheet(summaries: &[AssetSummary]) -> DepreResult<Sheet> {
    let mut sheet = Sheet::new(SUMMARY_SHEET_NAME, SUMMARY_SHEET_WIDTHS.to_vec())?;
    sheet.push_row(vec![
        Cell::text("Matricula"),
        Cell::text("Depreciación Acumulada"),
        Cell::text("Valor neto en libros"),
    ]);

    for summary in summaries {
        sheet.push_row(vec![
            Cell::text(summary.identifier.clone()),
            Cell::currency(summary.accumulated_depreciation),
            Cell::currency(summary.book_value),
        ]);
    }

    Ok(sheet)
}

/// Assemble the full output workbook: cover sheet under the master sheet's
/// own name, "Resumen", then one sheet per asset in extraction order.
pub fn build_workbook(
    master_name: &str,
    master_rows: &[Vec<RawCell>],
    assets: &[AssetRecord],
    target: &TargetPeriod,
    name_policy: SheetNamePolicy,
) -> DepreResult<ComputationOutput<OutputWorkbook>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let identifiers: Vec<String> = assets.iter().map(|a| a.identifier.clone()).collect();
    let sheet_names =
        resolve_sheet_names(&identifiers, &[master_name, SUMMARY_SHEET_NAME], name_policy)?;
    for (identifier, name) in identifiers.iter().zip(&sheet_names) {
        if identifier != name {
            warnings.push(format!(
                "Duplicate identifier '{identifier}': sheet renamed to '{name}'"
            ));
        }
    }

    let mut sheets = Vec::with_capacity(assets.len() + 2);
    sheets.push(cover_sheet(master_name, master_rows)?);

    let mut summaries = Vec::with_capacity(assets.len());
    let mut asset_sheets = Vec::with_capacity(assets.len());
    for (asset, name) in assets.iter().zip(&sheet_names) {
        let schedule = compute_schedule(asset, target)?;
        summaries.push(AssetSummary {
            identifier: schedule.identifier.clone(),
            accumulated_depreciation: schedule.accumulated_depreciation,
            book_value: schedule.book_value,
        });
        asset_sheets.push(asset_sheet(asset, &schedule, name)?);
    }

    sheets.push(summary_sheet(&summaries)?);
    sheets.extend(asset_sheets);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Straight-Line Depreciation Workbook",
        &serde_json::json!({
            "master_sheet": master_name,
            "assets": assets.len(),
            "target_month": target.month(),
            "target_year": target.year(),
            "salvage_rate": "0.10",
            "useful_life_months": crate::depreciation::USEFUL_LIFE_MONTHS,
        }),
        warnings,
        elapsed,
        OutputWorkbook { sheets },
    ))
}

/// Suggested output file name: `<originalBaseName>-resultado.xlsx`.
pub fn output_file_name(input_name: &str) -> String {
    let base = match input_name.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() => base,
        _ => input_name,
    };
    format!("{base}-resultado.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_assets, ColumnMapping, CurrencyPolicy};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    fn master_rows() -> Vec<Vec<RawCell>> {
        vec![
            vec![
                text("No."),
                text("Matricula"),
                text("Dirección"),
                text("Avalúo"),
                text("Valor"),
                text("Fecha"),
                text("Zona"),
                text("Notas"),
            ],
            vec![
                text("1"),
                text("A1"),
                text("Main St"),
                text("$12,000.00"),
                text("$10,000.00"),
                text("01-01-2020"),
                text("Norte"),
                text(""),
            ],
        ]
    }

    fn extracted() -> Vec<AssetRecord> {
        extract_assets(
            "Hoja1",
            &master_rows(),
            &ColumnMapping::default(),
            CurrencyPolicy::default(),
        )
        .unwrap()
        .result
    }

    #[test]
    fn test_cover_sheet_retypes_known_columns() {
        let sheet = cover_sheet("Hoja1", &master_rows()).unwrap();

        assert_eq!(sheet.name, "Hoja1");
        assert_eq!(sheet.rows.len(), 2);
        // Header row is all text, including the currency columns.
        assert_eq!(sheet.rows[0][3], Cell::text("Avalúo"));
        // Data row: D and E currency-typed, F canonical date, rest text.
        assert_eq!(sheet.rows[1][3], Cell::currency(dec!(12000)));
        assert_eq!(sheet.rows[1][4], Cell::currency(dec!(10000)));
        assert_eq!(sheet.rows[1][5], Cell::text("01-01-2020"));
        assert_eq!(sheet.rows[1][6], Cell::text("Norte"));
    }

    #[test]
    fn test_cover_sheet_unparsable_currency_renders_zero() {
        let mut rows = master_rows();
        rows[1][3] = text("pendiente");
        let sheet = cover_sheet("Hoja1", &rows).unwrap();
        assert_eq!(sheet.rows[1][3], Cell::currency(Money::ZERO));
    }

    #[test]
    fn test_summary_sheet_layout() {
        let summaries = vec![AssetSummary {
            identifier: "A1".into(),
            accumulated_depreciation: dec!(450),
            book_value: dec!(9550),
        }];
        let sheet = summary_sheet(&summaries).unwrap();

        assert_eq!(sheet.name, "Resumen");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], Cell::text("Matricula"));
        assert_eq!(sheet.rows[1][1], Cell::currency(dec!(450)));
        assert_eq!(sheet.rows[1][2], Cell::currency(dec!(9550)));
        assert_eq!(sheet.column_widths, SUMMARY_SHEET_WIDTHS.to_vec());
    }

    #[test]
    fn test_build_workbook_sheet_order_and_names() {
        let assets = extracted();
        let target = TargetPeriod::new(1, 2021).unwrap();
        let out = build_workbook(
            "Hoja1",
            &master_rows(),
            &assets,
            &target,
            SheetNamePolicy::default(),
        )
        .unwrap();

        assert_eq!(out.result.sheet_names(), vec!["Hoja1", "Resumen", "A1"]);
        assert!(out.warnings.is_empty());

        // Summary row reflects the engine's known-answer figures.
        let summary = &out.result.sheets[1];
        assert_eq!(summary.rows[1][1], Cell::currency(dec!(450)));
        assert_eq!(summary.rows[1][2], Cell::currency(dec!(9550)));
    }

    #[test]
    fn test_build_workbook_renames_duplicates_with_warning() {
        let mut assets = extracted();
        let mut duplicate = assets[0].clone();
        duplicate.identifier = "A1".into();
        assets.push(duplicate);

        let target = TargetPeriod::new(1, 2021).unwrap();
        let out = build_workbook(
            "Hoja1",
            &master_rows(),
            &assets,
            &target,
            SheetNamePolicy::AutoSuffix,
        )
        .unwrap();

        assert_eq!(
            out.result.sheet_names(),
            vec!["Hoja1", "Resumen", "A1", "A1 (2)"]
        );
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("activos.xlsx"), "activos-resultado.xlsx");
        assert_eq!(
            output_file_name("activos 2024.xlsx"),
            "activos 2024-resultado.xlsx"
        );
        assert_eq!(
            output_file_name("archivo.v2.xlsx"),
            "archivo.v2-resultado.xlsx"
        );
        assert_eq!(output_file_name("sinextension"), "sinextension-resultado.xlsx");
    }
}
