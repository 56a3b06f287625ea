use activos_core::depreciation::TargetPeriod;
use activos_core::extract::{extract_assets, ColumnMapping, CurrencyPolicy};
use activos_core::report::{build_workbook, output_file_name};
use activos_core::tables::FIRST_SCHEDULE_ROW;
use activos_core::types::RawCell;
use activos_core::workbook::{Cell, SheetNamePolicy};
use rust_decimal_macros::dec;

// ===========================================================================
// Full workbook assembly
// ===========================================================================

fn text(s: &str) -> RawCell {
    RawCell::Text(s.to_string())
}

fn asset_row(n: u32, id: &str, value: &str, date: &str) -> Vec<RawCell> {
    vec![
        text(&n.to_string()),
        text(id),
        text("Calle Falsa 123"),
        text("$1.00"),
        text(value),
        text(date),
    ]
}

fn master_rows(ids: &[&str]) -> Vec<Vec<RawCell>> {
    let mut rows = vec![vec![
        text("No."),
        text("Matricula"),
        text("Dirección"),
        text("Avalúo"),
        text("Valor"),
        text("Fecha"),
    ]];
    for (i, id) in ids.iter().enumerate() {
        rows.push(asset_row(i as u32 + 1, id, "$10,000.00", "01-01-2020"));
    }
    rows
}

fn build(ids: &[&str]) -> activos_core::types::ComputationOutput<activos_core::workbook::OutputWorkbook> {
    let rows = master_rows(ids);
    let assets = extract_assets(
        "Hoja1",
        &rows,
        &ColumnMapping::default(),
        CurrencyPolicy::default(),
    )
    .unwrap()
    .result;
    let target = TargetPeriod::new(1, 2021).unwrap();
    build_workbook(
        "Hoja1",
        &rows,
        &assets,
        &target,
        SheetNamePolicy::default(),
    )
    .unwrap()
}

#[test]
fn test_n_assets_produce_n_plus_two_sheets_in_order() {
    for ids in [vec!["A1"], vec!["A1", "B2", "C3"]] {
        let out = build(&ids);
        assert_eq!(out.result.sheets.len(), ids.len() + 2);

        let names = out.result.sheet_names();
        assert_eq!(names[0], "Hoja1");
        assert_eq!(names[1], "Resumen");
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(&names[i + 2], id);
        }
    }
}

#[test]
fn test_metadata_formulas_reference_master_rows() {
    let out = build(&["A1", "B2"]);

    // First asset came from spreadsheet row 2, second from row 3.
    let first = &out.result.sheets[2];
    assert_eq!(first.rows[0][1], Cell::formula("='Hoja1'!B2"));
    assert_eq!(first.rows[3][1], Cell::currency_formula("='Hoja1'!E2"));

    let second = &out.result.sheets[3];
    assert_eq!(second.rows[0][1], Cell::formula("='Hoja1'!B3"));
    assert_eq!(second.rows[2][1], Cell::formula("='Hoja1'!F3"));
}

#[test]
fn test_schedule_ladder_is_recomputable() {
    let out = build(&["A1"]);
    let asset = &out.result.sheets[2];

    // 12 elapsed months: metadata (7) + headers (3) + 12 data rows.
    assert_eq!(asset.rows.len(), 22);

    // Every data row charges SLN over the metadata cells and chains the
    // accumulated column through its own workbook row.
    for i in 0..12 {
        let row = &asset.rows[FIRST_SCHEDULE_ROW - 1 + i];
        let wb_row = FIRST_SCHEDULE_ROW + i;
        assert_eq!(row[1], Cell::currency_formula("=SLN($B$4,$B$5,$B$7)"));
        assert_eq!(
            row[2],
            Cell::currency_formula(format!("=B{wb_row}*({})", i + 1))
        );
        assert_eq!(
            row[3],
            Cell::currency_formula(format!("=$B$4-C{wb_row}"))
        );
    }
}

#[test]
fn test_summary_sheet_one_row_per_asset() {
    let out = build(&["A1", "B2", "C3"]);
    let summary = &out.result.sheets[1];

    assert_eq!(summary.rows.len(), 4);
    for (i, id) in ["A1", "B2", "C3"].iter().enumerate() {
        assert_eq!(summary.rows[i + 1][0], Cell::text(*id));
        assert_eq!(summary.rows[i + 1][1], Cell::currency(dec!(450)));
        assert_eq!(summary.rows[i + 1][2], Cell::currency(dec!(9550)));
    }
}

#[test]
fn test_duplicate_identifiers_auto_suffix() {
    let out = build(&["A1", "A1"]);
    let names = out.result.sheet_names();
    assert_eq!(names, vec!["Hoja1", "Resumen", "A1", "A1 (2)"]);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_cover_sheet_is_reformatted_copy() {
    let out = build(&["A1"]);
    let cover = &out.result.sheets[0];

    assert_eq!(cover.rows.len(), 2);
    assert_eq!(cover.rows[0][1], Cell::text("Matricula"));
    assert_eq!(cover.rows[1][4], Cell::currency(dec!(10000)));
}

#[test]
fn test_suggested_output_name() {
    assert_eq!(
        output_file_name("inventario.xlsx"),
        "inventario-resultado.xlsx"
    );
}
