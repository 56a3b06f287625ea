use activos_core::depreciation::{compute_schedule, summarize, TargetPeriod};
use activos_core::extract::{extract_assets, ColumnMapping, CurrencyPolicy};
use activos_core::types::RawCell;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Extraction + engine, end to end on raw rows
// ===========================================================================

fn text(s: &str) -> RawCell {
    RawCell::Text(s.to_string())
}

fn single_asset_rows() -> Vec<Vec<RawCell>> {
    vec![
        vec![
            text("No."),
            text("Matricula"),
            text("Dirección"),
            text("Avalúo"),
            text("Valor"),
            text("Fecha"),
        ],
        vec![
            text("1"),
            text("A1"),
            text("Main St"),
            text("$12,000.00"),
            text("$10,000.00"),
            text("01-01-2020"),
        ],
    ]
}

#[test]
fn test_spec_worked_example() {
    // One header row, one data row, target 2021-01: 12 elapsed months,
    // monthly 9,000/240 = 37.5, accumulated 450, book value 9,550.
    let assets = extract_assets(
        "Hoja1",
        &single_asset_rows(),
        &ColumnMapping::default(),
        CurrencyPolicy::default(),
    )
    .unwrap()
    .result;
    assert_eq!(assets.len(), 1);

    let target = TargetPeriod::new(1, 2021).unwrap();
    let schedule = compute_schedule(&assets[0], &target).unwrap();

    assert_eq!(schedule.months_elapsed, 12);
    assert_eq!(schedule.monthly_depreciation, dec!(37.5));
    assert_eq!(schedule.accumulated_depreciation, dec!(450));
    assert_eq!(schedule.book_value, dec!(9550));
}

#[test]
fn test_book_value_plus_accumulated_equals_cost_everywhere() {
    let assets = extract_assets(
        "Hoja1",
        &single_asset_rows(),
        &ColumnMapping::default(),
        CurrencyPolicy::default(),
    )
    .unwrap()
    .result;

    for (month, year) in [(1, 2021), (7, 2023), (12, 2039), (6, 2019)] {
        let target = TargetPeriod::new(month, year).unwrap();
        let schedule = compute_schedule(&assets[0], &target).unwrap();

        assert_eq!(
            schedule.book_value + schedule.accumulated_depreciation,
            schedule.cost
        );
        for row in &schedule.rows {
            assert_eq!(row.book_value + row.accumulated, schedule.cost);
        }
        assert_eq!(schedule.rows.len(), schedule.months_elapsed as usize);
    }
}

#[test]
fn test_schedule_row_ordinals() {
    let assets = extract_assets(
        "Hoja1",
        &single_asset_rows(),
        &ColumnMapping::default(),
        CurrencyPolicy::default(),
    )
    .unwrap()
    .result;
    let target = TargetPeriod::new(1, 2022).unwrap();
    let schedule = compute_schedule(&assets[0], &target).unwrap();

    assert_eq!(schedule.rows.len(), 24);
    for (i, row) in schedule.rows.iter().enumerate() {
        let n = Decimal::from(i as u32 + 1);
        assert_eq!(row.accumulated, schedule.monthly_depreciation * n);
    }
}

#[test]
fn test_zero_elapsed_summary() {
    let assets = extract_assets(
        "Hoja1",
        &single_asset_rows(),
        &ColumnMapping::default(),
        CurrencyPolicy::default(),
    )
    .unwrap()
    .result;

    // Target well before the 2020 purchase.
    let target = TargetPeriod::new(6, 2015).unwrap();
    let summary = summarize(&assets[0], &target).unwrap();

    assert_eq!(summary.accumulated_depreciation, Decimal::ZERO);
    assert_eq!(summary.book_value, dec!(10000));
}
