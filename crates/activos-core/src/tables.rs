use crate::depreciation::{DepreciationSchedule, USEFUL_LIFE_MONTHS, USEFUL_LIFE_YEARS};
use crate::extract::AssetRecord;
use crate::workbook::{Cell, Sheet};
use crate::DepreResult;

/// Rows of the per-asset metadata block.
pub const METADATA_ROWS: usize = 7;
/// Title row, blank spacer, column headers.
pub const SCHEDULE_HEADER_ROWS: usize = 3;
/// 1-based workbook row of the first schedule data row. The schedule's
/// formulas address cells by this offset, so it must track the physical
/// layout of the two stacked tables exactly.
pub const FIRST_SCHEDULE_ROW: usize = METADATA_ROWS + SCHEDULE_HEADER_ROWS + 1;

/// Column widths of every generated asset sheet.
pub const ASSET_SHEET_WIDTHS: [f64; 4] = [25.0, 60.0, 22.0, 22.0];

fn metadata_row(label: &str, value: Cell) -> Vec<Cell> {
    vec![Cell::text(label), value, Cell::empty(), Cell::empty()]
}

/// The 7-row metadata table of an asset sheet.
///
/// Identifier, address, date and cost are live references back to the master
/// sheet; the salvage value is derived locally from the referenced cost cell
/// (B4), and the useful-life rows are literal constants.
pub fn metadata_table(asset: &AssetRecord) -> Vec<Vec<Cell>> {
    vec![
        metadata_row("Matricula", Cell::formula(asset.identifier_ref.formula())),
        metadata_row("Dirección", Cell::formula(asset.address_ref.formula())),
        metadata_row("Fecha de compra", Cell::formula(asset.date_ref.formula())),
        metadata_row(
            "Valor del activo",
            Cell::currency_formula(asset.cost_ref.formula()),
        ),
        metadata_row("Valor residual", Cell::currency_formula("=B4*10%")),
        metadata_row("Vida útil (años)", Cell::number(USEFUL_LIFE_YEARS.into())),
        metadata_row("Vida útil (meses)", Cell::number(USEFUL_LIFE_MONTHS.into())),
    ]
}

/// The schedule table: title block plus one row per elapsed month.
///
/// Each data row is a self-consistent amortization step: the charge is
/// `SLN` over the metadata cells, the accumulated column multiplies the
/// charge by the row ordinal, and the book value subtracts it from the
/// referenced cost. Recalculating the workbook reproduces the engine's
/// figures.
pub fn schedule_table(schedule: &DepreciationSchedule) -> Vec<Vec<Cell>> {
    let mut rows = vec![
        vec![
            Cell::text("Depreciación por linea recta"),
            Cell::empty(),
            Cell::empty(),
            Cell::empty(),
        ],
        vec![Cell::empty(), Cell::empty(), Cell::empty(), Cell::empty()],
        vec![
            Cell::text("Fecha"),
            Cell::text("Cuota de depreciación"),
            Cell::text("Depreciación acumulada"),
            Cell::text("Valor neto en libros"),
        ],
    ];

    for (i, entry) in schedule.rows.iter().enumerate() {
        let workbook_row = FIRST_SCHEDULE_ROW + i;
        rows.push(vec![
            Cell::date(entry.period),
            Cell::currency_formula("=SLN($B$4,$B$5,$B$7)"),
            Cell::currency_formula(format!("=B{workbook_row}*({})", i + 1)),
            Cell::currency_formula(format!("=$B$4-C{workbook_row}")),
        ]);
    }

    rows
}

/// One full asset sheet: metadata table stacked on the schedule table.
pub fn asset_sheet(
    asset: &AssetRecord,
    schedule: &DepreciationSchedule,
    sheet_name: &str,
) -> DepreResult<Sheet> {
    let mut sheet = Sheet::new(sheet_name, ASSET_SHEET_WIDTHS.to_vec())?;
    for row in metadata_table(asset) {
        sheet.push_row(row);
    }
    for row in schedule_table(schedule) {
        sheet.push_row(row);
    }
    Ok(sheet)
}
