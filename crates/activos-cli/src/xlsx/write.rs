use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Formula, Workbook};
use std::path::Path;

use activos_core::workbook::{Cell, DateFormat, NumberFormat, OutputWorkbook};

fn number_format(format: &NumberFormat) -> Format {
    Format::new().set_num_format(format.code())
}

fn date_format(format: &DateFormat) -> Format {
    Format::new().set_num_format(format.code())
}

/// Serialise the assembled workbook to an xlsx file. Formula cells are
/// stored as live formulas so the schedules recalculate on open.
pub fn write_workbook(
    output: &OutputWorkbook,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();

    for sheet in &output.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text { text } => {
                        if !text.is_empty() {
                            worksheet.write_string(r, c, text)?;
                        }
                    }
                    Cell::Number { value, format } => {
                        let number = value.to_f64().unwrap_or(0.0);
                        match format {
                            Some(f) => {
                                worksheet.write_number_with_format(r, c, number, &number_format(f))?
                            }
                            None => worksheet.write_number(r, c, number)?,
                        };
                    }
                    Cell::Date { value, format } => {
                        worksheet.write_datetime_with_format(r, c, *value, &date_format(format))?;
                    }
                    Cell::Formula { expr, format } => {
                        let formula = Formula::new(expr.as_str());
                        match format {
                            Some(f) => {
                                worksheet.write_formula_with_format(r, c, formula, &number_format(f))?
                            }
                            None => worksheet.write_formula(r, c, formula)?,
                        };
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx::read;
    use activos_core::workbook::Sheet;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_written_workbook_reads_back() {
        let mut sheet = Sheet::new("Resumen", vec![15.0, 22.0]).unwrap();
        sheet.push_row(vec![Cell::text("Matricula"), Cell::text("Valor")]);
        sheet.push_row(vec![Cell::text("A1"), Cell::currency(dec!(9550))]);

        let mut asset = Sheet::new("A1", vec![25.0, 60.0]).unwrap();
        asset.push_row(vec![
            Cell::date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            Cell::currency_formula("=SLN($B$4,$B$5,$B$7)"),
        ]);

        let workbook = OutputWorkbook {
            sheets: vec![sheet, asset],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salida.xlsx");
        write_workbook(&workbook, &path).unwrap();

        let names = read::sheet_names(&path).unwrap();
        assert_eq!(names, vec!["Resumen", "A1"]);

        let rows = read::read_rows(&path, "Resumen").unwrap();
        assert_eq!(rows[1][0], activos_core::types::RawCell::Text("A1".into()));
        assert_eq!(
            rows[1][1],
            activos_core::types::RawCell::Number(dec!(9550))
        );
    }
}
