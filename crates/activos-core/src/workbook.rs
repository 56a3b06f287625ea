use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DepreError;
use crate::types::Money;
use crate::DepreResult;

/// Number display format carried by typed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    Currency,
}

impl NumberFormat {
    /// The spreadsheet format code the writer should apply.
    pub fn code(&self) -> &'static str {
        match self {
            NumberFormat::Currency => "$ #,##0.00",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    DayMonthYear,
}

impl DateFormat {
    pub fn code(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "dd/mm/yyyy",
        }
    }
}

/// One output cell: a literal, a typed value, or a live formula. The format
/// travels with the variant it applies to, so a date cell cannot carry a
/// currency format and plain text carries none at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Text {
        text: String,
    },
    Number {
        value: Money,
        format: Option<NumberFormat>,
    },
    Date {
        value: NaiveDate,
        format: DateFormat,
    },
    /// Expression starting with `=`; the writer must store it as a formula,
    /// not literal text, so the workbook recalculates when opened.
    Formula {
        expr: String,
        format: Option<NumberFormat>,
    },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into() }
    }

    pub fn empty() -> Self {
        Cell::Text {
            text: String::new(),
        }
    }

    pub fn number(value: Money) -> Self {
        Cell::Number {
            value,
            format: None,
        }
    }

    pub fn currency(value: Money) -> Self {
        Cell::Number {
            value,
            format: Some(NumberFormat::Currency),
        }
    }

    pub fn date(value: NaiveDate) -> Self {
        Cell::Date {
            value,
            format: DateFormat::DayMonthYear,
        }
    }

    pub fn formula(expr: impl Into<String>) -> Self {
        Cell::Formula {
            expr: expr.into(),
            format: None,
        }
    }

    pub fn currency_formula(expr: impl Into<String>) -> Self {
        Cell::Formula {
            expr: expr.into(),
            format: Some(NumberFormat::Currency),
        }
    }
}

/// Characters Excel forbids in sheet names.
const FORBIDDEN_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Validate a sheet name against the xlsx rules: non-empty, at most 31
/// characters, none of `[ ] : * ? / \`.
pub fn validate_sheet_name(name: &str) -> DepreResult<()> {
    if name.trim().is_empty() {
        return Err(DepreError::SheetName {
            name: name.to_string(),
            reason: "name is empty".into(),
        });
    }
    if name.chars().count() > 31 {
        return Err(DepreError::SheetName {
            name: name.to_string(),
            reason: "name exceeds 31 characters".into(),
        });
    }
    if let Some(bad) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(DepreError::SheetName {
            name: name.to_string(),
            reason: format!("character '{bad}' is not allowed"),
        });
    }
    Ok(())
}

/// One sheet of the output workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    pub column_widths: Vec<f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, column_widths: Vec<f64>) -> DepreResult<Self> {
        let name = name.into();
        validate_sheet_name(&name)?;
        Ok(Self {
            name,
            rows: Vec::new(),
            column_widths,
        })
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

/// The assembled output: cover sheet, summary sheet, then one sheet per
/// asset, in that fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputWorkbook {
    pub sheets: Vec<Sheet>,
}

impl OutputWorkbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Policy for asset identifiers that would collide as sheet names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetNamePolicy {
    /// Second "A1" becomes "A1 (2)", third "A1 (3)", and so on (default).
    #[default]
    AutoSuffix,
    /// Fail on the first duplicate.
    Reject,
}

/// Turn asset identifiers into unique, valid sheet names.
///
/// `reserved` holds names already claimed by fixed sheets (the cover and the
/// summary); an identifier colliding with one is treated like a duplicate.
/// Comparison is case-insensitive because spreadsheet sheet names are.
pub fn resolve_sheet_names(
    identifiers: &[String],
    reserved: &[&str],
    policy: SheetNamePolicy,
) -> DepreResult<Vec<String>> {
    let mut taken: HashSet<String> = reserved.iter().map(|r| r.to_lowercase()).collect();
    let mut resolved = Vec::with_capacity(identifiers.len());

    for identifier in identifiers {
        validate_sheet_name(identifier)?;

        let mut candidate = identifier.clone();
        if taken.contains(&candidate.to_lowercase()) {
            if policy == SheetNamePolicy::Reject {
                return Err(DepreError::DuplicateIdentifier(identifier.clone()));
            }
            let mut n = 2u32;
            loop {
                candidate = format!("{identifier} ({n})");
                if !taken.contains(&candidate.to_lowercase()) {
                    break;
                }
                n += 1;
            }
            validate_sheet_name(&candidate)?;
        }

        taken.insert(candidate.to_lowercase());
        resolved.push(candidate);
    }

    Ok(resolved)
}
