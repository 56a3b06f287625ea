use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// A single cell value as read from the input spreadsheet, before any
/// interpretation. The reading adapter produces these; core code never
/// touches the reader's own cell types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawCell {
    Empty,
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
    Bool(bool),
}

impl RawCell {
    /// True for cells that count as "no value" when gating a row.
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Plain-text rendering, used when a column passes through untyped.
    pub fn display(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => n.to_string(),
            RawCell::Date(d) => d.format("%d-%m-%Y").to_string(),
            RawCell::Bool(b) => b.to_string(),
        }
    }
}

/// A reference to one cell of a named sheet, 0-based column and row.
///
/// Renders in A1 style with the sheet quoted, e.g. `'Hoja 1'!B2`, so the
/// generated workbook links back to the master sheet instead of duplicating
/// its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub sheet: String,
    pub column: u32,
    pub row: u32,
}

impl CellRef {
    pub fn new(sheet: impl Into<String>, column: u32, row: u32) -> Self {
        Self {
            sheet: sheet.into(),
            column,
            row,
        }
    }

    /// Spreadsheet column letter: 0 => A, 1 => B, 26 => AA.
    pub fn column_letter(&self) -> String {
        let mut letters = Vec::new();
        let mut col = self.column;
        loop {
            letters.push(b'A' + (col % 26) as u8);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }

    /// Full A1-style address: `'<sheet>'!<Col><Row>`.
    pub fn address(&self) -> String {
        format!("'{}'!{}{}", self.sheet, self.column_letter(), self.row + 1)
    }

    /// The address as a live formula string.
    pub fn formula(&self) -> String {
        format!("={}", self.address())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(CellRef::new("s", 0, 0).column_letter(), "A");
        assert_eq!(CellRef::new("s", 1, 0).column_letter(), "B");
        assert_eq!(CellRef::new("s", 25, 0).column_letter(), "Z");
        assert_eq!(CellRef::new("s", 26, 0).column_letter(), "AA");
        assert_eq!(CellRef::new("s", 27, 0).column_letter(), "AB");
    }

    #[test]
    fn test_address_is_one_based_and_quoted() {
        let r = CellRef::new("Hoja 1", 1, 1);
        assert_eq!(r.address(), "'Hoja 1'!B2");
        assert_eq!(r.formula(), "='Hoja 1'!B2");
    }

    #[test]
    fn test_raw_cell_emptiness() {
        assert!(RawCell::Empty.is_empty());
        assert!(RawCell::Text("   ".into()).is_empty());
        assert!(!RawCell::Text("A1".into()).is_empty());
        assert!(!RawCell::Number(Decimal::ZERO).is_empty());
    }
}
