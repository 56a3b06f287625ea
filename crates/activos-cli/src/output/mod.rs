pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Render a command's envelope in the chosen output format.
pub fn render(format: &OutputFormat, envelope: &Value) {
    match format {
        OutputFormat::Json => json::print_json(envelope),
        OutputFormat::Table => table::print_table(envelope),
        OutputFormat::Csv => csv_out::print_csv(envelope),
        OutputFormat::Minimal => minimal::print_minimal(envelope),
    }
}

/// The `result` payload of an envelope, or the value itself for commands
/// that emit a bare object (`sheets` does).
pub(crate) fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}
