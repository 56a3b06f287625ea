use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::xlsx;

/// Arguments for listing the sheets of a workbook
#[derive(Args)]
pub struct SheetsArgs {
    /// Path to the Excel file
    pub file: PathBuf,
}

pub fn run_sheets(args: SheetsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let names = xlsx::read::sheet_names(&args.file)?;
    Ok(serde_json::json!({
        "result": {
            "file": args.file.display().to_string(),
            "sheets": names,
        },
    }))
}
