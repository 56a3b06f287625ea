use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;

use activos_core::depreciation::{summarize, AssetSummary, TargetPeriod};
use activos_core::extract::{extract_assets, AssetRecord, ColumnMapping};
use activos_core::normalize::format_currency;
use activos_core::types::with_metadata;

use crate::commands::CurrencyPolicyArg;
use crate::xlsx;

/// Arguments for previewing extracted records
#[derive(Args)]
pub struct PreviewArgs {
    /// Path to the Excel file
    pub file: PathBuf,

    /// Master sheet name (defaults to the only sheet if there is one)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Target month 1..=12 (defaults to the current month)
    #[arg(long)]
    pub month: Option<u32>,

    /// Target year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Policy for cost cells that fail currency parsing
    #[arg(long, value_enum, default_value_t = CurrencyPolicyArg::Skip)]
    pub currency_policy: CurrencyPolicyArg,
}

#[derive(Serialize)]
struct PreviewOutput {
    master_sheet: String,
    target_month: u32,
    target_year: i32,
    assets: Vec<AssetRecord>,
    summaries: Vec<AssetSummary>,
    /// Review lines in display form, one per asset.
    review: Vec<String>,
}

/// Pick the master sheet: an explicit choice, or the only sheet there is.
pub fn resolve_master_sheet(
    requested: Option<&str>,
    available: &[String],
) -> Result<String, Box<dyn std::error::Error>> {
    match requested {
        Some(name) => {
            if available.iter().any(|s| s == name) {
                Ok(name.to_string())
            } else {
                Err(format!(
                    "Sheet '{name}' not found; workbook has: {}",
                    available.join(", ")
                )
                .into())
            }
        }
        None if available.len() == 1 => Ok(available[0].clone()),
        None => Err(format!(
            "--sheet is required; workbook has: {}",
            available.join(", ")
        )
        .into()),
    }
}

pub fn resolve_target(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<TargetPeriod, Box<dyn std::error::Error>> {
    let current = TargetPeriod::current();
    Ok(TargetPeriod::new(
        month.unwrap_or(current.month()),
        year.unwrap_or(current.year()),
    )?)
}

pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let names = xlsx::read::sheet_names(&args.file)?;
    let master = resolve_master_sheet(args.sheet.as_deref(), &names)?;
    let rows = xlsx::read::read_rows(&args.file, &master)?;

    let extraction = extract_assets(
        &master,
        &rows,
        &ColumnMapping::default(),
        args.currency_policy.into(),
    )?;
    let target = resolve_target(args.month, args.year)?;

    let mut summaries = Vec::with_capacity(extraction.result.len());
    for asset in &extraction.result {
        summaries.push(summarize(asset, &target)?);
    }

    let review = summaries
        .iter()
        .map(|s| {
            format!(
                "{}: {} depreciación acumulada, {} valor neto en libros",
                s.identifier,
                format_currency(s.accumulated_depreciation),
                format_currency(s.book_value)
            )
        })
        .collect();

    let output = PreviewOutput {
        master_sheet: master,
        target_month: target.month(),
        target_year: target.year(),
        assets: extraction.result,
        summaries,
        review,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let envelope = with_metadata(
        "Asset Record Preview",
        &serde_json::json!({
            "file": args.file.display().to_string(),
        }),
        extraction.warnings,
        elapsed,
        output,
    );

    Ok(serde_json::to_value(&envelope)?)
}
