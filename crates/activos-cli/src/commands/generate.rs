use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;

use activos_core::depreciation::AssetSummary;
use activos_core::extract::{extract_assets, ColumnMapping, CurrencyPolicy};
use activos_core::report::{build_workbook, output_file_name};
use activos_core::session::ExportSession;
use activos_core::types::with_metadata;
use activos_core::workbook::{Cell, SheetNamePolicy};

use crate::commands::{CurrencyPolicyArg, SheetNamePolicyArg};
use crate::input;
use crate::xlsx;

/// Arguments for the full generate pipeline
#[derive(Args)]
pub struct GenerateArgs {
    /// Path to the Excel file
    pub file: Option<PathBuf>,

    /// Master sheet name (defaults to the only sheet if there is one)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Target month 1..=12 (defaults to the current month)
    #[arg(long)]
    pub month: Option<u32>,

    /// Target year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Output path (defaults to `<input base>-resultado.xlsx` next to the input)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Policy for cost cells that fail currency parsing
    #[arg(long, value_enum, default_value_t = CurrencyPolicyArg::Skip)]
    pub currency_policy: CurrencyPolicyArg,

    /// Policy for duplicate identifiers colliding as sheet names
    #[arg(long, value_enum, default_value_t = SheetNamePolicyArg::AutoSuffix)]
    pub sheet_name_policy: SheetNamePolicyArg,

    /// Path to a JSON parameters file (fields below; flags fill the gaps)
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON-file / stdin form of the generate parameters.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub file: Option<PathBuf>,
    pub sheet: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub out: Option<PathBuf>,
    pub currency_policy: Option<CurrencyPolicy>,
    pub sheet_name_policy: Option<SheetNamePolicy>,
}

#[derive(Serialize)]
struct GenerateOutput {
    output_file: String,
    master_sheet: String,
    target_month: u32,
    target_year: i32,
    asset_count: usize,
    sheet_names: Vec<String>,
    summaries: Vec<AssetSummary>,
}

fn load_params(args: &GenerateArgs) -> Result<GenerateParams, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(piped) = input::stdin::read_stdin::<GenerateParams>()? {
        return Ok(piped);
    }
    Ok(GenerateParams::default())
}

pub fn run_generate(args: GenerateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = load_params(&args)?;

    let file = params
        .file
        .or_else(|| args.file.clone())
        .ok_or("an input file is required (positional argument or \"file\" in --input)")?;
    let currency_policy: CurrencyPolicy = params
        .currency_policy
        .unwrap_or_else(|| args.currency_policy.into());
    let name_policy: SheetNamePolicy = params
        .sheet_name_policy
        .unwrap_or_else(|| args.sheet_name_policy.into());

    // The session enforces stage order; each step below is only legal once
    // the previous one has produced its output.
    let mut session = ExportSession::new();

    let names = xlsx::read::sheet_names(&file)?;
    session.load_file(file.display().to_string(), names.clone())?;

    let master = super::preview::resolve_master_sheet(
        params.sheet.as_deref().or(args.sheet.as_deref()),
        &names,
    )?;
    session.choose_master(&master)?;

    let rows = xlsx::read::read_rows(&file, &master)?;
    let extraction = extract_assets(&master, &rows, &ColumnMapping::default(), currency_policy)?;
    session.review_records(extraction.result.clone())?;

    let target = super::preview::resolve_target(
        params.month.or(args.month),
        params.year.or(args.year),
    )?;
    session.set_target(target)?;

    let built = build_workbook(&master, &rows, session.records(), &target, name_policy)?;

    let out_path = params.out.or(args.out).unwrap_or_else(|| {
        let suggested = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(output_file_name)
            .unwrap_or_else(|| "resultado.xlsx".to_string());
        file.with_file_name(suggested)
    });
    xlsx::write::write_workbook(&built.result, &out_path)?;
    session.mark_exported()?;

    let summaries = summaries_from_sheet(&built.result.sheets[1]);
    let output = GenerateOutput {
        output_file: out_path.display().to_string(),
        master_sheet: master,
        target_month: target.month(),
        target_year: target.year(),
        asset_count: session.records().len(),
        sheet_names: built
            .result
            .sheet_names()
            .into_iter()
            .map(String::from)
            .collect(),
        summaries,
    };

    let mut warnings = extraction.warnings;
    warnings.extend(built.warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    let envelope = with_metadata(
        "Straight-Line Depreciation Workbook",
        &built.assumptions,
        warnings,
        elapsed,
        output,
    );

    Ok(serde_json::to_value(&envelope)?)
}


/// Read the summary figures back out of the already-built "Resumen" sheet
/// rather than recomputing the schedules a second time.
fn summaries_from_sheet(sheet: &activos_core::workbook::Sheet) -> Vec<AssetSummary> {
    sheet
        .rows
        .iter()
        .skip(1)
        .filter_map(|row| match (row.first()?, row.get(1)?, row.get(2)?) {
            (
                Cell::Text { text },
                Cell::Number { value: acc, .. },
                Cell::Number { value: book, .. },
            ) => Some(AssetSummary {
                identifier: text.clone(),
                accumulated_depreciation: *acc,
                book_value: *book,
            }),
            _ => None,
        })
        .collect()
}
