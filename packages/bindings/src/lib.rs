use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use activos_core::depreciation::TargetPeriod;
use activos_core::extract::{AssetRecord, ColumnMapping, CurrencyPolicy};
use activos_core::types::RawCell;
use activos_core::workbook::SheetNamePolicy;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ExtractRequest {
    master_sheet: String,
    rows: Vec<Vec<RawCell>>,
    #[serde(default)]
    mapping: Option<ColumnMapping>,
    #[serde(default)]
    currency_policy: Option<CurrencyPolicy>,
}

#[napi]
pub fn extract_assets(input_json: String) -> NapiResult<String> {
    let request: ExtractRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = activos_core::extract::extract_assets(
        &request.master_sheet,
        &request.rows,
        &request.mapping.unwrap_or_default(),
        request.currency_policy.unwrap_or_default(),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Depreciation engine
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ScheduleRequest {
    asset: AssetRecord,
    target_month: u32,
    target_year: i32,
}

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let request: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let target =
        TargetPeriod::new(request.target_month, request.target_year).map_err(to_napi_error)?;
    let output = activos_core::depreciation::compute_schedule(&request.asset, &target)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Workbook assembly
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WorkbookRequest {
    master_sheet: String,
    master_rows: Vec<Vec<RawCell>>,
    assets: Vec<AssetRecord>,
    target_month: u32,
    target_year: i32,
    #[serde(default)]
    sheet_name_policy: Option<SheetNamePolicy>,
}

#[napi]
pub fn build_workbook(input_json: String) -> NapiResult<String> {
    let request: WorkbookRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let target =
        TargetPeriod::new(request.target_month, request.target_year).map_err(to_napi_error)?;
    let output = activos_core::report::build_workbook(
        &request.master_sheet,
        &request.master_rows,
        &request.assets,
        &target,
        request.sheet_name_policy.unwrap_or_default(),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Suggested output file name for a given input file name.
#[napi]
pub fn output_file_name(input_name: String) -> String {
    activos_core::report::output_file_name(&input_name)
}
