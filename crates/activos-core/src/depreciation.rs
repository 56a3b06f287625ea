use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DepreError;
use crate::extract::AssetRecord;
use crate::normalize::parse_canonical_date;
use crate::types::Money;
use crate::DepreResult;

/// Salvage value as a fraction of acquisition cost. Fixed policy.
pub const SALVAGE_RATE: Decimal = dec!(0.10);

/// Useful life of every asset: 20 years. Fixed policy, not user-configurable.
pub const USEFUL_LIFE_MONTHS: u32 = 240;
pub const USEFUL_LIFE_YEARS: u32 = 20;

/// The "as of" month the schedules are computed against. Combined, the pair
/// stands for the first day of that month. Deserialization goes through
/// [`TargetPeriod::new`], so an out-of-range month is rejected on any path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTargetPeriod")]
pub struct TargetPeriod {
    month: u32,
    year: i32,
}

#[derive(Deserialize)]
struct RawTargetPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawTargetPeriod> for TargetPeriod {
    type Error = DepreError;

    fn try_from(raw: RawTargetPeriod) -> Result<Self, Self::Error> {
        TargetPeriod::new(raw.month, raw.year)
    }
}

impl TargetPeriod {
    pub fn new(month: u32, year: i32) -> DepreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DepreError::InvalidInput {
                field: "month".into(),
                reason: format!("Month must be 1..=12, got {month}"),
            });
        }
        Ok(Self { month, year })
    }

    /// The current calendar month/year, the session default.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// One month of the straight-line ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// First day of the month this row covers.
    pub period: NaiveDate,
    /// Constant monthly depreciation charge.
    pub charge: Money,
    /// Depreciation accumulated through this month.
    pub accumulated: Money,
    /// Cost minus accumulated depreciation.
    pub book_value: Money,
}

/// Full straight-line schedule for one asset as of a target period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    pub identifier: String,
    pub cost: Money,
    pub salvage_value: Money,
    pub useful_life_months: u32,
    pub monthly_depreciation: Money,
    /// Whole months between purchase and target, clamped to zero.
    pub months_elapsed: u32,
    pub rows: Vec<ScheduleRow>,
    pub accumulated_depreciation: Money,
    pub book_value: Money,
}

/// Summary line for one asset, feeding the "Resumen" sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSummary {
    pub identifier: String,
    pub accumulated_depreciation: Money,
    pub book_value: Money,
}

/// Compute the straight-line depreciation schedule of one asset.
///
/// A target date on or before the purchase month produces an empty schedule
/// with zero accumulated depreciation and a book value equal to cost. That
/// is the deliberate handling for future purchases, not an error.
pub fn compute_schedule(
    asset: &AssetRecord,
    target: &TargetPeriod,
) -> DepreResult<DepreciationSchedule> {
    let (_, purchase_month, purchase_year) = parse_canonical_date(&asset.purchase_date)?;

    let salvage_value = asset.cost * SALVAGE_RATE;
    let life = Decimal::from(USEFUL_LIFE_MONTHS);
    let monthly_depreciation = (asset.cost - salvage_value) / life;

    // Month arithmetic in i64: the year fields arrive as arbitrary i32s, so
    // the i32 difference times 12 could wrap.
    let raw_elapsed = (i64::from(target.year) - i64::from(purchase_year)) * 12
        + (i64::from(target.month) - i64::from(purchase_month));

    if raw_elapsed <= 0 {
        return Ok(DepreciationSchedule {
            identifier: asset.identifier.clone(),
            cost: asset.cost,
            salvage_value,
            useful_life_months: USEFUL_LIFE_MONTHS,
            monthly_depreciation,
            months_elapsed: 0,
            rows: Vec::new(),
            accumulated_depreciation: Money::ZERO,
            book_value: asset.cost,
        });
    }

    let months_elapsed = u32::try_from(raw_elapsed).map_err(|_| DepreError::InvalidInput {
        field: "target".into(),
        reason: format!(
            "Target period lies {raw_elapsed} months after the purchase date"
        ),
    })?;
    let mut rows = Vec::with_capacity(months_elapsed as usize);

    for i in 0..months_elapsed {
        let month_offset = i64::from(purchase_month) - 1 + i64::from(i);
        let month = (month_offset % 12 + 1) as u32;
        let year = i64::from(purchase_year) + month_offset / 12;

        let period = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
            .ok_or_else(|| DepreError::DateParse(format!("{month}-{year}")))?;

        let accumulated = monthly_depreciation * Decimal::from(i + 1);
        rows.push(ScheduleRow {
            period,
            charge: monthly_depreciation,
            accumulated,
            book_value: asset.cost - accumulated,
        });
    }

    let accumulated_depreciation = monthly_depreciation * Decimal::from(months_elapsed);

    Ok(DepreciationSchedule {
        identifier: asset.identifier.clone(),
        cost: asset.cost,
        salvage_value,
        useful_life_months: USEFUL_LIFE_MONTHS,
        monthly_depreciation,
        months_elapsed,
        rows,
        accumulated_depreciation,
        book_value: asset.cost - accumulated_depreciation,
    })
}

/// The summary figures for one asset as of a target period.
pub fn summarize(asset: &AssetRecord, target: &TargetPeriod) -> DepreResult<AssetSummary> {
    let schedule = compute_schedule(asset, target)?;
    Ok(AssetSummary {
        identifier: schedule.identifier,
        accumulated_depreciation: schedule.accumulated_depreciation,
        book_value: schedule.book_value,
    })
}
