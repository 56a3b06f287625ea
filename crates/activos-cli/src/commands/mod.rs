pub mod generate;
pub mod preview;
pub mod sheets;

use clap::ValueEnum;

use activos_core::extract::CurrencyPolicy;
use activos_core::workbook::SheetNamePolicy;

/// CLI-side mirror of [`CurrencyPolicy`].
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CurrencyPolicyArg {
    #[default]
    Skip,
    Zero,
    Fail,
}

impl From<CurrencyPolicyArg> for CurrencyPolicy {
    fn from(arg: CurrencyPolicyArg) -> Self {
        match arg {
            CurrencyPolicyArg::Skip => CurrencyPolicy::SkipAsset,
            CurrencyPolicyArg::Zero => CurrencyPolicy::TreatAsZero,
            CurrencyPolicyArg::Fail => CurrencyPolicy::Fail,
        }
    }
}

/// CLI-side mirror of [`SheetNamePolicy`].
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SheetNamePolicyArg {
    #[default]
    AutoSuffix,
    Reject,
}

impl From<SheetNamePolicyArg> for SheetNamePolicy {
    fn from(arg: SheetNamePolicyArg) -> Self {
        match arg {
            SheetNamePolicyArg::AutoSuffix => SheetNamePolicy::AutoSuffix,
            SheetNamePolicyArg::Reject => SheetNamePolicy::Reject,
        }
    }
}
