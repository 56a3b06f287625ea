pub mod depreciation;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod report;
pub mod session;
pub mod tables;
pub mod types;
pub mod workbook;

pub use error::DepreError;
pub use types::*;

/// Standard result type for all depreciation operations
pub type DepreResult<T> = Result<T, DepreError>;
