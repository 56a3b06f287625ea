use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepreError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unparseable currency value: '{0}'")]
    CurrencyParse(String),

    #[error("Unparseable date value: '{0}'")]
    DateParse(String),

    #[error("Invalid sheet name '{name}': {reason}")]
    SheetName { name: String, reason: String },

    #[error("Duplicate asset identifier: '{0}'")]
    DuplicateIdentifier(String),

    #[error("Invalid session transition: cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DepreError {
    fn from(e: serde_json::Error) -> Self {
        DepreError::SerializationError(e.to_string())
    }
}
