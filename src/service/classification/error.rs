//! Error types for supplier classification

use thiserror::Error;

/// Error type for supplier classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClassificationError {
    /// A submitted value falls outside its declared domain
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidInput { field: String, value: String },

    /// The static catalog has no entry for a valid input combination
    #[error("Incomplete classification catalog: {0}")]
    IncompleteConfiguration(String),
}

impl ClassificationError {
    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        ClassificationError::InvalidInput {
            field: field.into(),
            value: value.into(),
        }
    }
}
