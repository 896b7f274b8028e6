use thiserror::Error;

/// Errors produced by the typed attribute accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Attribute not found: {key}")]
    Missing { key: String },
    #[error("Attribute {key} has type {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Attribute {key} is not an integer: {value}")]
    InvalidNumber { key: String, value: String },
}

impl AttributeError {
    /// The attribute name the error refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key } | Self::TypeMismatch { key, .. } | Self::InvalidNumber { key, .. } => {
                key
            }
        }
    }
}
