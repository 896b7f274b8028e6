use thiserror::Error;

use crate::attribute::AttributeError;

/// Errors that can occur when mapping a record to or from its attributes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = ConversionError::MissingField("title".to_string());
        assert_eq!(error.to_string(), "Missing field: title");
    }

    #[test]
    fn test_invalid_field_display() {
        let error = ConversionError::InvalidField {
            field: "year".to_string(),
            reason: "must be a string".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid field year: must be a string");
    }

    #[test]
    fn test_attribute_error_is_transparent() {
        let error = ConversionError::from(AttributeError::Missing {
            key: "name".to_string(),
        });
        assert_eq!(error.to_string(), "Attribute not found: name");
    }
}
