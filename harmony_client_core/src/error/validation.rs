//! Validation related error types

use thiserror::Error;

/// Local input and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Missing required field
    #[error("{field} is required")]
    MissingField { field: String },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_error() {
        let error = ValidationError::missing_field("hostname");
        assert_eq!(error.to_string(), "hostname is required");
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = ValidationError::invalid_parameter("api_host", "not a URL");
        assert!(error.to_string().contains("Invalid parameter"));
        assert!(error.to_string().contains("api_host"));
        assert!(error.to_string().contains("not a URL"));
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("bad host");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("bad host"));
    }
}
