//! Error types for the prediction pipeline

use thiserror::Error;

/// Failure of a single prediction request.
///
/// The three kinds are kept apart internally so they can be logged and mapped to
/// distinct status codes, even though the HTML form shows all of them the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// A form field is missing or does not parse to its declared type.
    #[error("{0}")]
    Validation(String),

    /// The assembled row does not match the columns the artifacts expect.
    #[error("feature mismatch: {0}")]
    Feature(String),

    /// The scaler or the model failed while transforming or predicting.
    #[error("model failure: {0}")]
    Artifact(String),
}

impl PredictionError {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("missing field '{}'", field))
    }

    pub fn invalid_field(field: &str, value: &str, expected: &str) -> Self {
        Self::Validation(format!(
            "could not convert '{}' to {} for field '{}'",
            value, expected, field
        ))
    }

    /// Short label used in logs, metrics and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Validation(_) => "validation",
            PredictionError::Feature(_) => "feature",
            PredictionError::Artifact(_) => "artifact",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictionError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PredictionError::missing_field("bedrooms").kind(), "validation");
        assert_eq!(PredictionError::Feature("x".into()).kind(), "feature");
        assert_eq!(PredictionError::Artifact("x".into()).kind(), "artifact");
        assert!(PredictionError::missing_field("views").is_client_error());
        assert!(!PredictionError::Artifact("x".into()).is_client_error());
    }

    #[test]
    fn test_error_messages() {
        let err = PredictionError::invalid_field("bedrooms", "abc", "float");
        assert_eq!(
            err.to_string(),
            "could not convert 'abc' to float for field 'bedrooms'"
        );
        assert_eq!(
            PredictionError::missing_field("grade").to_string(),
            "missing field 'grade'"
        );
    }
}
