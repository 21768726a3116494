//! Error types for the forecast pipeline

use thiserror::Error;

/// Errors surfaced by forecast assembly
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Snapshot values outside their physical domain
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The classifier failed for one of the points; the whole series is discarded
    #[error("Classification failed at offset {offset_hours}h: {source}")]
    Classification {
        offset_hours: u32,
        #[source]
        source: ClassifierError,
    },
}

/// Errors raised by a classifier while scoring a feature vector
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The underlying model cannot be reached or evaluated
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// The feature vector does not match what the model was trained on
    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// The model produced a class outside the severity scale
    #[error("Category {0} is outside the severity scale 0..=5")]
    CategoryOutOfRange(i64),
}

/// Errors raised while loading a serialized classifier
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// Model file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model document is not valid JSON for the expected schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Model document parsed but is structurally unusable
    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Result type alias for forecast operations
pub type ForecastResult<T> = Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_error_names_offset() {
        let err = ForecastError::Classification {
            offset_hours: 24,
            source: ClassifierError::Unavailable("model evicted".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("24h"));
        assert!(message.contains("model evicted"));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ClassifierError::CategoryOutOfRange(-1);
        assert_eq!(err.to_string(), "Category -1 is outside the severity scale 0..=5");
    }
}
