use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed or out-of-range student metrics
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Training set does not cover enough risk classes
    #[error("Insufficient training data: {classes} risk class(es) present, at least 2 required")]
    InsufficientTrainingData { classes: usize },

    /// Classifier invoked before a successful train or load
    #[error("Model not trained")]
    ModelNotTrained,

    /// Persisted model blob is unreadable or carries an unknown schema
    #[error("Corrupt model state: {0}")]
    CorruptModelState(String),

    /// Empty or non-text sentiment submission
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Solver failure while fitting the classifier
    #[error("Training error: {0}")]
    Training(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            EngineError::InvalidProfile(_) => "INVALID_PROFILE",
            EngineError::InsufficientTrainingData { .. } => "INSUFFICIENT_TRAINING_DATA",
            EngineError::ModelNotTrained => "MODEL_NOT_TRAINED",
            EngineError::CorruptModelState(_) => "CORRUPT_MODEL_STATE",
            EngineError::InvalidInput(_) => "INVALID_INPUT",
            EngineError::Training(_) => "TRAINING_ERROR",
            EngineError::Io(_) => "IO_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// True when the classifier is unusable and the caller must fall back to
    /// the rule-based scorer
    pub fn is_classifier_unavailable(&self) -> bool {
        matches!(
            self,
            EngineError::ModelNotTrained | EngineError::CorruptModelState(_)
        )
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Configuration(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::InvalidProfile(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
