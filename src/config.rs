use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Classifier configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Sentiment triage configuration
    #[serde(default)]
    pub triage: TriageConfig,
}

impl EngineConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: RISK_ENGINE_)
            .add_source(
                config::Environment::with_prefix("RISK_ENGINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            triage: TriageConfig::default(),
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Default location of the persisted model blob
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Predictions below this confidence are logged for review (0.0 - 1.0)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            min_confidence: default_min_confidence(),
        }
    }
}

/// Sentiment triage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// When false, triage runs in keyword-only mode
    #[serde(default = "default_true")]
    pub analyzer_enabled: bool,

    /// Combined signal at or below this value forces High severity
    #[serde(default = "default_strong_negative")]
    pub strong_negative_threshold: f64,

    /// Combined signal at or below this value yields Medium severity
    #[serde(default = "default_moderate_negative")]
    pub moderate_negative_threshold: f64,

    /// Distinct stress-keyword matches required for Medium severity
    #[serde(default = "default_stress_threshold")]
    pub stress_keyword_threshold: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            analyzer_enabled: true,
            strong_negative_threshold: default_strong_negative(),
            moderate_negative_threshold: default_moderate_negative(),
            stress_keyword_threshold: default_stress_threshold(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("data/models/risk_classifier.json")
}

fn default_min_confidence() -> f64 {
    0.7
}

fn default_true() -> bool {
    true
}

fn default_strong_negative() -> f64 {
    -0.6
}

fn default_moderate_negative() -> f64 {
    -0.25
}

fn default_stress_threshold() -> usize {
    2
}
