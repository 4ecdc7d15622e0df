//! Risk assessment and intervention recommendation engine for student
//! success monitoring.
//!
//! The crate assigns each student a risk band (High/Medium/Safe) from four
//! behavioral metrics, explains the decision with contributing factors, and
//! emits a priority-ranked list of interventions. A separate triage path
//! derives an emotional-risk severity from free-text submissions.
//!
//! The deterministic rule scorer is the specification of record: it produces
//! the factor explanations on every verdict, generates the labels the
//! statistical classifier is trained on, and serves as the unconditional
//! fallback whenever no fitted classifier is available.

pub mod config;
pub mod engine;
pub mod error;
pub mod interventions;
pub mod ml;
pub mod models;
pub mod scoring;
pub mod sentiment;

pub use config::EngineConfig;
pub use engine::{Assessment, RiskEngine};
pub use error::{EngineError, Result};
