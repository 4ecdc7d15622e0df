/// Emotional-risk triage for free-text submissions.
///
/// This module provides sentiment-based severity classification including:
/// - Dual sentiment signals (word polarity/subjectivity, valence compound)
/// - Word-boundary keyword matching over fixed lexicons
/// - Severity precedence with an unconditional crisis override
/// - Degraded keyword-only mode when the analyzers are unavailable
/// - Support-resource selection per severity
pub mod analyzer;
pub mod lexicon;
pub mod triage;

pub use analyzer::{CompoundAnalyzer, PolarityAnalyzer, PolaritySignal};
pub use triage::SentimentTriage;
