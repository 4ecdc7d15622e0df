use chrono::Utc;
use std::collections::BTreeSet;

use crate::config::TriageConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    KeywordCategory, ResourceKind, SentimentVerdict, Severity, SupportResource,
};
use crate::sentiment::analyzer::{CompoundAnalyzer, PolarityAnalyzer};
use crate::sentiment::lexicon::{match_keywords, normalize, tokenize};

/// Emotional-risk triage over free-text submissions.
///
/// Stateless between calls; each submission runs through normalization,
/// keyword matching, and (when available) the two sentiment signals. When the
/// analyzers are unavailable the triage degrades to keyword-only matching
/// with severity capped at Medium; crisis keywords force High in every mode.
pub struct SentimentTriage {
    config: TriageConfig,
    analyzers_available: bool,
}

impl SentimentTriage {
    /// Triage with the full analyzer stack (unless disabled by configuration).
    pub fn new(config: TriageConfig) -> Self {
        let analyzers_available = config.analyzer_enabled;
        Self {
            config,
            analyzers_available,
        }
    }

    /// Keyword-only triage, for when the analyzer stack is unavailable.
    pub fn keyword_only(config: TriageConfig) -> Self {
        Self {
            config,
            analyzers_available: false,
        }
    }

    /// Analyze one text submission.
    pub fn analyze(&self, text: &str) -> Result<SentimentVerdict> {
        if text.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "submission is empty".to_string(),
            ));
        }
        if !text.chars().any(|c| c.is_alphabetic()) {
            return Err(EngineError::InvalidInput(
                "submission contains no readable text".to_string(),
            ));
        }

        let normalized = normalize(text);
        let matched_keywords = match_keywords(&normalized);
        let matched_categories: BTreeSet<KeywordCategory> =
            matched_keywords.iter().map(|(category, _)| *category).collect();

        let crisis = matched_categories.contains(&KeywordCategory::Crisis);
        let stress_count = matched_keywords
            .iter()
            .filter(|(category, _)| *category == KeywordCategory::Stress)
            .count();

        let (severity, polarity, subjectivity, compound, degraded) = if self.analyzers_available {
            let tokens = tokenize(&normalized);
            let signal = PolarityAnalyzer::analyze(&tokens);
            let compound = CompoundAnalyzer::analyze(&tokens);
            let combined = (signal.polarity + compound) / 2.0;

            let severity = if crisis {
                Severity::High
            } else if combined <= self.config.strong_negative_threshold {
                Severity::High
            } else if stress_count >= self.config.stress_keyword_threshold
                || combined <= self.config.moderate_negative_threshold
            {
                Severity::Medium
            } else {
                Severity::Low
            };

            (severity, signal.polarity, signal.subjectivity, compound, false)
        } else {
            tracing::warn!("sentiment analyzers unavailable, using keyword-only triage");

            // Keyword-only mode cannot see polarity; cap at Medium unless a
            // crisis keyword matched.
            let severity = if crisis {
                Severity::High
            } else if stress_count >= self.config.stress_keyword_threshold {
                Severity::Medium
            } else {
                Severity::Low
            };

            (severity, 0.0, 0.0, 0.0, true)
        };

        if severity == Severity::High {
            tracing::warn!(
                crisis,
                compound,
                "high-severity sentiment detected, counselor referral required"
            );
        }

        Ok(SentimentVerdict {
            text: text.to_string(),
            polarity,
            subjectivity,
            compound,
            severity,
            resources: select_resources(severity, &matched_categories),
            matched_categories,
            matched_keywords,
            degraded,
            analyzed_at: Utc::now(),
        })
    }
}

/// Resource selection. High severity always gets the crisis block in fixed
/// order (hotline, text line, campus counseling); Medium gets academic or
/// wellbeing support depending on which stress category matched; Low gets
/// nothing.
fn select_resources(
    severity: Severity,
    categories: &BTreeSet<KeywordCategory>,
) -> Vec<SupportResource> {
    match severity {
        Severity::High => vec![
            SupportResource::new(
                ResourceKind::Crisis,
                "Crisis Hotline",
                "988 (Suicide & Crisis Lifeline)",
            ),
            SupportResource::new(
                ResourceKind::Crisis,
                "Crisis Text Line",
                "Text HOME to 741741",
            ),
            SupportResource::new(
                ResourceKind::Professional,
                "Campus Counseling",
                "Contact your campus counseling center",
            ),
        ],
        Severity::Medium => {
            if categories.contains(&KeywordCategory::AcademicStress) {
                vec![
                    SupportResource::new(
                        ResourceKind::Academic,
                        "Tutoring Center",
                        "Academic tutoring center",
                    ),
                    SupportResource::new(
                        ResourceKind::Academic,
                        "Study Skills",
                        "Academic success workshops",
                    ),
                    SupportResource::new(
                        ResourceKind::Academic,
                        "Writing Center",
                        "Writing support center",
                    ),
                ]
            } else {
                vec![
                    SupportResource::new(
                        ResourceKind::Wellbeing,
                        "Student Wellness",
                        "Student wellness programs",
                    ),
                    SupportResource::new(
                        ResourceKind::Professional,
                        "Campus Counseling",
                        "Contact your campus counseling center",
                    ),
                ]
            }
        }
        Severity::Low => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triage() -> SentimentTriage {
        SentimentTriage::new(TriageConfig::default())
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = triage().analyze("   ").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_non_text_input_rejected() {
        let err = triage().analyze("1234 !!! ???").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_crisis_keyword_forces_high() {
        let verdict = triage()
            .analyze("I can't take this anymore, everything feels hopeless")
            .unwrap();

        assert_eq!(verdict.severity, Severity::High);
        assert!(verdict.matched_categories.contains(&KeywordCategory::Crisis));
        assert!(!verdict.degraded);
    }

    #[test]
    fn test_crisis_overrides_positive_polarity() {
        // Positive words everywhere, but one crisis term
        let verdict = triage()
            .analyze("I am happy and grateful but sometimes I feel worthless")
            .unwrap();
        assert_eq!(verdict.severity, Severity::High);
    }

    #[test]
    fn test_strongly_negative_text_is_high_without_crisis_keyword() {
        let verdict = triage()
            .analyze("everything is terrible and awful and miserable")
            .unwrap();
        assert!(!verdict.matched_categories.contains(&KeywordCategory::Crisis));
        assert_eq!(verdict.severity, Severity::High);
    }

    #[test]
    fn test_two_stress_keywords_yield_medium() {
        let verdict = triage()
            .analyze("I am worried and tired about my exam next week")
            .unwrap();
        assert_eq!(verdict.severity, Severity::Medium);
        assert!(verdict
            .matched_categories
            .contains(&KeywordCategory::AcademicStress));
    }

    #[test]
    fn test_single_stress_keyword_with_mild_text_stays_low() {
        let verdict = triage()
            .analyze("I had a difficult week but things are fine now")
            .unwrap();
        assert_eq!(verdict.severity, Severity::Low);
        assert!(verdict.resources.is_empty());
    }

    #[test]
    fn test_positive_text_is_low() {
        let verdict = triage()
            .analyze("I am happy and proud of my progress this semester")
            .unwrap();
        assert_eq!(verdict.severity, Severity::Low);
        assert!(verdict.polarity > 0.0);
    }

    #[test]
    fn test_high_severity_resources_fixed_order() {
        let verdict = triage().analyze("I feel hopeless about everything").unwrap();

        let names: Vec<&str> = verdict.resources.iter().map(|r| r.name.as_str()).collect();
        let hotline = names.iter().position(|n| *n == "Crisis Hotline").unwrap();
        let counseling = names.iter().position(|n| *n == "Campus Counseling").unwrap();
        assert!(hotline < counseling);
        assert_eq!(verdict.resources[0].kind, ResourceKind::Crisis);
    }

    #[test]
    fn test_medium_academic_stress_gets_academic_resources() {
        let verdict = triage()
            .analyze("I am worried and tired about the exam deadline")
            .unwrap();
        assert_eq!(verdict.severity, Severity::Medium);
        assert!(verdict
            .resources
            .iter()
            .all(|r| r.kind == ResourceKind::Academic));
    }

    #[test]
    fn test_medium_without_academic_stress_gets_wellbeing_resources() {
        let verdict = triage().analyze("I feel lonely and isolated lately").unwrap();
        assert_eq!(verdict.severity, Severity::Medium);
        assert!(verdict
            .resources
            .iter()
            .any(|r| r.kind == ResourceKind::Wellbeing));
    }

    #[test]
    fn test_degraded_mode_caps_at_medium() {
        let triage = SentimentTriage::keyword_only(TriageConfig::default());

        // Strongly negative wording but no crisis keyword
        let verdict = triage
            .analyze("everything is terrible and awful, I am stressed and worried")
            .unwrap();
        assert_eq!(verdict.severity, Severity::Medium);
        assert!(verdict.degraded);
        assert_eq!(verdict.compound, 0.0);
    }

    #[test]
    fn test_degraded_mode_crisis_still_forces_high() {
        let triage = SentimentTriage::keyword_only(TriageConfig::default());
        let verdict = triage.analyze("there is no point living like this").unwrap();
        assert_eq!(verdict.severity, Severity::High);
        assert!(verdict.degraded);
    }

    #[test]
    fn test_analyzer_disabled_by_config() {
        let config = TriageConfig {
            analyzer_enabled: false,
            ..TriageConfig::default()
        };
        let verdict = SentimentTriage::new(config).analyze("I am sad today").unwrap();
        assert!(verdict.degraded);
    }
}
