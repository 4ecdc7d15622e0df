use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};

/// Emotional/sentiment-risk severity (distinct vocabulary from RiskBand)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, EnumString, Display,
)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Check if the severity warrants human attention
    pub fn needs_attention(&self) -> bool {
        matches!(self, Severity::High | Severity::Medium)
    }

    /// Check if a counselor referral is required
    pub fn counselor_referral(&self) -> bool {
        matches!(self, Severity::High)
    }
}

/// Lexicon a matched keyword belongs to
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, EnumString, Display,
)]
pub enum KeywordCategory {
    /// Crisis / self-harm terms; always force High severity
    Crisis,
    /// Emotional-distress terms
    Stress,
    /// Academic-pressure terms
    AcademicStress,
    /// Positive-affect terms
    Positive,
}

/// Kind of support resource
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum ResourceKind {
    Crisis,
    Professional,
    Academic,
    Wellbeing,
}

/// A support resource surfaced with a verdict
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportResource {
    pub kind: ResourceKind,
    pub name: String,
    pub contact: String,
}

impl SupportResource {
    pub fn new(kind: ResourceKind, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            contact: contact.into(),
        }
    }
}

/// The outcome of one sentiment triage. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentVerdict {
    /// The submitted text
    pub text: String,

    /// Word-polarity signal [-1, 1]
    pub polarity: f64,

    /// Subjectivity signal [0, 1]
    pub subjectivity: f64,

    /// Lexicon-based compound signal [-1, 1]
    pub compound: f64,

    /// Keyword categories that matched
    pub matched_categories: BTreeSet<KeywordCategory>,

    /// Individual keyword matches, in detection order
    pub matched_keywords: Vec<(KeywordCategory, String)>,

    /// Derived severity
    pub severity: Severity,

    /// Support resources, ordered by urgency
    pub resources: Vec<SupportResource>,

    /// True when the analyzers were unavailable and keyword-only mode was used
    pub degraded: bool,

    /// Analysis timestamp
    pub analyzed_at: DateTime<Utc>,
}

impl SentimentVerdict {
    /// Count of matches in a given category
    pub fn category_count(&self, category: KeywordCategory) -> usize {
        self.matched_keywords
            .iter()
            .filter(|(c, _)| *c == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_predicates() {
        assert!(Severity::High.needs_attention());
        assert!(Severity::Medium.needs_attention());
        assert!(!Severity::Low.needs_attention());
        assert!(Severity::High.counselor_referral());
        assert!(!Severity::Medium.counselor_referral());
    }

    #[test]
    fn test_category_count() {
        let verdict = SentimentVerdict {
            text: "stressed and worried".to_string(),
            polarity: -0.3,
            subjectivity: 0.6,
            compound: -0.4,
            matched_categories: BTreeSet::from([KeywordCategory::Stress]),
            matched_keywords: vec![
                (KeywordCategory::Stress, "stressed".to_string()),
                (KeywordCategory::Stress, "worried".to_string()),
            ],
            severity: Severity::Medium,
            resources: Vec::new(),
            degraded: false,
            analyzed_at: Utc::now(),
        };

        assert_eq!(verdict.category_count(KeywordCategory::Stress), 2);
        assert_eq!(verdict.category_count(KeywordCategory::Crisis), 0);
    }
}
