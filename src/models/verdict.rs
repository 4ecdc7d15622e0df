use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use uuid::Uuid;

/// Academic-risk severity classification
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
)]
pub enum RiskBand {
    #[strum(serialize = "High Risk")]
    High,
    #[strum(serialize = "Medium Risk")]
    Medium,
    Safe,
}

impl RiskBand {
    /// Numeric class index (lower is more severe)
    pub fn index(&self) -> usize {
        match self {
            RiskBand::High => 0,
            RiskBand::Medium => 1,
            RiskBand::Safe => 2,
        }
    }

    pub fn from_index(index: usize) -> RiskBand {
        match index {
            0 => RiskBand::High,
            1 => RiskBand::Medium,
            _ => RiskBand::Safe,
        }
    }

    /// Check if the band requires intervention
    pub fn is_at_risk(&self) -> bool {
        matches!(self, RiskBand::High | RiskBand::Medium)
    }
}

/// A named contributor to a risk score
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display,
)]
pub enum FactorKind {
    Attendance,
    Performance,
    Engagement,
    Completion,
}

/// One factor's contribution to an assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskFactor {
    /// Which metric contributed
    pub kind: FactorKind,

    /// Points contributed by this factor (0-3)
    pub weight: u8,

    /// The normalized metric value that produced the contribution
    pub observed: f64,
}

impl RiskFactor {
    pub fn new(kind: FactorKind, weight: u8, observed: f64) -> Self {
        Self {
            kind,
            weight,
            observed,
        }
    }

    /// True when this factor alone signals serious trouble
    pub fn is_high_severity(&self) -> bool {
        self.weight >= 2
    }
}

/// Which decision path produced a verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum VerdictSource {
    /// Deterministic rule scorer only (no fitted classifier available)
    RuleOnly,
    /// Classifier label and confidence, rule-derived factor explanations
    RuleWithClassifier,
}

/// The outcome of one risk assessment. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Unique identifier
    pub id: Uuid,

    /// Profile this verdict was produced for
    pub profile_id: String,

    /// Assigned risk band
    pub band: RiskBand,

    /// Deterministic rule score (0-10), always present
    pub score: u8,

    /// Confidence in [0, 1]: classifier probability, or score/10 on the rule path
    pub confidence: f64,

    /// Decision path
    pub source: VerdictSource,

    /// Per-band probability distribution (classifier path only)
    pub probabilities: Option<BTreeMap<RiskBand, f64>>,

    /// Top contributing factors, ordered by weight
    pub factors: Vec<RiskFactor>,

    /// Evaluation timestamp
    pub evaluated_at: DateTime<Utc>,
}

impl RiskVerdict {
    pub fn new(
        profile_id: impl Into<String>,
        band: RiskBand,
        score: u8,
        confidence: f64,
        source: VerdictSource,
        probabilities: Option<BTreeMap<RiskBand, f64>>,
        factors: Vec<RiskFactor>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id: profile_id.into(),
            band,
            score,
            confidence,
            source,
            probabilities,
            factors,
            evaluated_at: Utc::now(),
        }
    }

    /// Check if the verdict requires immediate attention
    pub fn needs_immediate_attention(&self) -> bool {
        self.band == RiskBand::High
    }
}
