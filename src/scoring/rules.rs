use crate::models::{FactorKind, RiskBand, RiskFactor};
use crate::scoring::features::FeatureVector;

/// Ordered range-lookup table: the first entry whose upper bound exceeds the
/// value wins; values past the last bound score zero. Bounds are half-open on
/// the upper side, so a value exactly at a bound falls into the next tier.
type PointTable = &'static [(f64, u8)];

const ATTENDANCE_TABLE: PointTable = &[(50.0, 3), (65.0, 2), (75.0, 1)];
const SCORE_TABLE: PointTable = &[(50.0, 3), (60.0, 2), (70.0, 1)];
const ENGAGEMENT_TABLE: PointTable = &[(40.0, 2), (55.0, 1)];
const COMPLETION_TABLE: PointTable = &[(50.0, 2), (70.0, 1)];

/// Maximum attainable rule score
pub const MAX_SCORE: u8 = 10;

/// How many factors a verdict carries
pub const TOP_FACTOR_COUNT: usize = 3;

/// A full rule-scoring breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    /// Sum of all factor contributions (0-10)
    pub total: u8,

    /// Band derived from the total
    pub band: RiskBand,

    /// Per-factor contributions in fixed category order
    pub contributions: Vec<RiskFactor>,
}

/// Deterministic point-based scorer. The specification of record for risk
/// bands: the classifier is trained on these labels and every verdict's
/// factor explanations come from here.
pub struct RuleBasedRiskScorer;

impl RuleBasedRiskScorer {
    /// Score a feature vector, retaining per-factor contributions.
    pub fn score(features: &FeatureVector) -> RuleScore {
        let contributions: Vec<RiskFactor> = [
            (FactorKind::Attendance, features[0], ATTENDANCE_TABLE),
            (FactorKind::Performance, features[1], SCORE_TABLE),
            (FactorKind::Engagement, features[3], ENGAGEMENT_TABLE),
            (FactorKind::Completion, features[2], COMPLETION_TABLE),
        ]
        .into_iter()
        .map(|(kind, value, table)| RiskFactor::new(kind, lookup_points(table, value), value))
        .collect();

        let total: u8 = contributions.iter().map(|f| f.weight).sum();

        RuleScore {
            total,
            band: Self::band_for(total),
            contributions,
        }
    }

    /// Band thresholds: >=6 High, >=3 Medium, otherwise Safe.
    pub fn band_for(total: u8) -> RiskBand {
        if total >= 6 {
            RiskBand::High
        } else if total >= 3 {
            RiskBand::Medium
        } else {
            RiskBand::Safe
        }
    }

    /// Training label for a feature vector (self-supervised bootstrap).
    pub fn label(features: &FeatureVector) -> RiskBand {
        Self::band_for(Self::score(features).total)
    }

    /// Top contributing factors by weight. The stable sort preserves the
    /// fixed category order (Attendance, Performance, Engagement, Completion)
    /// for equal weights; zero-weight factors are never reported.
    pub fn top_factors(score: &RuleScore) -> Vec<RiskFactor> {
        let mut factors: Vec<RiskFactor> = score
            .contributions
            .iter()
            .copied()
            .filter(|f| f.weight > 0)
            .collect();
        factors.sort_by(|a, b| b.weight.cmp(&a.weight));
        factors.truncate(TOP_FACTOR_COUNT);
        factors
    }
}

fn lookup_points(table: PointTable, value: f64) -> u8 {
    for &(bound, points) in table {
        if value < bound {
            return points;
        }
    }
    0
}
