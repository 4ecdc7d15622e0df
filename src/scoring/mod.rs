/// Deterministic scoring layer.
///
/// `features` normalizes raw profiles into the fixed feature space;
/// `rules` holds the auditable point tables that define risk bands and
/// factor explanations.
pub mod features;
pub mod rules;

pub use features::{FeatureDeriver, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use rules::{RuleBasedRiskScorer, RuleScore, MAX_SCORE, TOP_FACTOR_COUNT};
