use validator::Validate;

use crate::error::{EngineError, Result};
use crate::models::StudentProfile;

/// Number of features in the shared feature space
pub const FEATURE_COUNT: usize = 4;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["attendance", "average_score", "completion", "engagement"];

/// Fixed-order feature vector: [attendance, average_score, completion_pct, engagement]
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Normalizes raw student metrics into the feature vector shared by the rule
/// scorer and the classifier.
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Derive the feature vector for a profile.
    ///
    /// Percentages are clamped to [0, 100]; the completion ratio is computed
    /// from the raw counts and expressed on the same percentage scale. Fails
    /// with `InvalidProfile` on non-finite metrics or a zero assignment total.
    pub fn derive(profile: &StudentProfile) -> Result<FeatureVector> {
        profile.validate()?;

        for (name, value) in [
            ("attendance", profile.attendance),
            ("average_score", profile.average_score),
            ("engagement_score", profile.engagement_score),
        ] {
            if !value.is_finite() {
                return Err(EngineError::InvalidProfile(format!(
                    "{} is not a finite number",
                    name
                )));
            }
        }

        if profile.total_assignments == 0 {
            return Err(EngineError::InvalidProfile(
                "total_assignments must be greater than zero".to_string(),
            ));
        }

        let completion_pct = (profile.assignments_submitted as f64
            / profile.total_assignments as f64
            * 100.0)
            .clamp(0.0, 100.0);

        Ok([
            clamp_percentage(profile.attendance),
            clamp_percentage(profile.average_score),
            completion_pct,
            clamp_percentage(profile.engagement_score),
        ])
    }
}

fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
