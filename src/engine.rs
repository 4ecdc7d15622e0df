use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::interventions::InterventionRuleEngine;
use crate::ml::{ModelMetadata, RiskClassifier};
use crate::models::{InterventionItem, RiskVerdict, SentimentVerdict, StudentProfile, VerdictSource};
use crate::scoring::{FeatureDeriver, RuleBasedRiskScorer, MAX_SCORE};
use crate::sentiment::SentimentTriage;

/// A verdict coupled with its intervention recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: RiskVerdict,
    pub interventions: Vec<InterventionItem>,
}

/// Orchestration facade over the scoring, classification, intervention, and
/// triage components.
///
/// The fitted classifier is the only shared mutable state: it lives behind a
/// read-write lock, assessments take read guards, and `train`/`load_model`
/// build the replacement off-lock before swapping it in whole. The rule-based
/// scorer needs no state and is therefore always available as the fallback
/// path.
pub struct RiskEngine {
    config: EngineConfig,
    classifier: Arc<RwLock<RiskClassifier>>,
    sentiment: SentimentTriage,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        let sentiment = SentimentTriage::new(config.triage.clone());
        Self {
            config,
            classifier: Arc::new(RwLock::new(RiskClassifier::new())),
            sentiment,
        }
    }

    /// Check if a fitted classifier is currently loaded
    pub fn has_trained_model(&self) -> bool {
        self.classifier.read().is_trained()
    }

    /// Metadata of the loaded model, if any
    pub fn model_metadata(&self) -> Option<ModelMetadata> {
        self.classifier.read().metadata().cloned()
    }

    /// Assess one profile.
    ///
    /// The rule scorer always runs and supplies the score and factor
    /// explanations. When a fitted classifier is available it supplies the
    /// band, confidence, and probability distribution
    /// (`RuleWithClassifier`); otherwise the verdict falls back to the rule
    /// band with `score / 10` as the confidence (`RuleOnly`). The fallback is
    /// transparent: classifier unavailability is never surfaced to the caller.
    pub fn assess(&self, profile: &StudentProfile) -> Result<RiskVerdict> {
        let features = FeatureDeriver::derive(profile)?;
        let rule = RuleBasedRiskScorer::score(&features);
        let factors = RuleBasedRiskScorer::top_factors(&rule);

        let classifier = self.classifier.read();
        let verdict = match classifier.predict_features(&features) {
            Ok(prediction) => {
                if prediction.confidence < self.config.classifier.min_confidence {
                    debug!(
                        profile_id = %profile.id,
                        confidence = prediction.confidence,
                        threshold = self.config.classifier.min_confidence,
                        "Prediction confidence below threshold"
                    );
                }
                RiskVerdict::new(
                    profile.id.clone(),
                    prediction.band,
                    rule.total,
                    prediction.confidence,
                    VerdictSource::RuleWithClassifier,
                    Some(prediction.probabilities),
                    factors,
                )
            }
            Err(err) if err.is_classifier_unavailable() => {
                debug!(profile_id = %profile.id, "No fitted classifier, using rule-based fallback");
                RiskVerdict::new(
                    profile.id.clone(),
                    rule.band,
                    rule.total,
                    rule.total as f64 / MAX_SCORE as f64,
                    VerdictSource::RuleOnly,
                    None,
                    factors,
                )
            }
            Err(err) => return Err(err),
        };

        info!(
            profile_id = %profile.id,
            band = %verdict.band,
            score = verdict.score,
            source = %verdict.source,
            "Risk assessment completed"
        );

        Ok(verdict)
    }

    /// Assess one profile and attach its intervention recommendations.
    pub fn evaluate(&self, profile: &StudentProfile) -> Result<Assessment> {
        let verdict = self.assess(profile)?;
        let interventions = InterventionRuleEngine::recommend(&verdict, profile);
        Ok(Assessment {
            verdict,
            interventions,
        })
    }

    /// Intervention recommendations for an existing verdict.
    pub fn recommend(
        &self,
        verdict: &RiskVerdict,
        profile: &StudentProfile,
    ) -> Vec<InterventionItem> {
        InterventionRuleEngine::recommend(verdict, profile)
    }

    /// Train the classifier on profiles labeled by the rule scorer
    /// (self-supervised) and swap it in. A failed training run leaves the
    /// currently loaded model untouched.
    pub fn train(&self, profiles: &[StudentProfile]) -> Result<ModelMetadata> {
        let mut candidate = RiskClassifier::new();
        let metadata = candidate.train(profiles)?;
        *self.classifier.write() = candidate;
        info!(
            n_samples = metadata.n_samples,
            training_accuracy = metadata.training_accuracy,
            "Classifier trained and swapped in"
        );
        Ok(metadata)
    }

    /// Persist the fitted classifier.
    pub fn save_model(&self, path: &Path) -> Result<()> {
        self.classifier.read().save(path)
    }

    /// Load a persisted classifier and swap it in. A failed load (missing
    /// file, unknown schema, corrupt blob) leaves the currently loaded model
    /// untouched; callers keep getting rule-based verdicts if nothing was
    /// loaded before.
    pub fn load_model(&self, path: &Path) -> Result<ModelMetadata> {
        let mut candidate = RiskClassifier::new();
        match candidate.load(path) {
            Ok(metadata) => {
                *self.classifier.write() = candidate;
                Ok(metadata)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Model load failed, keeping current state"
                );
                Err(err)
            }
        }
    }

    /// Sentiment triage for a free-text submission.
    pub fn triage(&self, text: &str) -> Result<SentimentVerdict> {
        self.sentiment.analyze(text)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
