use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::models::{RiskBand, StudentProfile};
use crate::scoring::{FeatureDeriver, FeatureVector, RuleBasedRiskScorer, FEATURE_COUNT};

/// One labeled training example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Feature vector
    pub features: FeatureVector,

    /// Risk band label (derived from the rule scorer)
    pub band: RiskBand,
}

impl TrainingSample {
    pub fn new(features: FeatureVector, band: RiskBand) -> Self {
        Self { features, band }
    }
}

/// Training dataset over the shared feature space
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Array2<f64>,

    /// Band-index labels, aligned with the feature rows
    pub labels: Vec<usize>,

    /// Number of samples
    pub n_samples: usize,

    /// Number of features
    pub n_features: usize,
}

impl TrainingDataset {
    /// Build a dataset from profiles, labeling each with the rule scorer's
    /// band. This is the self-supervised bootstrap: the deterministic scorer
    /// generates the training labels, and the classifier learns to smooth the
    /// same decision boundary.
    pub fn from_profiles(profiles: &[StudentProfile]) -> Result<Self> {
        let samples: Vec<TrainingSample> = profiles
            .iter()
            .map(|profile| {
                let features = FeatureDeriver::derive(profile)?;
                Ok(TrainingSample::new(features, RuleBasedRiskScorer::label(&features)))
            })
            .collect::<Result<_>>()?;

        Ok(Self::from_samples(&samples))
    }

    /// Build a dataset from pre-derived samples.
    pub fn from_samples(samples: &[TrainingSample]) -> Self {
        let n_samples = samples.len();
        let mut features = Array2::zeros((n_samples, FEATURE_COUNT));
        let mut labels = Vec::with_capacity(n_samples);

        for (i, sample) in samples.iter().enumerate() {
            for (j, &value) in sample.features.iter().enumerate() {
                features[[i, j]] = value;
            }
            labels.push(sample.band.index());
        }

        Self {
            features,
            labels,
            n_samples,
            n_features: FEATURE_COUNT,
        }
    }

    /// Distinct class indices present, in ascending order.
    pub fn distinct_classes(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.labels.iter().copied().collect();
        set.into_iter().collect()
    }
}

/// Prediction result with confidence score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted band
    pub band: RiskBand,

    /// Confidence score (probability of the predicted band)
    pub confidence: f64,

    /// Full per-band probability distribution (sums to 1.0)
    pub probabilities: BTreeMap<RiskBand, f64>,
}

impl Prediction {
    pub fn new(band: RiskBand, confidence: f64, probabilities: BTreeMap<RiskBand, f64>) -> Self {
        Self {
            band,
            confidence,
            probabilities,
        }
    }
}

/// Metadata recorded when a model is fitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Training timestamp
    pub trained_at: DateTime<Utc>,

    /// Number of training samples
    pub n_samples: usize,

    /// Number of features
    pub n_features: usize,

    /// Accuracy against the (rule-derived) training labels
    pub training_accuracy: f64,
}
