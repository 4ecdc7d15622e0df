use chrono::Utc;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::ml::dataset::{ModelMetadata, Prediction, TrainingDataset};
use crate::models::{RiskBand, StudentProfile};
use crate::scoring::{FeatureDeriver, FeatureVector, FEATURE_COUNT};

/// Schema identifier for persisted model blobs
pub const MODEL_SCHEMA: &str = "student-risk-classifier/v1";

/// Fitted multinomial logistic-regression parameters. After training, these
/// arrays are the single source of truth for inference; the smartcore model
/// object is only used during the fit itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedParameters {
    /// Coefficient matrix, one row per class (single row for the two-class case)
    weights: Array2<f64>,

    /// Intercept per coefficient row
    bias: Array1<f64>,

    /// Class labels aligned with the probability columns, ascending by index
    classes: Vec<RiskBand>,
}

/// Versioned, persistable classifier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    /// Blob schema identifier; loaders reject anything unknown
    pub schema: String,

    /// Training metadata
    pub metadata: ModelMetadata,

    params: FittedParameters,
}

/// Schema probe decoded before the full blob
#[derive(Deserialize)]
struct SchemaProbe {
    schema: String,
}

/// Statistical risk classifier over the shared feature space.
///
/// Trained on the rule scorer's own band labels (self-supervised), so its
/// value is smoothing across the same decision boundary plus confidence
/// calibration, not an independent signal.
#[derive(Debug, Default)]
pub struct RiskClassifier {
    state: Option<ModelState>,
}

impl RiskClassifier {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Check if the classifier holds fitted parameters
    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Training metadata, if fitted
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.state.as_ref().map(|s| &s.metadata)
    }

    /// Fit the classifier on profiles labeled by the rule scorer.
    ///
    /// Requires at least two distinct risk bands in the derived labels; on any
    /// failure the previously fitted state is left untouched.
    pub fn train(&mut self, profiles: &[StudentProfile]) -> Result<ModelMetadata> {
        let dataset = TrainingDataset::from_profiles(profiles)?;
        let class_indices = dataset.distinct_classes();

        if class_indices.len() < 2 {
            return Err(EngineError::InsufficientTrainingData {
                classes: class_indices.len(),
            });
        }

        let x = ndarray_to_densematrix(&dataset.features);
        let y: Vec<i32> = dataset.labels.iter().map(|&l| l as i32).collect();

        let params = LogisticRegressionParameters::default();
        let model = LogisticRegression::fit(&x, &y, params)
            .map_err(|e| EngineError::Training(format!("logistic regression fit failed: {e}")))?;

        let classes: Vec<RiskBand> = class_indices.iter().map(|&i| RiskBand::from_index(i)).collect();
        let fitted = extract_parameters(&model, classes)?;

        // Training accuracy against the rule-derived labels, measured with the
        // extracted weights (the parameters that actually get persisted).
        let mut correct = 0usize;
        for (row, &label) in dataset.labels.iter().enumerate() {
            let mut features = [0.0; FEATURE_COUNT];
            for j in 0..FEATURE_COUNT {
                features[j] = dataset.features[[row, j]];
            }
            if predict_with(&fitted, &features).band.index() == label {
                correct += 1;
            }
        }

        let metadata = ModelMetadata {
            trained_at: Utc::now(),
            n_samples: dataset.n_samples,
            n_features: dataset.n_features,
            training_accuracy: correct as f64 / dataset.n_samples as f64,
        };

        tracing::info!(
            n_samples = metadata.n_samples,
            training_accuracy = metadata.training_accuracy,
            classes = fitted.classes.len(),
            "Risk classifier trained"
        );

        self.state = Some(ModelState {
            schema: MODEL_SCHEMA.to_string(),
            metadata: metadata.clone(),
            params: fitted,
        });

        Ok(metadata)
    }

    /// Predict the risk band for a profile.
    pub fn predict(&self, profile: &StudentProfile) -> Result<Prediction> {
        let features = FeatureDeriver::derive(profile)?;
        self.predict_features(&features)
    }

    /// Predict from an already-derived feature vector.
    pub fn predict_features(&self, features: &FeatureVector) -> Result<Prediction> {
        let state = self.state.as_ref().ok_or(EngineError::ModelNotTrained)?;
        Ok(predict_with(&state.params, features))
    }

    /// Persist the fitted state as a versioned JSON blob.
    pub fn save(&self, path: &Path) -> Result<()> {
        let state = self.state.as_ref().ok_or(EngineError::ModelNotTrained)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let blob = serde_json::to_string_pretty(state)?;
        fs::write(path, blob)?;

        tracing::info!(path = %path.display(), "Risk classifier saved");
        Ok(())
    }

    /// Restore fitted state from a versioned JSON blob.
    ///
    /// Unknown schema, undecodable content, or inconsistent dimensions fail
    /// with `CorruptModelState` and leave any prior fitted state untouched.
    pub fn load(&mut self, path: &Path) -> Result<ModelMetadata> {
        let blob = fs::read_to_string(path)?;

        let probe: SchemaProbe = serde_json::from_str(&blob)
            .map_err(|e| EngineError::CorruptModelState(format!("not a model blob: {e}")))?;
        if probe.schema != MODEL_SCHEMA {
            return Err(EngineError::CorruptModelState(format!(
                "unknown schema '{}', expected '{}'",
                probe.schema, MODEL_SCHEMA
            )));
        }

        let state: ModelState = serde_json::from_str(&blob)
            .map_err(|e| EngineError::CorruptModelState(format!("undecodable model blob: {e}")))?;
        validate_parameters(&state.params)?;

        let metadata = state.metadata.clone();
        self.state = Some(state);

        tracing::info!(path = %path.display(), "Risk classifier loaded");
        Ok(metadata)
    }
}

fn ndarray_to_densematrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}

/// Pull the fitted coefficient matrix and intercepts out of the smartcore
/// model. smartcore keeps binary fits as a single coefficient row and
/// multinomial fits as one row per class in ascending label order; the
/// orientation is normalized against the known feature count.
fn extract_parameters(
    model: &LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>,
    classes: Vec<RiskBand>,
) -> Result<FittedParameters> {
    let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };

    let coefficients = model.coefficients();
    let (rows, cols) = coefficients.shape();

    let weights = if cols == FEATURE_COUNT && rows == expected_rows {
        matrix_to_array(coefficients, rows, cols, false)
    } else if rows == FEATURE_COUNT && cols == expected_rows {
        matrix_to_array(coefficients, cols, rows, true)
    } else {
        return Err(EngineError::Training(format!(
            "unexpected coefficient shape {}x{}",
            rows, cols
        )));
    };

    let intercept = model.intercept();
    let (irows, icols) = intercept.shape();
    let mut bias = Vec::with_capacity(irows * icols);
    for r in 0..irows {
        for c in 0..icols {
            bias.push(*intercept.get((r, c)));
        }
    }
    if bias.len() != expected_rows {
        return Err(EngineError::Training(format!(
            "unexpected intercept length {}",
            bias.len()
        )));
    }

    Ok(FittedParameters {
        weights,
        bias: Array1::from_vec(bias),
        classes,
    })
}

fn matrix_to_array(m: &DenseMatrix<f64>, rows: usize, cols: usize, transposed: bool) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        if transposed {
            *m.get((c, r))
        } else {
            *m.get((r, c))
        }
    })
}

/// Softmax inference over the stored weights. For a two-class fit the single
/// coefficient row is a sigmoid over the higher-indexed class, which is the
/// same distribution the softmax form would produce.
fn predict_with(params: &FittedParameters, features: &FeatureVector) -> Prediction {
    let probabilities: Vec<f64> = if params.classes.len() == 2 {
        let z: f64 = params
            .weights
            .row(0)
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + params.bias[0];
        let p1 = 1.0 / (1.0 + (-z).exp());
        vec![1.0 - p1, p1]
    } else {
        let scores: Vec<f64> = (0..params.classes.len())
            .map(|i| {
                params
                    .weights
                    .row(i)
                    .iter()
                    .zip(features.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + params.bias[i]
            })
            .collect();
        softmax(&scores)
    };

    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > probabilities[best] {
            best = i;
        }
    }

    let distribution: BTreeMap<RiskBand, f64> = params
        .classes
        .iter()
        .copied()
        .zip(probabilities.iter().copied())
        .collect();

    Prediction::new(params.classes[best], probabilities[best], distribution)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

fn validate_parameters(params: &FittedParameters) -> Result<()> {
    let corrupt = |detail: String| EngineError::CorruptModelState(detail);

    if params.classes.len() < 2 {
        return Err(corrupt(format!(
            "model covers {} class(es)",
            params.classes.len()
        )));
    }

    let expected_rows = if params.classes.len() == 2 {
        1
    } else {
        params.classes.len()
    };

    if params.weights.ncols() != FEATURE_COUNT || params.weights.nrows() != expected_rows {
        return Err(corrupt(format!(
            "weight matrix is {}x{}, expected {}x{}",
            params.weights.nrows(),
            params.weights.ncols(),
            expected_rows,
            FEATURE_COUNT
        )));
    }

    if params.bias.len() != expected_rows {
        return Err(corrupt(format!(
            "intercept length {} does not match {} coefficient row(s)",
            params.bias.len(),
            expected_rows
        )));
    }

    if !params.weights.iter().chain(params.bias.iter()).all(|v| v.is_finite()) {
        return Err(corrupt("non-finite fitted parameter".to_string()));
    }

    Ok(())
}
