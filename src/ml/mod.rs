/// Statistical classification over the shared feature space.
///
/// The classifier is trained on the rule scorer's own band labels
/// (self-supervised bootstrap) and persists its fitted parameters as a
/// versioned JSON blob.
pub mod classifier;
pub mod dataset;

pub use classifier::{ModelState, RiskClassifier, MODEL_SCHEMA};
pub use dataset::{ModelMetadata, Prediction, TrainingDataset, TrainingSample};
