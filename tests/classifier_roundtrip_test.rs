/// Integration tests for classifier persistence
///
/// These tests verify:
/// - save/load round-trips reproduce identical predictions
/// - unknown schema versions and corrupt blobs are rejected
/// - failed training or loading never destroys a working model

use student_risk_engine::{
    engine::RiskEngine,
    ml::{RiskClassifier, MODEL_SCHEMA},
    models::{StudentProfile, VerdictSource},
};

fn create_profile(
    id: &str,
    attendance: f64,
    average_score: f64,
    assignments_submitted: u32,
    engagement_score: f64,
) -> StudentProfile {
    StudentProfile::new(
        id,
        format!("Student {}", id),
        attendance,
        average_score,
        assignments_submitted,
        10,
        engagement_score,
    )
}

fn training_profiles() -> Vec<StudentProfile> {
    let mut profiles = Vec::new();
    for i in 0..12 {
        let jitter = i as f64;
        profiles.push(create_profile(&format!("H-{i}"), 28.0 + jitter, 32.0 + jitter, 3, 22.0));
        profiles.push(create_profile(&format!("M-{i}"), 66.0 + jitter * 0.5, 61.0, 6, 48.0));
        profiles.push(create_profile(&format!("S-{i}"), 88.0 + jitter * 0.5, 84.0 + jitter, 9, 78.0));
    }
    profiles
}

fn held_out_profiles() -> Vec<StudentProfile> {
    vec![
        create_profile("X-1", 45.0, 42.0, 5, 35.0),
        create_profile("X-2", 63.0, 58.0, 6, 47.0),
        create_profile("X-3", 82.0, 76.0, 8, 62.0),
        create_profile("X-4", 95.0, 91.0, 10, 86.0),
    ]
}

#[test]
fn test_save_load_reproduces_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risk_classifier.json");

    let mut trained = RiskClassifier::new();
    trained.train(&training_profiles()).unwrap();
    trained.save(&path).unwrap();

    let mut restored = RiskClassifier::new();
    let metadata = restored.load(&path).unwrap();
    assert_eq!(metadata.n_samples, 36);

    for profile in held_out_profiles() {
        let before = trained.predict(&profile).unwrap();
        let after = restored.predict(&profile).unwrap();

        assert_eq!(before.band, after.band, "band changed for {}", profile.id);
        assert_eq!(before.probabilities.len(), after.probabilities.len());
        for (band, probability) in &before.probabilities {
            assert!(
                (probability - after.probabilities[band]).abs() < 1e-12,
                "probability drifted for {} / {:?}",
                profile.id,
                band
            );
        }
    }
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risk_classifier.json");

    let mut trained = RiskClassifier::new();
    trained.train(&training_profiles()).unwrap();
    trained.save(&path).unwrap();

    // Rewrite the blob under a future schema identifier
    let blob = std::fs::read_to_string(&path).unwrap();
    let tampered = blob.replace(MODEL_SCHEMA, "student-risk-classifier/v99");
    std::fs::write(&path, tampered).unwrap();

    let mut restored = RiskClassifier::new();
    let err = restored.load(&path).unwrap_err();
    assert_eq!(err.error_code(), "CORRUPT_MODEL_STATE");
    assert!(!restored.is_trained());
}

#[test]
fn test_truncated_blob_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risk_classifier.json");

    let mut trained = RiskClassifier::new();
    trained.train(&training_profiles()).unwrap();
    trained.save(&path).unwrap();

    let blob = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &blob[..blob.len() / 2]).unwrap();

    let mut restored = RiskClassifier::new();
    assert_eq!(
        restored.load(&path).unwrap_err().error_code(),
        "CORRUPT_MODEL_STATE"
    );
}

#[test]
fn test_engine_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models/risk_classifier.json");

    let trainer = RiskEngine::default();
    trainer.train(&training_profiles()).unwrap();
    trainer.save_model(&path).unwrap();

    let server = RiskEngine::default();
    server.load_model(&path).unwrap();
    assert!(server.has_trained_model());

    for profile in held_out_profiles() {
        let a = trainer.assess(&profile).unwrap();
        let b = server.assess(&profile).unwrap();
        assert_eq!(a.band, b.band);
        assert_eq!(a.source, VerdictSource::RuleWithClassifier);
        assert_eq!(b.source, VerdictSource::RuleWithClassifier);
    }
}

#[test]
fn test_corrupt_load_falls_back_to_rules_transparently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risk_classifier.json");
    std::fs::write(&path, "{\"schema\": \"who-knows/v0\"}").unwrap();

    let engine = RiskEngine::default();
    assert!(engine.load_model(&path).is_err());

    // Assessment still works through the rule path
    let verdict = engine.assess(&create_profile("X-1", 45.0, 42.0, 5, 35.0)).unwrap();
    assert_eq!(verdict.source, VerdictSource::RuleOnly);
}

#[test]
fn test_single_band_training_set_is_rejected_and_state_kept() {
    let engine = RiskEngine::default();
    engine.train(&training_profiles()).unwrap();

    let safe_only: Vec<StudentProfile> = (0..8)
        .map(|i| create_profile(&format!("S-{i}"), 94.0, 90.0, 10, 84.0))
        .collect();

    let err = engine.train(&safe_only).unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_TRAINING_DATA");

    // Prior fitted state still serves classifier verdicts
    let verdict = engine.assess(&create_profile("X-1", 45.0, 42.0, 5, 35.0)).unwrap();
    assert_eq!(verdict.source, VerdictSource::RuleWithClassifier);
}
