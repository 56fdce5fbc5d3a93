use std::time::{Duration, Instant};

use crate::utils::{diabetic_with_family, predictor_script, script_config};
use frailty_risk::models::PatientClinicalProfile;
use frailty_risk::{ExternalPredictor, FrailtyError, PredictorConfig, RiskLevel, RiskPredictor};

const SUCCESS_RESPONSE: &str = r#"{"success": true, "prediction": {"riskLevel": "Medium", "confidence": 0.74, "frailtyProbability": 0.48, "nonFrailtyProbability": 0.52}, "model": {"name": "Random Forest", "version": "1.0.0", "metrics": {"auc": 0.86, "accuracy": 0.8, "f1_score": 0.77}}}"#;

#[tokio::test]
async fn test_successful_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(
        dir.path(),
        "predict.sh",
        &format!("cat > /dev/null\necho '{SUCCESS_RESPONSE}'"),
    );
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));

    let assessment = predictor.predict(&diabetic_with_family()).await.unwrap();
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert_eq!(assessment.model_name, "Random Forest");
    assert_eq!(assessment.model_metrics.unwrap().f1_score, Some(0.77));
    assert!(!assessment.is_fallback);
}

#[tokio::test]
async fn test_request_is_piped_to_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let captured = dir.path().join("request.json");
    let script = predictor_script(
        dir.path(),
        "capture.sh",
        &format!("cat > '{}'\necho '{SUCCESS_RESPONSE}'", captured.display()),
    );
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));

    predictor.predict(&PatientClinicalProfile::with_age(0)).await.unwrap();

    let request: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&captured).unwrap()).unwrap();
    assert_eq!(request["age"], 70);
    assert_eq!(request["livingStatus"], "unknown");
    for key in ["totalCholesterol", "ldlCholesterol", "hemoglobin", "adlScore"] {
        assert!(request.get(key).is_none(), "{key} should be omitted");
    }
}

#[tokio::test]
async fn test_timeout_kills_process() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "hang.sh", "exec sleep 30");
    let predictor =
        ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_millis(300)));

    let start = Instant::now();
    let err = predictor.predict(&diabetic_with_family()).await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err}");
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_non_zero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "fail.sh", "echo 'model exploded' >&2\nexit 1");
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));

    match predictor.predict(&diabetic_with_family()).await {
        Err(FrailtyError::NonZeroExit { code, stderr }) => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "model exploded");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "garbage.sh", "echo 'Segmentation fault'");
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));

    let err = predictor.predict(&diabetic_with_family()).await.unwrap_err();
    assert!(matches!(err, FrailtyError::MalformedOutput(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_reported_failure() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(
        dir.path(),
        "refuse.sh",
        r#"echo '{"success": false, "error": "Feature mismatch"}'"#,
    );
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));

    let err = predictor.predict(&diabetic_with_family()).await.unwrap_err();
    assert!(matches!(err, FrailtyError::PredictorFailed(ref msg) if msg == "Feature mismatch"));
}

#[tokio::test]
async fn test_missing_artifacts_skip_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let script = predictor_script(
        dir.path(),
        "touch.sh",
        &format!("touch '{}'\necho '{SUCCESS_RESPONSE}'", marker.display()),
    );
    let config = PredictorConfig::default()
        .with_command("sh", &[script.to_str().unwrap()])
        .with_model_dir(dir.path().join("empty_models"));

    match ExternalPredictor::new(config).predict(&diabetic_with_family()).await {
        Err(FrailtyError::ArtifactsMissing { missing, .. }) => {
            assert_eq!(missing, vec!["model.pkl", "scaler.pkl", "model_metadata.json"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_relative_model_dir_resolves_against_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "predict.sh", &format!("echo '{SUCCESS_RESPONSE}'"));
    let config = script_config(dir.path(), &script, Duration::from_secs(5))
        .with_model_dir("ml_models")
        .with_working_dir(dir.path());

    assert!(ExternalPredictor::new(config).check_artifacts().is_ok());
}

#[tokio::test]
async fn test_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = PredictorConfig::default()
        .with_command("/nonexistent/frailty-predictor", &[])
        .with_model_dir(crate::utils::model_dir_with_artifacts(dir.path()));

    let err = ExternalPredictor::new(config)
        .predict(&diabetic_with_family())
        .await
        .unwrap_err();
    assert!(matches!(err, FrailtyError::Spawn { .. }), "unexpected error: {err}");
}
