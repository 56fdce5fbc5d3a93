use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::utils::{diabetic_with_family, predictor_script, script_config};
use frailty_risk::models::PatientClinicalProfile;
use frailty_risk::{ExternalPredictor, FrailtyAssessor, PredictorConfig, RuleBasedEngine};

#[tokio::test]
async fn test_hanging_predictor_falls_back_to_rules() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "hang.sh", "exec sleep 30");
    let config = script_config(dir.path(), &script, Duration::from_millis(300));
    let assessor = FrailtyAssessor::from_config(&config);
    let profile = diabetic_with_family();

    let start = Instant::now();
    let assessment = assessor.obtain_risk_assessment(&profile).await;
    assert!(start.elapsed() < Duration::from_secs(5));

    assert!(assessment.is_fallback);
    let expected = RuleBasedEngine::new().assess(&profile, assessment.predicted_at);
    assert_eq!(assessment, expected);
}

#[tokio::test]
async fn test_missing_model_falls_back_to_rules() {
    let dir = tempfile::tempdir().unwrap();
    let config = PredictorConfig::default().with_model_dir(dir.path().join("nothing_here"));
    let assessor = FrailtyAssessor::from_config(&config);

    let assessment = assessor
        .obtain_risk_assessment(&PatientClinicalProfile::default())
        .await;
    assert!(assessment.is_fallback);
    assert_eq!(assessment.frailty_probability, 0.5);
}

#[tokio::test]
async fn test_crashing_predictor_falls_back_to_rules() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(dir.path(), "crash.sh", "exit 3");
    let predictor = ExternalPredictor::new(script_config(dir.path(), &script, Duration::from_secs(5)));
    let assessor = FrailtyAssessor::new(Arc::new(predictor));

    let assessment = assessor.obtain_risk_assessment(&diabetic_with_family()).await;
    assert!(assessment.is_fallback);
    assert!((assessment.frailty_probability - 0.35).abs() < 1e-12);
}

#[tokio::test]
async fn test_model_answer_is_used_when_available() {
    let dir = tempfile::tempdir().unwrap();
    let script = predictor_script(
        dir.path(),
        "predict.sh",
        r#"cat > /dev/null
echo '{"success": true, "prediction": {"riskLevel": "Low", "confidence": 0.88, "frailtyProbability": 0.12}, "model": {"name": "Gradient Boosting", "version": "3.2.1"}}'"#,
    );
    let assessor = FrailtyAssessor::from_config(&script_config(
        dir.path(),
        &script,
        Duration::from_secs(5),
    ));

    let assessment = assessor.obtain_risk_assessment(&diabetic_with_family()).await;
    assert!(!assessment.is_fallback);
    assert_eq!(assessment.model_version, "3.2.1");
    assert!(assessment.model_metrics.is_none());
}
