use crate::utils::{diabetic_with_family, fixed_time, highest_risk_clinical, lowest_risk_clinical};
use frailty_risk::algorithm::frailty::ClinicalScorer;
use frailty_risk::models::{CardiacFunctionClass, PatientClinicalProfile};
use frailty_risk::{RiskLevel, RuleBasedEngine, ScoringAlgorithm};

#[test]
fn test_lowest_risk_profile_scores_zero() {
    let assessment = RuleBasedEngine::new().assess(&lowest_risk_clinical(), fixed_time());

    assert_eq!(assessment.frailty_probability, 0.0);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert_eq!(assessment.model_version, ClinicalScorer::MODEL_VERSION);
    assert!(assessment.is_fallback);
}

#[test]
fn test_highest_risk_profile_scores_one() {
    let assessment = RuleBasedEngine::new().assess(&highest_risk_clinical(), fixed_time());

    assert!((assessment.frailty_probability - 1.0).abs() < 1e-12);
    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert!((assessment.confidence - 0.85).abs() < 1e-12);
}

#[test]
fn test_diabetic_scenario_is_medium() {
    let engine = RuleBasedEngine::new();
    let profile = diabetic_with_family();

    let breakdown = engine.breakdown(&profile);
    assert_eq!(breakdown.algorithm, ScoringAlgorithm::Clinical);
    assert!((breakdown.score.points() - 7.0).abs() < 1e-12);
    assert!((breakdown.score.max_points() - 20.0).abs() < 1e-12);

    let assessment = engine.assess(&profile, fixed_time());
    assert!((assessment.frailty_probability - 0.35).abs() < 1e-12);
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert!((assessment.confidence - 0.5).abs() < 1e-12);
}

#[test]
fn test_cardiac_class_points() {
    let engine = RuleBasedEngine::new();
    let points_for = |class| {
        let profile = PatientClinicalProfile {
            cardiac_function: class,
            ..lowest_risk_clinical()
        };
        engine.breakdown(&profile).score.points()
    };

    assert_eq!(points_for(CardiacFunctionClass::ClassI), 0.0);
    assert_eq!(points_for(CardiacFunctionClass::ClassII), 0.0);
    assert_eq!(points_for(CardiacFunctionClass::ClassIII), 2.0);
    assert_eq!(points_for(CardiacFunctionClass::ClassIIIToIV), 3.0);
}

#[test]
fn test_clinical_profile_from_json() {
    let profile: PatientClinicalProfile = serde_json::from_str(
        r#"{
            "age": 82,
            "livingStatus": "alone",
            "depressionFlag": "yes",
            "cardiacFunctionClass": "IV",
            "cerebrovascularDiseaseFlag": null,
            "diabetesFlag": "no",
            "hemoglobin": 12.4,
            "adlScore": 75
        }"#,
    )
    .unwrap();

    let breakdown = RuleBasedEngine::new().breakdown(&profile);
    assert_eq!(breakdown.algorithm, ScoringAlgorithm::Clinical);
    // 3 age + 2 alone + 3 depression + 3 cardiac + 1 hemoglobin + 2 ADL
    assert!((breakdown.score.points() - 14.0).abs() < 1e-12);
}
