use crate::utils::fixed_time;
use frailty_risk::algorithm::frailty::LifestyleScorer;
use frailty_risk::models::{
    CognitiveStatus, ExerciseFrequency, MobilityStatus, PatientClinicalProfile, SmokingStatus,
};
use frailty_risk::{RiskLevel, RuleBasedEngine, ScoringAlgorithm};

#[test]
fn test_lifestyle_profile_from_json() {
    let profile: PatientClinicalProfile = serde_json::from_str(
        r#"{
            "age": 78,
            "height": 165,
            "weight": 52,
            "cognitiveStatus": "mild-impairment",
            "mobilityStatus": "mobility-aid",
            "smokingStatus": "former",
            "exerciseFrequency": "rarely",
            "medicalHistory": "Hypertension",
            "currentMedications": "amlodipine, metformin, aspirin, statin"
        }"#,
    )
    .unwrap();

    let engine = RuleBasedEngine::new();
    let breakdown = engine.breakdown(&profile);
    assert_eq!(breakdown.algorithm, ScoringAlgorithm::Lifestyle);

    // 2 age + 1 bmi (19.1) + 1 cognition + 2 mobility + 0.5 smoking
    // + 1.5 exercise + 2 history + 0.5 medications
    assert!((breakdown.score.points() - 10.5).abs() < 1e-12);
    assert!((breakdown.score.max_points() - 17.0).abs() < 1e-12);

    let assessment = engine.assess(&profile, fixed_time());
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert_eq!(assessment.model_version, LifestyleScorer::MODEL_VERSION);
    assert!((assessment.confidence - (10.5 / 17.0 + 0.1)).abs() < 1e-12);
}

#[test]
fn test_unrecognized_values_score_lowest() {
    let profile: PatientClinicalProfile = serde_json::from_str(
        r#"{"age": 55, "cognitiveStatus": "confused", "mobilityStatus": "", "smokingStatus": "sometimes"}"#,
    )
    .unwrap();

    assert_eq!(profile.cognitive_status, CognitiveStatus::Unknown);
    assert_eq!(profile.mobility_status, MobilityStatus::Unknown);
    assert_eq!(profile.smoking_status, SmokingStatus::Unknown);

    let assessment = RuleBasedEngine::new().assess(&profile, fixed_time());
    assert_eq!(assessment.frailty_probability, 0.0);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
}

#[test]
fn test_confidence_ceiling() {
    let profile = PatientClinicalProfile {
        age: Some(90),
        height: Some(160.0),
        weight: Some(95.0),
        cognitive_status: CognitiveStatus::SevereImpairment,
        mobility_status: MobilityStatus::Wheelchair,
        smoking_status: SmokingStatus::Current,
        exercise_frequency: ExerciseFrequency::Never,
        medical_history: Some("Parkinson's disease".to_string()),
        current_medications: Some("a, b, c, d, e, f, g".to_string()),
        ..Default::default()
    };

    let assessment = RuleBasedEngine::new().assess(&profile, fixed_time());
    assert!((assessment.frailty_probability - 1.0).abs() < 1e-12);
    assert!((assessment.confidence - 0.95).abs() < 1e-12);
    assert_eq!(assessment.risk_level, RiskLevel::High);
}

#[test]
fn test_forced_lifestyle_on_clinical_record() {
    let profile = crate::utils::highest_risk_clinical();
    let assessment = RuleBasedEngine::with_algorithm(ScoringAlgorithm::Lifestyle)
        .assess(&profile, fixed_time());

    // Only age is a lifestyle factor on this record
    assert!((assessment.frailty_probability - 3.0 / 17.0).abs() < 1e-12);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
}
