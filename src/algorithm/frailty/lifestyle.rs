//! Generic-attributes scorer
//!
//! Scores records that only carry general health and lifestyle fields:
//! age, BMI, cognition, mobility, smoking, exercise, medical history and
//! medication count. The factor weights add up to 17 points; a profile with
//! none of these recorded is not weighed at all.

use crate::common::traits::{FactorContribution, RiskScore, RiskScorer};
use crate::models::{
    CognitiveStatus, ExerciseFrequency, MobilityStatus, PatientClinicalProfile, SmokingStatus,
};

use super::{FALLBACK_MODEL_NAME, age_points};

/// Rule-based scorer for lifestyle-only records
#[derive(Debug, Clone, Copy, Default)]
pub struct LifestyleScorer;

impl LifestyleScorer {
    pub const MODEL_VERSION: &'static str = "1.0.0-fallback";
    pub const CONFIDENCE_MARGIN: f64 = 0.1;
    pub const CONFIDENCE_CEILING: f64 = 0.95;
}

/// BMI points: underweight or obese scores 2, borderline scores 1
#[must_use]
pub fn bmi_points(bmi: Option<f64>) -> f64 {
    match bmi {
        Some(b) if b < 18.5 || b > 30.0 => 2.0,
        Some(b) if b < 20.0 || b > 28.0 => 1.0,
        _ => 0.0,
    }
}

#[must_use]
pub const fn cognitive_points(status: CognitiveStatus) -> f64 {
    match status {
        CognitiveStatus::SevereImpairment => 3.0,
        CognitiveStatus::ModerateImpairment => 2.0,
        CognitiveStatus::MildImpairment => 1.0,
        CognitiveStatus::Normal | CognitiveStatus::Unknown => 0.0,
    }
}

#[must_use]
pub const fn mobility_points(status: MobilityStatus) -> f64 {
    match status {
        MobilityStatus::Wheelchair => 3.0,
        MobilityStatus::MobilityAid => 2.0,
        MobilityStatus::AssistanceNeeded => 1.0,
        MobilityStatus::Independent | MobilityStatus::Unknown => 0.0,
    }
}

#[must_use]
pub const fn smoking_points(status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::Current => 1.0,
        SmokingStatus::Former => 0.5,
        SmokingStatus::Never | SmokingStatus::Unknown => 0.0,
    }
}

#[must_use]
pub const fn exercise_points(frequency: ExerciseFrequency) -> f64 {
    match frequency {
        ExerciseFrequency::Never => 2.0,
        ExerciseFrequency::Rarely => 1.5,
        ExerciseFrequency::Sometimes => 1.0,
        ExerciseFrequency::Regularly | ExerciseFrequency::Unknown => 0.0,
    }
}

/// Polypharmacy points: more than five medications scores 1, more than three scores 0.5
#[must_use]
pub const fn medication_points(count: usize) -> f64 {
    if count > 5 {
        1.0
    } else if count > 3 {
        0.5
    } else {
        0.0
    }
}

impl RiskScorer for LifestyleScorer {
    fn model_name(&self) -> &'static str {
        FALLBACK_MODEL_NAME
    }

    fn model_version(&self) -> &'static str {
        Self::MODEL_VERSION
    }

    fn score(&self, profile: &PatientClinicalProfile) -> RiskScore {
        // Nothing recorded: no factor is weighed at all
        if !profile.has_lifestyle_fields() {
            return RiskScore::default();
        }

        let history = if profile.has_medical_history() { 2.0 } else { 0.0 };

        RiskScore {
            factors: vec![
                FactorContribution::new("age", age_points(profile.age), 3.0),
                FactorContribution::new("bmi", bmi_points(profile.bmi()), 2.0),
                FactorContribution::new(
                    "cognitive_status",
                    cognitive_points(profile.cognitive_status),
                    3.0,
                ),
                FactorContribution::new(
                    "mobility_status",
                    mobility_points(profile.mobility_status),
                    3.0,
                ),
                FactorContribution::new("smoking", smoking_points(profile.smoking_status), 1.0),
                FactorContribution::new(
                    "exercise",
                    exercise_points(profile.exercise_frequency),
                    2.0,
                ),
                FactorContribution::new("medical_history", history, 2.0),
                FactorContribution::new(
                    "medications",
                    medication_points(profile.medication_count()),
                    1.0,
                ),
            ],
        }
    }

    fn confidence(&self, probability: f64) -> f64 {
        (probability + Self::CONFIDENCE_MARGIN).min(Self::CONFIDENCE_CEILING)
    }
}
