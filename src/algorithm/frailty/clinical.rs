//! Clinical-fields scorer
//!
//! Scores the attributes the trained model was built on: age, living
//! situation, depression, cardiac function, cerebrovascular disease,
//! diabetes, hemoglobin and ADL score. Maximum 20 points.

use crate::common::traits::{FactorContribution, RiskScore, RiskScorer};
use crate::models::{CardiacFunctionClass, LivingStatus, PatientClinicalProfile};

use super::{FALLBACK_MODEL_NAME, age_points};

/// Rule-based approximation of the trained clinical model
#[derive(Debug, Clone, Copy, Default)]
pub struct ClinicalScorer;

impl ClinicalScorer {
    pub const MODEL_VERSION: &'static str = "1.1.0-clinical-fallback";
    pub const CONFIDENCE_MARGIN: f64 = 0.15;
    pub const CONFIDENCE_CEILING: f64 = 0.85;
}

/// Hemoglobin points: below 12 g/dL scores 2, below 13 scores 1
#[must_use]
pub fn hemoglobin_points(hemoglobin: Option<f64>) -> f64 {
    match hemoglobin {
        Some(h) if h < 12.0 => 2.0,
        Some(h) if h < 13.0 => 1.0,
        _ => 0.0,
    }
}

/// ADL points: the less independent, the more points
#[must_use]
pub fn adl_points(adl_score: Option<f64>) -> f64 {
    match adl_score {
        Some(a) if a < 60.0 => 3.0,
        Some(a) if a < 80.0 => 2.0,
        Some(a) if a < 90.0 => 1.0,
        _ => 0.0,
    }
}

#[must_use]
pub const fn cardiac_points(class: CardiacFunctionClass) -> f64 {
    match class {
        CardiacFunctionClass::ClassIIIToIV => 3.0,
        CardiacFunctionClass::ClassIII => 2.0,
        CardiacFunctionClass::ClassI | CardiacFunctionClass::ClassII | CardiacFunctionClass::Unknown => 0.0,
    }
}

impl RiskScorer for ClinicalScorer {
    fn model_name(&self) -> &'static str {
        FALLBACK_MODEL_NAME
    }

    fn model_version(&self) -> &'static str {
        Self::MODEL_VERSION
    }

    fn score(&self, profile: &PatientClinicalProfile) -> RiskScore {
        let living_alone = if profile.living_status == LivingStatus::Alone {
            2.0
        } else {
            0.0
        };
        let flag = |yes: bool, points: f64| if yes { points } else { 0.0 };

        RiskScore {
            factors: vec![
                FactorContribution::new("age", age_points(profile.age), 3.0),
                FactorContribution::new("living_alone", living_alone, 2.0),
                FactorContribution::new("depression", flag(profile.depression.is_yes(), 3.0), 3.0),
                FactorContribution::new(
                    "cardiac_function",
                    cardiac_points(profile.cardiac_function),
                    3.0,
                ),
                FactorContribution::new(
                    "cerebrovascular_disease",
                    flag(profile.cerebrovascular_disease.is_yes(), 2.0),
                    2.0,
                ),
                FactorContribution::new("diabetes", flag(profile.diabetes.is_yes(), 2.0), 2.0),
                FactorContribution::new("hemoglobin", hemoglobin_points(profile.hemoglobin), 2.0),
                FactorContribution::new("adl_score", adl_points(profile.adl_score), 3.0),
            ],
        }
    }

    fn confidence(&self, probability: f64) -> f64 {
        (probability + Self::CONFIDENCE_MARGIN).min(Self::CONFIDENCE_CEILING)
    }
}
