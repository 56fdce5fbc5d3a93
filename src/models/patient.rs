//! Patient record model
//!
//! The stored patient document: identification, the clinical profile used
//! for scoring, and the most recent frailty prediction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::assessment::{RiskAssessment, RiskLevel};
use crate::models::profile::PatientClinicalProfile;
use crate::models::serde_helpers;

/// Prediction summary persisted on a patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrailtyPrediction {
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub frailty_probability: f64,
    pub predicted_at: DateTime<Utc>,
    pub model_version: String,
    #[serde(default)]
    pub is_fallback: bool,
}

impl From<&RiskAssessment> for FrailtyPrediction {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            risk_level: assessment.risk_level,
            confidence: assessment.confidence,
            frailty_probability: assessment.frailty_probability,
            predicted_at: assessment.predicted_at,
            model_version: assessment.model_version.clone(),
            is_fallback: assessment.is_fallback,
        }
    }
}

/// A patient as held by the patient store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Patient identifier, normalized to upper case
    #[serde(deserialize_with = "serde_helpers::patient_id")]
    pub patient_id: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: PatientClinicalProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frailty_prediction: Option<FrailtyPrediction>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

/// Canonical form of a patient id: trimmed and upper case
#[must_use]
pub fn normalize_patient_id(patient_id: &str) -> String {
    patient_id.trim().to_uppercase()
}

impl PatientRecord {
    /// Create a new, active record without a prediction
    #[must_use]
    pub fn new(patient_id: &str, name: &str, profile: PatientClinicalProfile) -> Self {
        let now = Utc::now();
        Self {
            patient_id: normalize_patient_id(patient_id),
            name: name.trim().to_string(),
            profile,
            frailty_prediction: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored prediction with one derived from `assessment`
    pub fn attach_assessment(&mut self, assessment: &RiskAssessment) {
        self.frailty_prediction = Some(FrailtyPrediction::from(assessment));
    }

    /// Current risk level, if the patient has been scored
    #[must_use]
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.frailty_prediction.as_ref().map(|p| p.risk_level)
    }
}
