//! Wire contract of the external predictor process
//!
//! One JSON request object is written to the process's stdin and one JSON
//! response object is read back from its stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FrailtyError, Result};
use crate::models::{
    CardiacFunctionClass, ClinicalFlag, LivingStatus, ModelMetrics, PatientClinicalProfile,
    RiskAssessment, RiskLevel,
};

/// Age sent to the model when the record has none or records zero
pub const DEFAULT_REQUEST_AGE: u32 = 70;

/// Request written to the predictor's stdin
///
/// Unset lab values and ADL score are left out so the predictor applies its
/// own defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorRequest {
    pub age: u32,
    pub living_status: LivingStatus,
    pub depression: ClinicalFlag,
    pub cardiac_function: CardiacFunctionClass,
    pub cerebrovascular_disease: ClinicalFlag,
    pub diabetes: ClinicalFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldl_cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adl_score: Option<f64>,
}

impl From<&PatientClinicalProfile> for PredictorRequest {
    fn from(profile: &PatientClinicalProfile) -> Self {
        Self {
            age: profile
                .age
                .filter(|&age| age > 0)
                .unwrap_or(DEFAULT_REQUEST_AGE),
            living_status: profile.living_status,
            depression: profile.depression,
            cardiac_function: profile.cardiac_function,
            cerebrovascular_disease: profile.cerebrovascular_disease,
            diabetes: profile.diabetes,
            total_cholesterol: profile.total_cholesterol,
            ldl_cholesterol: profile.ldl_cholesterol,
            hemoglobin: profile.hemoglobin,
            adl_score: profile.adl_score,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPayload {
    pub risk_level: String,
    pub confidence: f64,
    pub frailty_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelPayload {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub metrics: Option<ModelMetrics>,
}

/// Response read from the predictor's stdout
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorResponse {
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<PredictionPayload>,
    #[serde(default)]
    pub model: Option<ModelPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictorResponse {
    /// Parse the predictor's complete stdout
    pub fn parse(output: &str) -> Result<Self> {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Err(FrailtyError::malformed("predictor produced no output"));
        }
        serde_json::from_str(trimmed).map_err(|e| FrailtyError::malformed(e.to_string()))
    }

    /// Convert a successful response into an assessment
    ///
    /// # Errors
    /// [`FrailtyError::PredictorFailed`] when the predictor reported failure,
    /// [`FrailtyError::MalformedOutput`] when a success response is incomplete
    /// or out of range.
    pub fn into_assessment(self, predicted_at: DateTime<Utc>) -> Result<RiskAssessment> {
        if !self.success {
            return Err(FrailtyError::PredictorFailed(
                self.error.unwrap_or_else(|| "no error message".to_string()),
            ));
        }

        let prediction = self
            .prediction
            .ok_or_else(|| FrailtyError::malformed("missing 'prediction'"))?;
        let model = self
            .model
            .ok_or_else(|| FrailtyError::malformed("missing 'model'"))?;

        let risk_level = parse_risk_level(&prediction.risk_level)?;
        let confidence = unit_interval("confidence", prediction.confidence)?;
        let frailty_probability =
            unit_interval("frailtyProbability", prediction.frailty_probability)?;

        Ok(RiskAssessment {
            risk_level,
            confidence,
            frailty_probability,
            model_version: model.version,
            model_name: model.name,
            model_metrics: model.metrics,
            predicted_at,
            is_fallback: false,
        })
    }
}

fn parse_risk_level(value: &str) -> Result<RiskLevel> {
    match value {
        "Low" => Ok(RiskLevel::Low),
        "Medium" => Ok(RiskLevel::Medium),
        "High" => Ok(RiskLevel::High),
        other => Err(FrailtyError::malformed(format!("unknown riskLevel '{other}'"))),
    }
}

fn unit_interval(field: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(FrailtyError::malformed(format!("{field} out of range: {value}")))
    }
}
