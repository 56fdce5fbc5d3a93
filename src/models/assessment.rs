//! Frailty risk assessment model
//!
//! A [`RiskAssessment`] is produced fresh by every scoring call, whether it
//! came from the external model or from the rule-based fallback. It is never
//! updated in place.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the low-risk band
pub const LOW_RISK_UPPER: f64 = 0.33;

/// Upper bound (exclusive) of the medium-risk band
pub const MEDIUM_RISK_UPPER: f64 = 0.67;

/// Discrete frailty risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a frailty probability onto a risk level
    ///
    /// Below [`LOW_RISK_UPPER`] is `Low`, below [`MEDIUM_RISK_UPPER`] is
    /// `Medium`, anything else is `High`. A probability equal to either
    /// constant therefore maps to the higher band.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_UPPER {
            Self::Low
        } else if probability < MEDIUM_RISK_UPPER {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Display color used for this level in patient lists and reports
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#4CAF50",
            Self::Medium => "#FFC107",
            Self::High => "#F44336",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation metrics reported by the trained model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    #[serde(default)]
    pub auc: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub f1_score: Option<f64>,
}

/// Frailty risk assessment attached to a patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Confidence in the assessment, 0-1
    pub confidence: f64,
    /// Normalized frailty score, 0-1
    pub frailty_probability: f64,
    pub model_version: String,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_metrics: Option<ModelMetrics>,
    pub predicted_at: DateTime<Utc>,
    /// Set when the rule-based fallback produced this assessment
    #[serde(default)]
    pub is_fallback: bool,
}

impl RiskAssessment {
    /// Whether the risk level agrees with the probability thresholds
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        RiskLevel::from_probability(self.frailty_probability) == self.risk_level
    }
}
