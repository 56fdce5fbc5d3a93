//! Rule-based frailty scoring
//!
//! This module implements the deterministic fallback classifier used
//! whenever the external model predictor is unavailable. Two scorers exist:
//! one for records carrying the clinical attributes the model was trained on
//! and one for older records that only carry general health and lifestyle
//! attributes. Which one applies is decided once per call from the fields
//! present on the profile.
//!
//! Scoring is pure: no I/O, no logging, no shared state. Missing attributes
//! count as their lowest-risk category.

pub mod clinical;
pub mod lifestyle;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::traits::{RiskScore, RiskScorer};
use crate::error::FrailtyError;
use crate::models::{PatientClinicalProfile, RiskAssessment, RiskLevel};

pub use clinical::ClinicalScorer;
pub use lifestyle::LifestyleScorer;

/// Model name recorded on every rule-based assessment
pub const FALLBACK_MODEL_NAME: &str = "Rule-based System";

static CLINICAL: ClinicalScorer = ClinicalScorer;
static LIFESTYLE: LifestyleScorer = LifestyleScorer;

/// Age points shared by both scorers: over 80 scores 3, over 70 scores 2, over 60 scores 1
#[must_use]
pub const fn age_points(age: Option<u32>) -> f64 {
    match age {
        Some(a) if a > 80 => 3.0,
        Some(a) if a > 70 => 2.0,
        Some(a) if a > 60 => 1.0,
        _ => 0.0,
    }
}

/// The rule-based scoring variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringAlgorithm {
    /// Clinical attributes (living status, comorbidities, labs, ADL)
    Clinical,
    /// General health and lifestyle attributes
    Lifestyle,
}

impl ScoringAlgorithm {
    /// Pick the variant matching the fields recorded on `profile`
    #[must_use]
    pub fn select(profile: &PatientClinicalProfile) -> Self {
        if profile.has_clinical_fields() {
            Self::Clinical
        } else {
            Self::Lifestyle
        }
    }

    /// The scorer implementing this variant
    #[must_use]
    pub fn scorer(self) -> &'static dyn RiskScorer {
        match self {
            Self::Clinical => &CLINICAL,
            Self::Lifestyle => &LIFESTYLE,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clinical => "clinical",
            Self::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for ScoringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringAlgorithm {
    type Err = FrailtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clinical" => Ok(Self::Clinical),
            "lifestyle" | "generic" => Ok(Self::Lifestyle),
            other => Err(FrailtyError::config(format!(
                "Unknown scoring algorithm '{other}'"
            ))),
        }
    }
}

/// A scored profile together with the variant that scored it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub algorithm: ScoringAlgorithm,
    pub score: RiskScore,
}

/// Deterministic rule-based frailty classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEngine {
    forced: Option<ScoringAlgorithm>,
}

impl RuleBasedEngine {
    /// Engine that selects the variant from the profile's fields
    #[must_use]
    pub const fn new() -> Self {
        Self { forced: None }
    }

    /// Engine that always uses `algorithm`
    #[must_use]
    pub const fn with_algorithm(algorithm: ScoringAlgorithm) -> Self {
        Self {
            forced: Some(algorithm),
        }
    }

    /// Variant used for `profile`
    #[must_use]
    pub fn algorithm_for(&self, profile: &PatientClinicalProfile) -> ScoringAlgorithm {
        self.forced
            .unwrap_or_else(|| ScoringAlgorithm::select(profile))
    }

    /// Factor-by-factor score for `profile`
    #[must_use]
    pub fn breakdown(&self, profile: &PatientClinicalProfile) -> ScoreBreakdown {
        let algorithm = self.algorithm_for(profile);
        ScoreBreakdown {
            algorithm,
            score: algorithm.scorer().score(profile),
        }
    }

    /// Score `profile`, stamping the assessment with `predicted_at`
    #[must_use]
    pub fn assess(
        &self,
        profile: &PatientClinicalProfile,
        predicted_at: DateTime<Utc>,
    ) -> RiskAssessment {
        let algorithm = self.algorithm_for(profile);
        let scorer = algorithm.scorer();
        let probability = scorer.score(profile).probability();

        RiskAssessment {
            risk_level: RiskLevel::from_probability(probability),
            confidence: scorer.confidence(probability),
            frailty_probability: probability,
            model_version: scorer.model_version().to_string(),
            model_name: scorer.model_name().to_string(),
            model_metrics: None,
            predicted_at,
            is_fallback: true,
        }
    }

    /// Score `profile` now
    #[must_use]
    pub fn score(&self, profile: &PatientClinicalProfile) -> RiskAssessment {
        self.assess(profile, Utc::now())
    }
}
