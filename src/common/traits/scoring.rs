//! Scoring traits
//!
//! A [`RiskScorer`] turns a clinical profile into weighted factor points.
//! Normalization and category mapping are shared by every scorer and live in
//! [`RiskScore`].

use serde::Serialize;

use crate::models::PatientClinicalProfile;

/// Probability assigned when no factor could be evaluated
pub const NO_EVIDENCE_PROBABILITY: f64 = 0.5;

/// Points awarded for a single risk factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    /// Factor name, e.g. `"age"` or `"hemoglobin"`
    pub factor: &'static str,
    /// Points awarded, between 0 and `weight`
    pub points: f64,
    /// Maximum points this factor can award
    pub weight: f64,
}

impl FactorContribution {
    #[must_use]
    pub const fn new(factor: &'static str, points: f64, weight: f64) -> Self {
        Self {
            factor,
            points,
            weight,
        }
    }
}

/// Weighted point total accumulated by a scorer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskScore {
    pub factors: Vec<FactorContribution>,
}

impl RiskScore {
    /// Sum of awarded points
    #[must_use]
    pub fn points(&self) -> f64 {
        self.factors.iter().map(|f| f.points).sum()
    }

    /// Sum of factor weights
    #[must_use]
    pub fn max_points(&self) -> f64 {
        self.factors.iter().map(|f| f.weight).sum()
    }

    /// Points normalized to 0-1, or [`NO_EVIDENCE_PROBABILITY`] when the maximum is zero
    #[must_use]
    pub fn probability(&self) -> f64 {
        let max = self.max_points();
        if max > 0.0 {
            self.points() / max
        } else {
            NO_EVIDENCE_PROBABILITY
        }
    }
}

/// A rule-based frailty scorer
pub trait RiskScorer: Send + Sync + std::fmt::Debug {
    /// Human-readable model name
    fn model_name(&self) -> &'static str;

    /// Version identifier recorded on assessments
    fn model_version(&self) -> &'static str;

    /// Accumulate factor points for a profile
    fn score(&self, profile: &PatientClinicalProfile) -> RiskScore;

    /// Confidence for a given probability
    fn confidence(&self, probability: f64) -> f64;
}
