//! Frailty risk assessment for elderly patients.
//!
//! Risk comes from an external model process when one is installed and from
//! a deterministic rule-based engine otherwise. [`FrailtyAssessor`] hides the
//! difference: it always returns an assessment, flagged when it came from the
//! rules.

pub mod algorithm;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
pub mod predictor;
pub mod store;
pub mod utils;

// Core types
pub use config::PredictorConfig;
pub use error::{FrailtyError, Result};
pub use models::{
    BmiCategory, PatientClinicalProfile, PatientRecord, RiskAssessment, RiskLevel,
};

// Scoring and prediction
pub use algorithm::{RuleBasedEngine, ScoreBreakdown, ScoringAlgorithm};
pub use common::traits::{PatientStore, RiskPredictor, RiskScorer};
pub use predictor::{ExternalPredictor, FrailtyAssessor};

// Patient write path
pub use store::{DashboardStats, InMemoryPatientStore, PatientService};
