//! Patient and assessment models
//!
//! This module contains the clinical profile used as scoring input, the risk
//! assessment produced by scoring, and the stored patient record.

pub mod assessment;
pub mod bmi;
pub mod patient;
pub mod profile;
pub mod serde_helpers;

pub use assessment::{LOW_RISK_UPPER, MEDIUM_RISK_UPPER, ModelMetrics, RiskAssessment, RiskLevel};
pub use bmi::{BmiCategory, body_mass_index};
pub use patient::{FrailtyPrediction, PatientRecord, normalize_patient_id};
pub use profile::{
    AlcoholConsumption, CardiacFunctionClass, ClinicalFlag, CognitiveStatus, ExerciseFrequency,
    LivingStatus, MobilityStatus, PatientClinicalProfile, SmokingStatus,
};
