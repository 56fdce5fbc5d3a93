//! Common traits used across the codebase
//!
//! This module defines the seams between scoring, prediction and storage so
//! that each can be replaced independently.

pub mod prediction;
pub mod scoring;
pub mod store;

pub use prediction::{PredictionFuture, RiskPredictor};
pub use scoring::{FactorContribution, NO_EVIDENCE_PROBABILITY, RiskScore, RiskScorer};
pub use store::{PatientStore, StoreFuture};
