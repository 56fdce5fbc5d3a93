//! Prediction traits
//!
//! A [`RiskPredictor`] is any source of frailty assessments that may fail,
//! such as an external model process.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::models::{PatientClinicalProfile, RiskAssessment};

/// Boxed future returned by [`RiskPredictor::predict`]
pub type PredictionFuture<'a> = Pin<Box<dyn Future<Output = Result<RiskAssessment>> + Send + 'a>>;

/// Core trait for fallible frailty predictors
pub trait RiskPredictor: Send + Sync {
    /// Obtain an assessment for a profile
    ///
    /// Implementations make a single attempt and report every failure as an
    /// error; retrying and falling back is up to the caller.
    fn predict<'a>(&'a self, profile: &'a PatientClinicalProfile) -> PredictionFuture<'a>;

    /// Short description used in log messages
    fn describe(&self) -> String;
}
