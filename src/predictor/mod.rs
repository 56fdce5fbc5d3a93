//! Delegated prediction
//!
//! The external model runs as a separate process speaking JSON over its
//! standard streams. [`FrailtyAssessor`] wraps it with the rule-based
//! fallback.

pub mod assessor;
pub mod contract;
pub mod process;

pub use assessor::FrailtyAssessor;
pub use contract::{DEFAULT_REQUEST_AGE, PredictorRequest, PredictorResponse};
pub use process::ExternalPredictor;
