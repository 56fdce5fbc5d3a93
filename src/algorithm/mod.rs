//! Algorithm implementations for frailty risk workflows
//!
//! This module contains the rule-based frailty scoring used when the
//! external model is unavailable.

pub mod frailty;

pub use frailty::{RuleBasedEngine, ScoreBreakdown, ScoringAlgorithm};
