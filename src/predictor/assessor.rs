//! Fallback orchestration
//!
//! [`FrailtyAssessor`] is the single entry point for obtaining a risk
//! assessment. It tries the external predictor once and falls back to the
//! rule-based engine on any failure, so callers always get an answer.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::algorithm::RuleBasedEngine;
use crate::common::traits::RiskPredictor;
use crate::config::PredictorConfig;
use crate::error::FrailtyError;
use crate::models::{PatientClinicalProfile, RiskAssessment};
use crate::predictor::process::ExternalPredictor;

/// Slack added on top of the process timeout before the assessor gives up
const DEADLINE_GRACE: Duration = Duration::from_millis(500);

/// Resolves a profile to an assessment, model first, rules second
#[derive(Clone)]
pub struct FrailtyAssessor {
    predictor: Option<Arc<dyn RiskPredictor>>,
    engine: RuleBasedEngine,
    deadline: Duration,
}

impl std::fmt::Debug for FrailtyAssessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrailtyAssessor")
            .field("predictor", &self.predictor.as_ref().map(|p| p.describe()))
            .field("engine", &self.engine)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl FrailtyAssessor {
    /// Assessor trying `predictor` before the rule-based engine
    pub fn new(predictor: Arc<dyn RiskPredictor>) -> Self {
        Self {
            predictor: Some(predictor),
            engine: RuleBasedEngine::new(),
            deadline: crate::config::DEFAULT_TIMEOUT + DEADLINE_GRACE,
        }
    }

    /// Assessor that only ever uses the rule-based engine
    #[must_use]
    pub const fn rules_only() -> Self {
        Self {
            predictor: None,
            engine: RuleBasedEngine::new(),
            deadline: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// Build an assessor for the external predictor described by `config`
    #[must_use]
    pub fn from_config(config: &PredictorConfig) -> Self {
        if !config.enabled {
            return Self::rules_only();
        }

        let deadline = config.timeout + DEADLINE_GRACE;
        Self::new(Arc::new(ExternalPredictor::new(config.clone()))).with_deadline(deadline)
    }

    /// Use `engine` for fallback scoring
    #[must_use]
    pub const fn with_engine(mut self, engine: RuleBasedEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Overall time allowed for one predictor attempt
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &RuleBasedEngine {
        &self.engine
    }

    /// Whether an external predictor is configured
    #[must_use]
    pub const fn has_predictor(&self) -> bool {
        self.predictor.is_some()
    }

    /// Obtain a risk assessment for `profile`
    ///
    /// Never fails. When the predictor is missing, errors, or runs past the
    /// deadline the rule-based engine scores the profile instead and the
    /// result is marked as a fallback.
    pub async fn obtain_risk_assessment(&self, profile: &PatientClinicalProfile) -> RiskAssessment {
        let Some(predictor) = &self.predictor else {
            return self.fallback(profile);
        };

        // Dropping the predictor future on expiry also drops the child process,
        // which is spawned with kill-on-drop.
        let outcome = tokio::time::timeout(self.deadline, predictor.predict(profile)).await;

        match outcome {
            Ok(Ok(assessment)) => {
                debug!(
                    "Predictor '{}' assessed risk as {} (p = {:.3})",
                    assessment.model_name, assessment.risk_level, assessment.frailty_probability
                );
                assessment
            }
            Ok(Err(e)) => {
                report(&e);
                self.fallback(profile)
            }
            Err(_) => {
                report(&FrailtyError::Timeout(self.deadline));
                self.fallback(profile)
            }
        }
    }

    fn fallback(&self, profile: &PatientClinicalProfile) -> RiskAssessment {
        let algorithm = self.engine.algorithm_for(profile);
        let assessment = self.engine.score(profile);
        info!(
            "Using rule-based {} scoring: {} (p = {:.3})",
            algorithm, assessment.risk_level, assessment.frailty_probability
        );
        assessment
    }
}

fn report(err: &FrailtyError) {
    if err.is_unavailable() {
        warn!("Predictor unavailable, falling back to rules: {err}");
    } else {
        error!("Predictor failed, falling back to rules: {err}");
    }
}
