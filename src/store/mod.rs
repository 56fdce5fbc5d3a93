//! Patient write path
//!
//! [`PatientService`] scores a patient whenever their record is created or
//! updated and keeps the latest prediction on the record. Scoring never blocks
//! a save: a record that cannot be enriched is still stored and returned.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::common::traits::{PatientStore, StoreFuture};
use crate::error::{FrailtyError, Result};
use crate::models::{PatientClinicalProfile, PatientRecord, RiskLevel, normalize_patient_id};
use crate::predictor::FrailtyAssessor;

/// Patient store held in memory
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    records: RwLock<HashMap<String, PatientRecord>>,
}

impl InMemoryPatientStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientStore for InMemoryPatientStore {
    fn save(&self, mut record: PatientRecord) -> StoreFuture<'_, PatientRecord> {
        Box::pin(async move {
            record.patient_id = normalize_patient_id(&record.patient_id);
            if record.patient_id.is_empty() {
                return Err(FrailtyError::store("Patient id must not be empty"));
            }
            let mut records = self.records.write().await;
            records.insert(record.patient_id.clone(), record.clone());
            Ok(record)
        })
    }

    fn get<'a>(&'a self, patient_id: &'a str) -> StoreFuture<'a, Option<PatientRecord>> {
        Box::pin(async move {
            let key = normalize_patient_id(patient_id);
            Ok(self.records.read().await.get(&key).cloned())
        })
    }

    fn all(&self) -> StoreFuture<'_, Vec<PatientRecord>> {
        Box::pin(async move {
            let mut records: Vec<PatientRecord> =
                self.records.read().await.values().cloned().collect();
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(records)
        })
    }
}

/// Headline numbers for the patient dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub high_risk_patients: usize,
}

/// Creates and updates patients, scoring each write
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    assessor: FrailtyAssessor,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>, assessor: FrailtyAssessor) -> Self {
        Self { store, assessor }
    }

    /// Store a new patient, then score and store them again with the prediction
    ///
    /// # Errors
    /// Only when the initial save fails. A failure to persist the prediction
    /// is logged and the record is returned as first stored.
    pub async fn create(&self, record: PatientRecord) -> Result<PatientRecord> {
        let saved = self.store.save(record).await?;
        Ok(self.score_and_save(saved).await)
    }

    /// Replace a patient's profile and re-score them
    ///
    /// The previous prediction is cleared with the profile change, so a
    /// failure to store the new one leaves the record unscored.
    ///
    /// # Errors
    /// When no patient has `patient_id`, or the profile update cannot be saved.
    pub async fn update(
        &self,
        patient_id: &str,
        profile: PatientClinicalProfile,
    ) -> Result<PatientRecord> {
        let mut record = self
            .store
            .get(patient_id)
            .await?
            .ok_or_else(|| FrailtyError::store(format!("Patient {patient_id} not found")))?;

        record.profile = profile;
        record.frailty_prediction = None;
        record.updated_at = Utc::now();
        let saved = self.store.save(record).await?;
        Ok(self.score_and_save(saved).await)
    }

    /// Fetch a patient by id
    pub async fn get(&self, patient_id: &str) -> Result<Option<PatientRecord>> {
        self.store.get(patient_id).await
    }

    /// Count active patients and those currently assessed as high risk
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let records = self.store.all().await?;
        let active = records.iter().filter(|r| r.is_active);

        let mut stats = DashboardStats::default();
        for record in active {
            stats.total_patients += 1;
            if record.risk_level() == Some(RiskLevel::High) {
                stats.high_risk_patients += 1;
            }
        }
        Ok(stats)
    }

    async fn score_and_save(&self, record: PatientRecord) -> PatientRecord {
        let assessment = self.assessor.obtain_risk_assessment(&record.profile).await;

        let mut enriched = record.clone();
        enriched.attach_assessment(&assessment);

        match self.store.save(enriched).await {
            Ok(saved) => {
                info!(
                    "Patient {} assessed as {} risk",
                    saved.patient_id, assessment.risk_level
                );
                saved
            }
            Err(e) => {
                error!(
                    "Failed to store frailty prediction for patient {}: {e}",
                    record.patient_id
                );
                record
            }
        }
    }
}
