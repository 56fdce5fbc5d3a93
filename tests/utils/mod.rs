//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use frailty_risk::PredictorConfig;
use frailty_risk::config::DEFAULT_ARTIFACTS;
use frailty_risk::models::{
    CardiacFunctionClass, ClinicalFlag, LivingStatus, PatientClinicalProfile,
};

/// Fixed timestamp so that assessments compare equal
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Every clinical field at its lowest-risk value
#[must_use]
pub fn lowest_risk_clinical() -> PatientClinicalProfile {
    PatientClinicalProfile {
        age: Some(60),
        living_status: LivingStatus::WithFamily,
        depression: ClinicalFlag::No,
        cardiac_function: CardiacFunctionClass::ClassI,
        cerebrovascular_disease: ClinicalFlag::No,
        diabetes: ClinicalFlag::No,
        hemoglobin: Some(13.0),
        adl_score: Some(90.0),
        ..Default::default()
    }
}

/// Every clinical field at its highest-risk value
#[must_use]
pub fn highest_risk_clinical() -> PatientClinicalProfile {
    PatientClinicalProfile {
        age: Some(86),
        living_status: LivingStatus::Alone,
        depression: ClinicalFlag::Yes,
        cardiac_function: CardiacFunctionClass::ClassIIIToIV,
        cerebrovascular_disease: ClinicalFlag::Yes,
        diabetes: ClinicalFlag::Yes,
        hemoglobin: Some(10.8),
        adl_score: Some(45.0),
        ..Default::default()
    }
}

/// 75-year-old diabetic living with family, mild anaemia, ADL 85
#[must_use]
pub fn diabetic_with_family() -> PatientClinicalProfile {
    PatientClinicalProfile {
        age: Some(75),
        living_status: LivingStatus::WithFamily,
        depression: ClinicalFlag::No,
        cardiac_function: CardiacFunctionClass::ClassII,
        cerebrovascular_disease: ClinicalFlag::No,
        diabetes: ClinicalFlag::Yes,
        hemoglobin: Some(11.5),
        adl_score: Some(85.0),
        ..Default::default()
    }
}

/// A model directory holding every required artifact
pub fn model_dir_with_artifacts(root: &Path) -> PathBuf {
    let dir = root.join("ml_models");
    std::fs::create_dir_all(&dir).unwrap();
    for artifact in DEFAULT_ARTIFACTS {
        std::fs::write(dir.join(artifact), b"stub").unwrap();
    }
    dir
}

/// Write an executable shell script standing in for the predictor
pub fn predictor_script(root: &Path, name: &str, body: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    path
}

/// Config running `script` with `sh` against a populated model directory
pub fn script_config(root: &Path, script: &Path, timeout: Duration) -> PredictorConfig {
    PredictorConfig::default()
        .with_command("sh", &[script.to_str().unwrap()])
        .with_model_dir(model_dir_with_artifacts(root))
        .with_timeout(timeout)
}
