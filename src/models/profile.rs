//! Patient clinical profile
//!
//! The read-only snapshot of patient attributes that frailty scoring works
//! from. Categorical attributes use the vocabulary of the patient record
//! form; blank or unrecognized values deserialize to `Unknown`, which every
//! scorer treats as the lowest-risk category.

use serde::{Deserialize, Serialize};

use crate::models::bmi::body_mass_index;
use crate::models::serde_helpers::null_as_default;

/// Who the patient lives with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LivingStatus {
    Alone,
    WithFamily,
    WithOthers,
    CareFacility,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Yes/no clinical finding (depression, cerebrovascular disease, diabetes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalFlag {
    Yes,
    No,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ClinicalFlag {
    /// Whether the finding is positively recorded
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for ClinicalFlag {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// NYHA-style cardiac function class, ordered by severity
///
/// `Unknown` orders below `ClassI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardiacFunctionClass {
    /// No limitation of physical activity
    #[serde(rename = "I")]
    ClassI,
    /// Slight limitation
    #[serde(rename = "II")]
    ClassII,
    /// Moderate limitation; recorded as either "III" or "II-III"
    #[serde(rename = "III", alias = "II-III", alias = "II–III")]
    ClassIII,
    /// Marked limitation; recorded as either "III-IV" or "IV"
    #[serde(rename = "III-IV", alias = "IV", alias = "III–IV")]
    ClassIIIToIV,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl CardiacFunctionClass {
    /// Severity rank, 0 for an unrecorded class
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::ClassI => 1,
            Self::ClassII => 2,
            Self::ClassIII => 3,
            Self::ClassIIIToIV => 4,
        }
    }
}

impl Ord for CardiacFunctionClass {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for CardiacFunctionClass {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cognitive function as assessed at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CognitiveStatus {
    Normal,
    MildImpairment,
    ModerateImpairment,
    SevereImpairment,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Mobility level, from fully independent to wheelchair-bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MobilityStatus {
    Independent,
    AssistanceNeeded,
    MobilityAid,
    Wheelchair,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlcoholConsumption {
    Never,
    Occasional,
    Moderate,
    Heavy,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseFrequency {
    Never,
    Rarely,
    Sometimes,
    Regularly,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Snapshot of the patient attributes used for frailty scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientClinicalProfile {
    /// Age in years
    pub age: Option<u32>,

    // Attributes expected by the trained model
    #[serde(deserialize_with = "null_as_default")]
    pub living_status: LivingStatus,
    #[serde(alias = "depressionFlag")]
    #[serde(deserialize_with = "null_as_default")]
    pub depression: ClinicalFlag,
    #[serde(alias = "cardiacFunctionClass")]
    #[serde(deserialize_with = "null_as_default")]
    pub cardiac_function: CardiacFunctionClass,
    #[serde(alias = "cerebrovascularDiseaseFlag")]
    #[serde(deserialize_with = "null_as_default")]
    pub cerebrovascular_disease: ClinicalFlag,
    #[serde(alias = "diabetesFlag")]
    #[serde(deserialize_with = "null_as_default")]
    pub diabetes: ClinicalFlag,
    /// Total cholesterol (mmol/L)
    #[serde(alias = "tc")]
    pub total_cholesterol: Option<f64>,
    /// LDL cholesterol (mmol/L)
    #[serde(alias = "ldl_c")]
    pub ldl_cholesterol: Option<f64>,
    /// Hemoglobin (g/dL)
    pub hemoglobin: Option<f64>,
    /// Activities of Daily Living score, 0-100 where 100 is fully independent
    pub adl_score: Option<f64>,

    // General health and lifestyle attributes
    /// Height in centimetres
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub cognitive_status: CognitiveStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub mobility_status: MobilityStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub smoking_status: SmokingStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub alcohol_consumption: AlcoholConsumption,
    #[serde(deserialize_with = "null_as_default")]
    pub exercise_frequency: ExerciseFrequency,
    pub medical_history: Option<String>,
    /// Comma-separated list of current medications
    pub current_medications: Option<String>,
}

impl PatientClinicalProfile {
    /// Create an otherwise empty profile for a patient of the given age
    #[must_use]
    pub fn with_age(age: u32) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }

    /// Whether any of the attributes the trained model was built on are recorded
    ///
    /// Cholesterol values alone do not count: they carry no weight in the
    /// rule-based clinical score.
    #[must_use]
    pub fn has_clinical_fields(&self) -> bool {
        self.living_status != LivingStatus::Unknown
            || self.depression != ClinicalFlag::Unknown
            || self.cardiac_function != CardiacFunctionClass::Unknown
            || self.cerebrovascular_disease != ClinicalFlag::Unknown
            || self.diabetes != ClinicalFlag::Unknown
            || self.hemoglobin.is_some()
            || self.adl_score.is_some()
    }

    /// Whether any general health or lifestyle attribute is recorded
    #[must_use]
    pub fn has_lifestyle_fields(&self) -> bool {
        self.age.is_some()
            || self.height.is_some()
            || self.weight.is_some()
            || self.cognitive_status != CognitiveStatus::Unknown
            || self.mobility_status != MobilityStatus::Unknown
            || self.smoking_status != SmokingStatus::Unknown
            || self.alcohol_consumption != AlcoholConsumption::Unknown
            || self.exercise_frequency != ExerciseFrequency::Unknown
            || self.has_medical_history()
            || self.medication_count() > 0
    }

    /// BMI derived from height and weight, if both are recorded and non-zero
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        body_mass_index(self.height?, self.weight?)
    }

    /// Whether any medical history text is recorded
    #[must_use]
    pub fn has_medical_history(&self) -> bool {
        self.medical_history
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Number of non-empty comma-separated entries in the medication list
    #[must_use]
    pub fn medication_count(&self) -> usize {
        self.current_medications.as_deref().map_or(0, |meds| {
            meds.split(',').filter(|entry| !entry.trim().is_empty()).count()
        })
    }
}
