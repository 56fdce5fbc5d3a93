//! Serde helpers shared by the patient models

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a patient id in its normalized, upper-case form
pub fn patient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|id| crate::models::patient::normalize_patient_id(&id))
}
