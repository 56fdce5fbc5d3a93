//! Patient store trait
//!
//! Persistence seam for the patient write path. Implementations may be
//! backed by a database; [`crate::store::InMemoryPatientStore`] keeps records
//! in memory.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::models::PatientRecord;

/// Boxed future returned by store operations
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Storage for patient records, keyed by patient id
pub trait PatientStore: Send + Sync {
    /// Insert or replace a record, returning the stored version
    fn save(&self, record: PatientRecord) -> StoreFuture<'_, PatientRecord>;

    /// Fetch a record by id
    fn get<'a>(&'a self, patient_id: &'a str) -> StoreFuture<'a, Option<PatientRecord>>;

    /// All records, newest first
    fn all(&self) -> StoreFuture<'_, Vec<PatientRecord>>;
}
