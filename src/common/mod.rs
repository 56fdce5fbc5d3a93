//! Common traits
//!
//! Seams shared by the scoring, prediction and storage modules.

pub mod traits;

pub use traits::*;
