//! Utility functions for error handling
//!
//! Filesystem checks that report problems as [`FrailtyError`] values with the
//! offending paths attached.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FrailtyError, Result};

/// Check that every required artifact exists as a regular file in `dir`
///
/// # Arguments
/// * `dir` - Directory holding the model artifacts
/// * `artifacts` - File names that must be present
///
/// # Returns
/// The full paths of the artifacts, in the order given
///
/// # Errors
/// Returns [`FrailtyError::ArtifactsMissing`] listing every missing file
pub fn require_artifacts<S: AsRef<str>>(dir: &Path, artifacts: &[S]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::with_capacity(artifacts.len());
    let mut missing = Vec::new();

    for artifact in artifacts {
        let path = dir.join(artifact.as_ref());
        if path.is_file() {
            found.push(path);
        } else {
            missing.push(artifact.as_ref().to_string());
        }
    }

    if missing.is_empty() {
        Ok(found)
    } else {
        Err(FrailtyError::ArtifactsMissing {
            dir: dir.to_path_buf(),
            missing,
        })
    }
}

/// Read a file to a string, attaching the path and purpose to any error
pub fn read_to_string_with_context(path: &Path, purpose: &str) -> Result<String> {
    if !path.is_file() {
        return Err(FrailtyError::config(format!(
            "{} not found: {}",
            purpose,
            path.display()
        )));
    }

    fs::read_to_string(path).map_err(|e| {
        FrailtyError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {} {}: {}", purpose, path.display(), e),
        ))
    })
}
