//! Logging utilities
//!
//! Standardized log lines for batch operations.

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on an input source
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `source` - Input being processed; `None` for standard input
pub fn log_operation_start(operation: &str, source: Option<&Path>) {
    log::info!("{} {}", operation, describe_source(source));
}

/// Log the completion of a batch operation
///
/// # Arguments
/// * `operation` - Past-tense description of the operation
/// * `items` - Number of items processed
/// * `fallbacks` - How many of them were scored by the rule-based engine
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    items: usize,
    fallbacks: usize,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {operation} {items} profiles ({fallbacks} by rule-based fallback) in {duration:?}"
        );
    } else {
        log::info!("Successfully {operation} {items} profiles ({fallbacks} by rule-based fallback)");
    }
}

/// Log a warning, optionally tied to an input source
pub fn log_warning(message: &str, source: Option<&Path>) {
    if let Some(path) = source {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Display name for an input source
#[must_use]
pub fn describe_source(source: Option<&Path>) -> String {
    source.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}
