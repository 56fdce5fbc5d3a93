//! Progress reporting for batch scoring
//!
//! Thin helpers over indicatif so that every command shows progress the same
//! way.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Default style for the main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create the main progress bar with a standardized style
///
/// # Arguments
/// * `length` - Total number of items
/// * `description` - Optional description to display as the initial message
///
/// # Returns
/// A configured `ProgressBar`
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Progress bar that only draws when there is enough work to be worth showing
///
/// Small batches and non-interactive runs get a hidden bar, keeping stderr
/// clean for the log output.
#[must_use]
pub fn create_batch_progress_bar(length: u64, min_visible: u64) -> ProgressBar {
    let pb = create_main_progress_bar(length, Some("scoring"));
    if length < min_visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
