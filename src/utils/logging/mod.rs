//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{describe_source, log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_batch_progress_bar, create_main_progress_bar, finish_progress_bar};
