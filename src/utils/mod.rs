//! Shared utilities

pub mod logging;

pub use logging::{
    create_batch_progress_bar, describe_source, finish_progress_bar, log_operation_complete,
    log_operation_start, log_warning,
};
