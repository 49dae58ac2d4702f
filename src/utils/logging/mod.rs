//! Logging utilities for output and progress tracking
//!
//! This module provides logger setup, standardized operation logging, and
//! progress bars for long-running dispatches.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{init_logging, log_operation_complete, log_operation_start};
pub use self::progress::{create_main_progress_bar, finish_progress_bar, profiling_progress_bar};
