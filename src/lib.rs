//! A Rust library for profiling environmental exposure of a study population
//!
//! For each participant, air-quality measurements from the participant's
//! zip3 region are restricted to a window around the diagnosis period,
//! averaged per day, bucketed by AQI severity, and summarized with coverage
//! statistics. Participants are profiled in parallel and the profiles are
//! joined back onto the population table.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod profiler;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{JoinPolicy, ProfilingConfig, SeverityBands};
pub use error::{Error, Result};
pub use profiler::{ExposureProfiler, create_param_profile};

// Domain types
pub use algorithm::exposure::{ExposureWindow, MeasurementSet, ProfileBuilder};
pub use models::{ExposureProfile, MatchState, Measurement, ParticipantWindow, ProfileType};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Utility functions
pub use io::{read_parquet, write_parquet};
pub use utils::logging::init_logging;
