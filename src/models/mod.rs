//! Domain models for exposure profiling
//!
//! Participants and measurements are read-only inputs; profiles are the
//! per-participant output records.

pub mod measurement;
pub mod participant;
pub mod profile;

// Re-export commonly used types
pub use measurement::{DailyMeasurement, Measurement};
pub use participant::ParticipantWindow;
pub use profile::{
    AqiSummary, BandCounts, Coverage, ExposureProfile, ExposureSummary, MatchState, ProfileType,
    RatioSummary,
};
