//! Environmental exposure profiling
//!
//! For each participant the pipeline:
//!
//! 1. Resolves the exposure window from the diagnosis period
//! 2. Selects the measurements recorded in the participant's zip3
//! 3. Restricts them to the window and averages stations per calendar day
//! 4. Counts days per AQI severity band
//! 5. Derives measured-day coverage and mean values
//!
//! The dispatcher runs the pipeline for every participant on a bounded
//! worker pool and returns the profiles in input order.

pub mod buckets;
pub mod builder;
pub mod coverage;
pub mod daily;
pub mod dispatch;
pub mod window;
pub mod zip3;

// Re-export key types
pub use builder::ProfileBuilder;
pub use dispatch::dispatch_profiles;
pub use window::ExposureWindow;
pub use zip3::MeasurementSet;
