//! Engine entry point
//!
//! [`ExposureProfiler`] takes a population table and a measurement table for
//! one environmental parameter, profiles every participant in parallel and
//! returns the population with the profile columns attached.

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;

use crate::algorithm::exposure::{MeasurementSet, ProfileBuilder, dispatch_profiles};
use crate::config::ProfilingConfig;
use crate::error::Result;
use crate::io::{read_parquet, write_parquet};
use crate::models::{ExposureProfile, ParticipantWindow, ProfileType};
use crate::table::columns::require_columns;
use crate::table::{
    POPULATION_COLUMNS, join_profiles, measurements_from_batch, participants_from_batch,
    profiles_to_batch,
};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Exposure profiling engine
#[derive(Debug, Clone, Default)]
pub struct ExposureProfiler {
    config: ProfilingConfig,
}

impl ExposureProfiler {
    /// Create a profiler with a validated configuration
    pub fn new(config: ProfilingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ProfilingConfig {
        &self.config
    }

    /// Profile every participant of `population` and join the result back
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingColumns`] before any work is done if
    /// either table lacks a required column. Any per-participant failure
    /// aborts the whole call.
    pub fn profile_table(
        &self,
        population: &RecordBatch,
        measurements: &RecordBatch,
        param_name: &str,
        profile_type: ProfileType,
    ) -> Result<RecordBatch> {
        let start = Instant::now();
        log_operation_start("Profiling exposure to", param_name);

        require_columns(population, "population", &POPULATION_COLUMNS)?;
        let participants = participants_from_batch(population)?;
        let measurement_set =
            MeasurementSet::new(measurements_from_batch(measurements, &self.config, param_name)?);
        info!(
            "Loaded {} {param_name} measurements across {} zip3 regions",
            measurement_set.len(),
            measurement_set.region_count()
        );

        let profiles =
            self.profile_participants(&participants, &measurement_set, param_name, profile_type)?;
        let profile_batch =
            profiles_to_batch(&profiles, param_name, profile_type, &self.config.bands)?;
        let joined = join_profiles(population, &profile_batch, self.config.join_policy)?;

        log_operation_complete("profiled", param_name, joined.num_rows(), Some(start.elapsed()));
        Ok(joined)
    }

    /// Profile typed participants against a prepared measurement set
    ///
    /// Profiles are returned in participant order.
    pub fn profile_participants(
        &self,
        participants: &[ParticipantWindow],
        measurements: &MeasurementSet,
        param_name: &str,
        profile_type: ProfileType,
    ) -> Result<Vec<ExposureProfile>> {
        let builder = ProfileBuilder::new(measurements, param_name, profile_type, &self.config);
        dispatch_profiles(participants, &builder, &self.config)
    }

    /// Read both tables from Parquet, profile, and write the joined table
    pub fn profile_parquet_files(
        &self,
        population_path: &Path,
        measurement_path: &Path,
        output_path: &Path,
        param_name: &str,
        profile_type: ProfileType,
    ) -> Result<RecordBatch> {
        let population = read_parquet(population_path)?;
        let measurements = read_parquet(measurement_path)?;
        let joined = self.profile_table(&population, &measurements, param_name, profile_type)?;
        write_parquet(output_path, &joined)?;
        Ok(joined)
    }
}

/// Profile a population with the default configuration
///
/// # Errors
/// See [`ExposureProfiler::profile_table`].
pub fn create_param_profile(
    population: &RecordBatch,
    measurements: &RecordBatch,
    param_name: &str,
    profile_type: ProfileType,
) -> Result<RecordBatch> {
    ExposureProfiler::default().profile_table(population, measurements, param_name, profile_type)
}
