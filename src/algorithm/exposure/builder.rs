//! Per-participant profile construction
//!
//! Each call ends in one of three terminal states:
//!
//! - no measurement in the participant's zip3: placeholder profile
//! - zip3 matched but nothing inside the exposure window: placeholder profile
//! - measurements inside the window: computed profile
//!
//! No partially filled profile ever leaves this module.

use chrono::NaiveDate;
use log::trace;

use super::buckets::{classify, count_above, day_count};
use super::coverage::{all_time_means, compute_coverage, window_means};
use super::daily::daily_in_window;
use super::window::ExposureWindow;
use super::zip3::MeasurementSet;
use crate::config::{ProfilingConfig, SeverityBands};
use crate::error::Result;
use crate::models::{
    AqiSummary, DailyMeasurement, ExposureProfile, ExposureSummary, MatchState, Measurement,
    ParticipantWindow, ProfileType, RatioSummary,
};

/// Name of the synthetic parameter whose only value is the AQI itself
pub const AQI_PARAMETER: &str = "aqi";

/// Whether raw-value statistics are defined for a parameter
#[must_use]
pub fn has_raw_values(param_name: &str) -> bool {
    !param_name.eq_ignore_ascii_case(AQI_PARAMETER)
}

/// Builds exposure profiles for one parameter against a shared measurement set
#[derive(Debug, Clone)]
pub struct ProfileBuilder<'a> {
    measurements: &'a MeasurementSet,
    profile_type: ProfileType,
    bands: SeverityBands,
    lookback_days: i64,
    include_raw: bool,
}

impl<'a> ProfileBuilder<'a> {
    /// Create a builder; the profile type is fixed for every participant it builds
    #[must_use]
    pub fn new(
        measurements: &'a MeasurementSet,
        param_name: &str,
        profile_type: ProfileType,
        config: &ProfilingConfig,
    ) -> Self {
        Self {
            measurements,
            profile_type,
            bands: config.bands,
            lookback_days: config.lookback_days,
            include_raw: has_raw_values(param_name),
        }
    }

    #[must_use]
    pub fn profile_type(&self) -> ProfileType {
        self.profile_type
    }

    /// Build the profile for a participant row
    pub fn build(&self, participant: &ParticipantWindow) -> Result<ExposureProfile> {
        self.build_for(
            participant.zip3.as_deref(),
            participant.start_date,
            participant.end_date,
            participant.person_id.as_deref(),
        )
    }

    /// Build a profile from loose values
    ///
    /// Without a `person_id` the profile carries no join key and is meant to be
    /// read directly, e.g. through [`ExposureProfile::ratio`].
    ///
    /// # Errors
    /// Returns an error if the exposure window cannot be resolved.
    pub fn build_for(
        &self,
        zip3: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        person_id: Option<&str>,
    ) -> Result<ExposureProfile> {
        let person_id = person_id.map(str::to_string);
        let window = ExposureWindow::resolve(start_date, end_date, self.lookback_days)?;

        let matched = zip3.map_or(&[][..], |z| self.measurements.match_zip3(z));
        if matched.is_empty() {
            trace!("No measurements for zip3 {zip3:?}");
            return Ok(ExposureProfile::placeholder(person_id, MatchState::NoZipMatch));
        }

        let daily = daily_in_window(matched, &window);
        if daily.is_empty() {
            trace!(
                "No measurements for zip3 {zip3:?} between {} and {}",
                window.start, window.end
            );
            return Ok(ExposureProfile::placeholder(person_id, MatchState::NoDateMatch));
        }

        let summary = match self.profile_type {
            ProfileType::Aqi => ExposureSummary::Aqi(self.aqi_summary(matched, &daily, &window)),
            ProfileType::Ratio { threshold } => {
                ExposureSummary::Ratio(ratio_summary(&daily, threshold))
            }
        };

        Ok(ExposureProfile::computed(person_id, summary))
    }

    fn aqi_summary(
        &self,
        matched: &[Measurement],
        daily: &[DailyMeasurement],
        window: &ExposureWindow,
    ) -> AqiSummary {
        let all_time = all_time_means(matched, self.include_raw);
        let windowed = window_means(daily, self.include_raw);

        AqiSummary {
            all_time_mean_raw_value: all_time.raw_value,
            // Both inputs are non-empty here, so the AQI means are defined
            all_time_mean_aqi: all_time.aqi.unwrap_or(f64::NAN),
            mean_raw_value: windowed.raw_value,
            mean_aqi: windowed.aqi.unwrap_or(f64::NAN),
            bands: classify(daily, &self.bands),
            coverage: compute_coverage(daily, window),
        }
    }
}

fn ratio_summary(daily: &[DailyMeasurement], threshold: f64) -> RatioSummary {
    RatioSummary {
        threshold,
        days_above_threshold: count_above(daily, threshold),
        total_measured_days: day_count(daily.len()),
    }
}
