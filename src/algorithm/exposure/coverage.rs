//! Measured-day coverage and mean values

use super::buckets::day_count;
use super::daily::mean;
use super::window::ExposureWindow;
use crate::models::{Coverage, DailyMeasurement, Measurement};

/// Mean raw value and mean AQI over a set of rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanValues {
    /// `None` when raw values are not defined for the parameter or none were recorded
    pub raw_value: Option<f64>,
    pub aqi: Option<f64>,
}

/// Means over every measurement of a zip3, regardless of date
#[must_use]
pub fn all_time_means(measurements: &[Measurement], include_raw: bool) -> MeanValues {
    MeanValues {
        raw_value: include_raw
            .then(|| mean(measurements.iter().filter_map(|m| m.raw_value)))
            .flatten(),
        aqi: mean(measurements.iter().map(|m| m.aqi)),
    }
}

/// Means over the day-aggregated rows of a window
#[must_use]
pub fn window_means(daily: &[DailyMeasurement], include_raw: bool) -> MeanValues {
    MeanValues {
        raw_value: include_raw
            .then(|| mean(daily.iter().filter_map(|d| d.raw_value)))
            .flatten(),
        aqi: mean(daily.iter().map(|d| d.aqi)),
    }
}

/// Measured-day counts and coverage ratio for a window
///
/// A non-positive diagnosis length leaves `data_coverage` missing.
#[must_use]
pub fn compute_coverage(daily: &[DailyMeasurement], window: &ExposureWindow) -> Coverage {
    let total_measured_days = day_count(daily.len());
    let measured_days_before_dx = day_count(
        daily
            .iter()
            .filter(|d| d.date <= window.dx_start)
            .count(),
    );
    let total_dx_days = window.dx_days();

    // Reversed periods are reported once, when the population is read
    let data_coverage = (total_dx_days > 0)
        .then(|| f64::from(total_measured_days) / total_dx_days as f64);

    Coverage {
        total_measured_days,
        measured_days_before_dx,
        total_dx_days,
        data_coverage,
    }
}
