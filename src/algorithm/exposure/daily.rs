//! Daily aggregation of station measurements

use itertools::Itertools;

use super::window::ExposureWindow;
use crate::models::{DailyMeasurement, Measurement};

/// Arithmetic mean, `None` for an empty input
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u64), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Slice of date-ordered measurements that falls inside the window
///
/// `measurements` must be sorted by date, as returned by
/// [`MeasurementSet::match_zip3`](super::zip3::MeasurementSet::match_zip3).
#[must_use]
pub fn restrict_to_window<'a>(
    measurements: &'a [Measurement],
    window: &ExposureWindow,
) -> &'a [Measurement] {
    debug_assert!(measurements.is_sorted_by_key(|m| m.date));
    let lo = measurements.partition_point(|m| m.date < window.start);
    let hi = measurements.partition_point(|m| m.date <= window.end);
    if lo >= hi { &[] } else { &measurements[lo..hi] }
}

/// Average all stations per calendar day
///
/// Input must be sorted by date; output has one row per distinct date, in
/// date order. Raw values are averaged over the stations that reported one.
#[must_use]
pub fn aggregate_daily(measurements: &[Measurement]) -> Vec<DailyMeasurement> {
    let by_date = measurements.iter().chunk_by(|m| m.date);

    let mut daily = Vec::new();
    for (date, readings) in &by_date {
        let readings: Vec<&Measurement> = readings.collect();
        let aqi = mean(readings.iter().map(|m| m.aqi)).unwrap_or(f64::NAN);
        let raw_value = mean(readings.iter().filter_map(|m| m.raw_value));
        daily.push(DailyMeasurement {
            date,
            raw_value,
            aqi,
        });
    }
    daily
}

/// Restrict to the window, then aggregate per day
#[must_use]
pub fn daily_in_window(measurements: &[Measurement], window: &ExposureWindow) -> Vec<DailyMeasurement> {
    aggregate_daily(restrict_to_window(measurements, window))
}
