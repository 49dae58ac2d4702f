//! AQI severity band classification
//!
//! Days are counted against cumulative `<=` thresholds and the cumulative
//! counts are differenced, so every day lands in exactly one band and a day
//! sitting on a threshold belongs to the band that threshold closes.

use crate::config::{BAND_COUNT, SeverityBands};
use crate::models::{BandCounts, DailyMeasurement};

/// Saturating conversion of a day count
pub(crate) fn day_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Days whose mean AQI is at or below `threshold`
#[must_use]
pub fn count_at_or_below(daily: &[DailyMeasurement], threshold: f64) -> u32 {
    day_count(daily.iter().filter(|d| d.aqi <= threshold).count())
}

/// Days whose mean AQI is strictly above `threshold`
#[must_use]
pub fn count_above(daily: &[DailyMeasurement], threshold: f64) -> u32 {
    day_count(daily.len()) - count_at_or_below(daily, threshold)
}

/// Count days per severity band
#[must_use]
pub fn classify(daily: &[DailyMeasurement], bands: &SeverityBands) -> BandCounts {
    let thresholds = *bands.thresholds();
    let cumulative = thresholds.map(|t| count_at_or_below(daily, f64::from(t)));
    let total = day_count(daily.len());

    let mut counts = [0_u32; BAND_COUNT];
    counts[0] = cumulative[0];
    for i in 1..cumulative.len() {
        counts[i] = cumulative[i] - cumulative[i - 1];
    }
    counts[BAND_COUNT - 1] = total - cumulative[cumulative.len() - 1];

    BandCounts::new(counts)
}
