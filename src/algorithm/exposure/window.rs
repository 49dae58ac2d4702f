//! Exposure window resolution

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};

/// Date range used to select a participant's measurements
///
/// The window opens `lookback_days` before the diagnosis start and closes on
/// the diagnosis end date. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureWindow {
    /// First day of the diagnosis period
    pub dx_start: NaiveDate,
    /// First day of the lookback window
    pub start: NaiveDate,
    /// Last day of the window (the diagnosis end date)
    pub end: NaiveDate,
}

impl ExposureWindow {
    /// Resolve the window for a diagnosis period
    ///
    /// # Errors
    /// Returns [`Error::InvalidWindow`] if the lookback start falls outside
    /// the representable date range.
    pub fn resolve(dx_start: NaiveDate, dx_end: NaiveDate, lookback_days: i64) -> Result<Self> {
        let start = Duration::try_days(lookback_days)
            .and_then(|lookback| dx_start.checked_sub_signed(lookback))
            .ok_or_else(|| {
                Error::InvalidWindow(format!(
                    "cannot move {dx_start} back by {lookback_days} days"
                ))
            })?;

        Ok(Self {
            dx_start,
            start,
            end: dx_end,
        })
    }

    /// Inclusive number of days in the diagnosis period
    ///
    /// Zero or negative when the period is reversed.
    #[must_use]
    pub fn dx_days(&self) -> i64 {
        (self.end - self.dx_start).num_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
