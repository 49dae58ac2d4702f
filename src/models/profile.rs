//! Exposure profile model
//!
//! A profile is either a complete placeholder (no zip3 or no date match) or a
//! complete computed summary. Constructors enforce that the summary is present
//! exactly when the match state is [`MatchState::Matched`].

use serde::{Deserialize, Serialize};

use crate::config::BAND_COUNT;

/// Which aggregation a profiling run produces
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProfileType {
    /// Full severity-band and coverage breakdown
    #[default]
    Aqi,
    /// Share of measured days whose mean AQI exceeds `threshold`
    Ratio { threshold: f64 },
}

/// Terminal state of a single participant's profiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// No measurement exists for the participant's zip3
    NoZipMatch,
    /// The zip3 has measurements, none inside the exposure window
    NoDateMatch,
    /// Measurements were found inside the exposure window
    Matched,
}

/// Day counts per AQI severity band, lowest band first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandCounts {
    counts: [u32; BAND_COUNT],
}

impl BandCounts {
    #[must_use]
    pub fn new(counts: [u32; BAND_COUNT]) -> Self {
        Self { counts }
    }

    #[must_use]
    pub fn counts(&self) -> &[u32; BAND_COUNT] {
        &self.counts
    }

    /// Days in band `index` (0 is the cleanest band)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.counts.get(index).copied()
    }

    /// Sum over all bands
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Measured-day coverage of a participant's window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Distinct measured days in the exposure window
    pub total_measured_days: u32,
    /// Measured days on or before the diagnosis start date
    pub measured_days_before_dx: u32,
    /// Inclusive length of the diagnosis period
    pub total_dx_days: i64,
    /// `total_measured_days / total_dx_days`; `None` when the denominator is not positive
    pub data_coverage: Option<f64>,
}

/// Full AQI profile statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiSummary {
    pub all_time_mean_raw_value: Option<f64>,
    pub all_time_mean_aqi: f64,
    pub mean_raw_value: Option<f64>,
    pub mean_aqi: f64,
    pub bands: BandCounts,
    pub coverage: Coverage,
}

/// Reduced ratio-only statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioSummary {
    pub threshold: f64,
    pub days_above_threshold: u32,
    pub total_measured_days: u32,
}

impl RatioSummary {
    /// Fraction of measured days above the threshold
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        if self.total_measured_days == 0 {
            None
        } else {
            Some(f64::from(self.days_above_threshold) / f64::from(self.total_measured_days))
        }
    }
}

/// Computed statistics, shaped by the [`ProfileType`] that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExposureSummary {
    Aqi(AqiSummary),
    Ratio(RatioSummary),
}

/// One participant's exposure profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    person_id: Option<String>,
    state: MatchState,
    summary: Option<ExposureSummary>,
}

impl ExposureProfile {
    /// A profile with every statistic missing
    ///
    /// `state` must be one of the no-match states; a `Matched` placeholder is
    /// downgraded to `NoDateMatch`.
    #[must_use]
    pub fn placeholder(person_id: Option<String>, state: MatchState) -> Self {
        let state = match state {
            MatchState::Matched => MatchState::NoDateMatch,
            other => other,
        };
        Self {
            person_id,
            state,
            summary: None,
        }
    }

    /// A fully computed profile
    #[must_use]
    pub fn computed(person_id: Option<String>, summary: ExposureSummary) -> Self {
        Self {
            person_id,
            state: MatchState::Matched,
            summary: Some(summary),
        }
    }

    #[must_use]
    pub fn person_id(&self) -> Option<&str> {
        self.person_id.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.summary.is_none()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&ExposureSummary> {
        self.summary.as_ref()
    }

    /// AQI statistics, if this is a computed AQI profile
    #[must_use]
    pub fn aqi(&self) -> Option<&AqiSummary> {
        match &self.summary {
            Some(ExposureSummary::Aqi(summary)) => Some(summary),
            _ => None,
        }
    }

    /// Scalar ratio, if this is a computed ratio profile
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        match &self.summary {
            Some(ExposureSummary::Ratio(summary)) => summary.ratio(),
            _ => None,
        }
    }
}
