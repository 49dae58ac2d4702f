//! Configuration for exposure profiling.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of days the exposure window reaches back before diagnosis start
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Default upper bounds of the AQI severity bands
pub const DEFAULT_AQI_THRESHOLDS: [u32; 5] = [25, 50, 75, 100, 150];

/// Number of severity bands, including the open-ended top band
pub const BAND_COUNT: usize = DEFAULT_AQI_THRESHOLDS.len() + 1;

/// Ordered AQI severity thresholds
///
/// Each threshold is the inclusive upper bound of a band. A sixth band
/// collects everything above the last threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 5]", into = "[u32; 5]")]
pub struct SeverityBands {
    thresholds: [u32; 5],
}

impl SeverityBands {
    /// Create bands from strictly ascending thresholds
    pub fn new(thresholds: [u32; 5]) -> Result<Self> {
        if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidConfig(format!(
                "severity thresholds must be strictly ascending, got {thresholds:?}"
            )));
        }
        Ok(Self { thresholds })
    }

    /// Inclusive upper bounds of the closed bands
    #[must_use]
    pub fn thresholds(&self) -> &[u32; 5] {
        &self.thresholds
    }

    /// Labels used in output column names, e.g. `0to25`, `26to50`, `151plus`
    #[must_use]
    pub fn labels(&self) -> [String; BAND_COUNT] {
        let t = &self.thresholds;
        [
            format!("0to{}", t[0]),
            format!("{}to{}", t[0] + 1, t[1]),
            format!("{}to{}", t[1] + 1, t[2]),
            format!("{}to{}", t[2] + 1, t[3]),
            format!("{}to{}", t[3] + 1, t[4]),
            format!("{}plus", t[4].saturating_add(1)),
        ]
    }
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_AQI_THRESHOLDS,
        }
    }
}

impl TryFrom<[u32; 5]> for SeverityBands {
    type Error = Error;

    fn try_from(thresholds: [u32; 5]) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<SeverityBands> for [u32; 5] {
    fn from(bands: SeverityBands) -> Self {
        bands.thresholds
    }
}

/// How profiles are attached back onto the population table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Keep every population row; rows without a profile key get null profile columns
    #[default]
    Left,
    /// Keep only population rows whose `person_id` matches a profile
    Inner,
}

/// Configuration for the exposure profiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Days subtracted from the diagnosis start to open the lookback window
    pub lookback_days: i64,
    /// AQI severity bands
    pub bands: SeverityBands,
    /// Worker threads; `None` uses available parallelism minus one
    pub workers: Option<usize>,
    /// Name of the measurement date column
    pub date_column: String,
    /// Name of the raw measurement value column
    pub raw_value_column: String,
    /// Whether to draw a progress bar while dispatching
    pub show_progress: bool,
    /// Join policy used when reconciling profiles with the population
    pub join_policy: JoinPolicy,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            bands: SeverityBands::default(),
            workers: None,
            date_column: "date".to_string(),
            raw_value_column: "arithmetic_mean".to_string(),
            show_progress: true,
            join_policy: JoinPolicy::default(),
        }
    }
}

impl ProfilingConfig {
    /// Load configuration from a JSON file; absent keys fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with `EXPOSURE_WORKERS` / `EXPOSURE_LOOKBACK_DAYS` applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(workers) = env_value::<usize>("EXPOSURE_WORKERS") {
            config.workers = Some(workers);
        }
        if let Some(days) = env_value::<i64>("EXPOSURE_LOOKBACK_DAYS") {
            config.lookback_days = days;
        }
        config
    }

    /// Check invariants that serde and the builder methods cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days < 0 {
            return Err(Error::InvalidConfig(format!(
                "lookback_days must be non-negative, got {}",
                self.lookback_days
            )));
        }
        if self.workers == Some(0) {
            return Err(Error::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.date_column.is_empty() || self.raw_value_column.is_empty() {
            return Err(Error::InvalidConfig(
                "column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads the dispatcher will use
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| num_cpus::get().saturating_sub(1))
            .max(1)
    }

    #[must_use]
    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: SeverityBands) -> Self {
        self.bands = bands;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    #[must_use]
    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    #[must_use]
    pub fn with_raw_value_column(mut self, column: impl Into<String>) -> Self {
        self.raw_value_column = column.into();
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub fn with_join_policy(mut self, policy: JoinPolicy) -> Self {
        self.join_policy = policy;
        self
    }
}

impl fmt::Display for ProfilingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profiling Configuration:")?;
        writeln!(f, "  Lookback Days: {}", self.lookback_days)?;
        writeln!(f, "  AQI Thresholds: {:?}", self.bands.thresholds())?;
        writeln!(f, "  Workers: {}", self.worker_count())?;
        writeln!(f, "  Date Column: {}", self.date_column)?;
        writeln!(f, "  Raw Value Column: {}", self.raw_value_column)?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        writeln!(f, "  Join Policy: {:?}", self.join_policy)?;
        Ok(())
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Option<T> {
    parse_env_value(std::env::var(key).ok().as_deref())
}

fn parse_env_value<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| s.trim().parse::<T>().ok())
}
