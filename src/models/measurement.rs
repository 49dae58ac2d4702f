//! Environmental measurement models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single station reading for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Geographic partition of the monitoring station
    pub zip3: String,
    /// Calendar day of the reading
    pub date: NaiveDate,
    /// Parameter-specific value (e.g. concentration); absent for the `aqi` parameter
    pub raw_value: Option<f64>,
    /// Normalized air-quality index
    pub aqi: f64,
}

impl Measurement {
    pub fn new(zip3: impl Into<String>, date: NaiveDate, raw_value: Option<f64>, aqi: f64) -> Self {
        Self {
            zip3: zip3.into(),
            date,
            raw_value,
            aqi,
        }
    }
}

/// Station-averaged values for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMeasurement {
    pub date: NaiveDate,
    /// Mean of the non-null raw values recorded that day
    pub raw_value: Option<f64>,
    /// Mean AQI across stations
    pub aqi: f64,
}
