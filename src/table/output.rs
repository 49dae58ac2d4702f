//! Conversion of exposure profiles into an Arrow table
//!
//! Profiles are flattened into row structs and serialized with serde_arrow
//! against a fixed schema, so placeholder-only batches keep the same column
//! types as computed ones. Columns are then renamed to the
//! `{param}_{statistic}` convention.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::convert::PERSON_ID;
use crate::config::{BAND_COUNT, SeverityBands};
use crate::error::Result;
use crate::models::{ExposureProfile, ProfileType};

#[derive(Debug, Serialize)]
struct AqiProfileRow {
    person_id: Option<String>,
    all_time_mean_raw_value: Option<f64>,
    all_time_mean_aqi: Option<f64>,
    mean_raw_value: Option<f64>,
    mean_aqi: Option<f64>,
    band_0_days: Option<u32>,
    band_1_days: Option<u32>,
    band_2_days: Option<u32>,
    band_3_days: Option<u32>,
    band_4_days: Option<u32>,
    band_5_days: Option<u32>,
    measured_days_before_dx: Option<u32>,
    total_measured_days: Option<u32>,
    total_dx_days: Option<i64>,
    data_coverage: Option<f64>,
}

impl From<&ExposureProfile> for AqiProfileRow {
    fn from(profile: &ExposureProfile) -> Self {
        let summary = profile.aqi();
        let band = |i: usize| summary.and_then(|s| s.bands.get(i));
        Self {
            person_id: profile.person_id().map(str::to_string),
            all_time_mean_raw_value: summary.and_then(|s| s.all_time_mean_raw_value),
            all_time_mean_aqi: summary.map(|s| s.all_time_mean_aqi),
            mean_raw_value: summary.and_then(|s| s.mean_raw_value),
            mean_aqi: summary.map(|s| s.mean_aqi),
            band_0_days: band(0),
            band_1_days: band(1),
            band_2_days: band(2),
            band_3_days: band(3),
            band_4_days: band(4),
            band_5_days: band(5),
            measured_days_before_dx: summary.map(|s| s.coverage.measured_days_before_dx),
            total_measured_days: summary.map(|s| s.coverage.total_measured_days),
            total_dx_days: summary.map(|s| s.coverage.total_dx_days),
            data_coverage: summary.and_then(|s| s.coverage.data_coverage),
        }
    }
}

#[derive(Debug, Serialize)]
struct RatioProfileRow {
    person_id: Option<String>,
    aqi_ratio: Option<f64>,
}

impl From<&ExposureProfile> for RatioProfileRow {
    fn from(profile: &ExposureProfile) -> Self {
        Self {
            person_id: profile.person_id().map(str::to_string),
            aqi_ratio: profile.ratio(),
        }
    }
}

fn aqi_row_fields() -> Vec<Field> {
    let mut fields = vec![
        Field::new(PERSON_ID, DataType::Utf8, true),
        Field::new("all_time_mean_raw_value", DataType::Float64, true),
        Field::new("all_time_mean_aqi", DataType::Float64, true),
        Field::new("mean_raw_value", DataType::Float64, true),
        Field::new("mean_aqi", DataType::Float64, true),
    ];
    fields.extend((0..BAND_COUNT).map(|i| Field::new(format!("band_{i}_days"), DataType::UInt32, true)));
    fields.extend([
        Field::new("measured_days_before_dx", DataType::UInt32, true),
        Field::new("total_measured_days", DataType::UInt32, true),
        Field::new("total_dx_days", DataType::Int64, true),
        Field::new("data_coverage", DataType::Float64, true),
    ]);
    fields
}

fn ratio_row_fields() -> Vec<Field> {
    vec![
        Field::new(PERSON_ID, DataType::Utf8, true),
        Field::new("aqi_ratio", DataType::Float64, true),
    ]
}

/// Output column name for a row field
fn output_name(param_name: &str, field: &str, labels: &[String; BAND_COUNT]) -> String {
    if field == PERSON_ID {
        return field.to_string();
    }
    let band = field
        .strip_prefix("band_")
        .and_then(|rest| rest.strip_suffix("_days"))
        .and_then(|i| i.parse::<usize>().ok())
        .and_then(|i| labels.get(i));
    match band {
        Some(label) => format!("{param_name}_aqi_{label}_days"),
        None => format!("{param_name}_{field}"),
    }
}

/// Output column names, in order, for a parameter and profile type
#[must_use]
pub fn profile_column_names(
    param_name: &str,
    profile_type: ProfileType,
    bands: &SeverityBands,
) -> Vec<String> {
    let labels = bands.labels();
    let fields = match profile_type {
        ProfileType::Aqi => aqi_row_fields(),
        ProfileType::Ratio { .. } => ratio_row_fields(),
    };
    fields
        .iter()
        .map(|f| output_name(param_name, f.name(), &labels))
        .collect()
}

/// Build the profile table, one row per profile in the given order
pub fn profiles_to_batch(
    profiles: &[ExposureProfile],
    param_name: &str,
    profile_type: ProfileType,
    bands: &SeverityBands,
) -> Result<RecordBatch> {
    let (fields, batch) = match profile_type {
        ProfileType::Aqi => {
            let fields: Vec<FieldRef> = aqi_row_fields().into_iter().map(Arc::new).collect();
            let rows: Vec<AqiProfileRow> = profiles.iter().map(AqiProfileRow::from).collect();
            let batch = serde_arrow::to_record_batch(&fields, &rows)?;
            (fields, batch)
        }
        ProfileType::Ratio { .. } => {
            let fields: Vec<FieldRef> = ratio_row_fields().into_iter().map(Arc::new).collect();
            let rows: Vec<RatioProfileRow> = profiles.iter().map(RatioProfileRow::from).collect();
            let batch = serde_arrow::to_record_batch(&fields, &rows)?;
            (fields, batch)
        }
    };

    let labels = bands.labels();
    let renamed: Vec<Field> = fields
        .iter()
        .map(|f| {
            Field::new(
                output_name(param_name, f.name(), &labels),
                f.data_type().clone(),
                f.is_nullable(),
            )
        })
        .collect();

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(renamed)),
        batch.columns().to_vec(),
    )?)
}
