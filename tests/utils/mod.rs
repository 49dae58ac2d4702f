use std::sync::Arc;

use arrow::array::{Array, Date32Array, Float64Array, Int64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use exposure_profiler::ProfilingConfig;

/// Population row: person_id, zip3, start_date, end_date
pub type PopulationRow<'a> = (Option<&'a str>, Option<&'a str>, NaiveDate, NaiveDate);

/// Measurement row: zip3, date, raw value, aqi
pub type MeasurementRow<'a> = (&'a str, NaiveDate, Option<f64>, f64);

#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn epoch_days(date: NaiveDate) -> i32 {
    (date - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as i32
}

/// Configuration used across tests: no progress bar, small fixed pool
#[must_use]
pub fn test_config() -> ProfilingConfig {
    ProfilingConfig::default().with_progress(false).with_workers(2)
}

/// Build a population table with the four required columns plus an `age` column
#[must_use]
pub fn population_batch(rows: &[PopulationRow<'_>]) -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new("person_id", DataType::Utf8, true),
        Field::new("zip3", DataType::Utf8, true),
        Field::new("start_date", DataType::Date32, false),
        Field::new("end_date", DataType::Date32, false),
        Field::new("age", DataType::Int64, false),
    ]);
    RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
            Arc::new(Date32Array::from(
                rows.iter().map(|r| epoch_days(r.2)).collect::<Vec<_>>(),
            )),
            Arc::new(Date32Array::from(
                rows.iter().map(|r| epoch_days(r.3)).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                (0..rows.len() as i64).map(|i| 40 + i).collect::<Vec<_>>(),
            )),
        ],
    )
    .unwrap()
}

/// Build a measurement table with `zip3`, `date`, `arithmetic_mean` and `aqi`
#[must_use]
pub fn measurement_batch(rows: &[MeasurementRow<'_>]) -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new("zip3", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("arithmetic_mean", DataType::Float64, true),
        Field::new("aqi", DataType::Float64, false),
    ]);
    RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
            Arc::new(Date32Array::from(
                rows.iter().map(|r| epoch_days(r.1)).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.3).collect::<Vec<_>>())),
        ],
    )
    .unwrap()
}

/// Read a Float64 output column as options
#[must_use]
pub fn f64_values(batch: &RecordBatch, name: &str) -> Vec<Option<f64>> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("missing column {name}"))
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    array.iter().collect()
}

/// Read a UInt32 output column as options
#[must_use]
pub fn u32_values(batch: &RecordBatch, name: &str) -> Vec<Option<u32>> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("missing column {name}"))
        .as_any()
        .downcast_ref::<UInt32Array>()
        .unwrap();
    array.iter().collect()
}

/// Read an Int64 output column as options
#[must_use]
pub fn i64_values(batch: &RecordBatch, name: &str) -> Vec<Option<i64>> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("missing column {name}"))
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    array.iter().collect()
}

/// Read a Utf8 column as owned options
#[must_use]
pub fn string_values(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("missing column {name}"))
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    array.iter().map(|v| v.map(str::to_string)).collect()
}

/// Whether every statistic column of `param` is null in `row`
#[must_use]
pub fn all_stats_null(batch: &RecordBatch, param: &str, row: usize) -> bool {
    let schema = batch.schema();
    schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.name().starts_with(&format!("{param}_")))
        .all(|(i, _)| batch.column(i).is_null(row))
}

/// The parameter's severity band column names, lowest band first
#[must_use]
pub fn band_columns(param: &str) -> Vec<String> {
    ["0to25", "26to50", "51to75", "76to100", "101to150", "151plus"]
        .iter()
        .map(|label| format!("{param}_aqi_{label}_days"))
        .collect()
}
