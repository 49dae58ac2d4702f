//! Conversion of input tables into typed rows

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use log::{debug, warn};

use super::columns::{date_column, float_column, require_columns, string_column};
use crate::algorithm::exposure::builder::has_raw_values;
use crate::config::ProfilingConfig;
use crate::error::{Error, Result};
use crate::models::{Measurement, ParticipantWindow};

pub const PERSON_ID: &str = "person_id";
pub const ZIP3: &str = "zip3";
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
pub const AQI: &str = "aqi";

/// Columns every population table must expose
pub const POPULATION_COLUMNS: [&str; 4] = [PERSON_ID, ZIP3, START_DATE, END_DATE];

/// Read participant rows from a population table
///
/// Null `person_id` and `zip3` values are kept as `None`. A null or
/// unreadable date aborts the conversion.
///
/// # Errors
/// Returns [`Error::MissingColumns`] if any of the four required columns is
/// absent, or [`Error::MalformedDate`] for a null diagnosis date.
pub fn participants_from_batch(batch: &RecordBatch) -> Result<Vec<ParticipantWindow>> {
    require_columns(batch, "population", &POPULATION_COLUMNS)?;

    let person_ids = string_column(batch, PERSON_ID)?;
    let zip3s = string_column(batch, ZIP3)?;
    let start_dates = date_column(batch, START_DATE)?;
    let end_dates = date_column(batch, END_DATE)?;

    let participants = (0..batch.num_rows())
        .map(|row| {
            let start_date = start_dates
                .value_as_date(row)
                .filter(|_| start_dates.is_valid(row))
                .ok_or_else(|| malformed(START_DATE, row))?;
            let end_date = end_dates
                .value_as_date(row)
                .filter(|_| end_dates.is_valid(row))
                .ok_or_else(|| malformed(END_DATE, row))?;

            Ok(ParticipantWindow {
                person_id: person_ids
                    .is_valid(row)
                    .then(|| person_ids.value(row).to_string()),
                zip3: zip3s.is_valid(row).then(|| zip3s.value(row).to_string()),
                start_date,
                end_date,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let reversed = reversed_periods(&participants);
    if reversed > 0 {
        warn!(
            "{reversed} participants have start_date after end_date; their data_coverage is left missing"
        );
    }

    Ok(participants)
}

/// Number of participants whose diagnosis period ends before it starts
#[must_use]
pub fn reversed_periods(participants: &[ParticipantWindow]) -> usize {
    participants
        .iter()
        .filter(|p| p.start_date > p.end_date)
        .count()
}

/// Columns a measurement table must expose for `param_name`
#[must_use]
pub fn measurement_columns<'a>(config: &'a ProfilingConfig, param_name: &str) -> Vec<&'a str> {
    let mut columns = vec![ZIP3, config.date_column.as_str(), AQI];
    if has_raw_values(param_name) {
        columns.push(config.raw_value_column.as_str());
    }
    columns
}

/// Read measurement rows for one parameter
///
/// Rows with a null zip3, date or AQI cannot be placed in a severity band and
/// are discarded. The raw value column is only read when the parameter
/// defines raw values.
///
/// # Errors
/// Returns [`Error::MissingColumns`] if a required column is absent.
pub fn measurements_from_batch(
    batch: &RecordBatch,
    config: &ProfilingConfig,
    param_name: &str,
) -> Result<Vec<Measurement>> {
    require_columns(batch, "measurement", &measurement_columns(config, param_name))?;

    let zip3s = string_column(batch, ZIP3)?;
    let dates = date_column(batch, &config.date_column)?;
    let aqis = float_column(batch, AQI)?;
    let raw_values = if has_raw_values(param_name) {
        Some(float_column(batch, &config.raw_value_column)?)
    } else {
        None
    };

    let measurements: Vec<Measurement> = (0..batch.num_rows())
        // A day whose readings all lack aqi is not a measured day here, so it
        // never reaches the open-ended top band
        .filter(|&row| zip3s.is_valid(row) && dates.is_valid(row) && aqis.is_valid(row))
        .filter_map(|row| {
            let date = dates.value_as_date(row)?;
            let raw_value = raw_values
                .as_ref()
                .and_then(|values| values.is_valid(row).then(|| values.value(row)));
            Some(Measurement {
                zip3: zip3s.value(row).to_string(),
                date,
                raw_value,
                aqi: aqis.value(row),
            })
        })
        .collect();

    let discarded = batch.num_rows() - measurements.len();
    if discarded > 0 {
        debug!("Discarded {discarded} {param_name} measurements with null zip3, date or aqi");
    }

    Ok(measurements)
}

fn malformed(column: &str, row: usize) -> Error {
    Error::MalformedDate {
        column: column.to_string(),
        row,
    }
}
