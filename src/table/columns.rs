//! Utilities for extracting typed columns from Arrow record batches.
//!
//! Columns are cast to the type the profiler works with when the input uses
//! a compatible but different representation (e.g. `LargeUtf8`, `Int32` zip3
//! codes, `Timestamp` dates).

use arrow::array::{Array, ArrayRef, Date32Array, Float64Array, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Check that every required column is present
///
/// # Errors
/// Returns [`Error::MissingColumns`] listing every absent column.
pub fn require_columns(batch: &RecordBatch, table: &str, required: &[&str]) -> Result<()> {
    let schema = batch.schema();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| schema.index_of(name).is_err())
        .map(|name| (*name).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::missing_columns(table, missing))
    }
}

/// Get a column by name, cast to `expected_type` if needed
pub fn get_column(batch: &RecordBatch, column_name: &str, expected_type: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::missing_columns("input", vec![column_name.to_string()]))?;

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(column.clone());
    }

    if !cast::can_cast_types(actual_type, expected_type) {
        return Err(invalid_type(column_name, expected_type));
    }

    debug!("Casting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    cast::cast(column, expected_type).map_err(|_| invalid_type(column_name, expected_type))
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Read a column as UTF-8 strings
pub fn string_column(batch: &RecordBatch, column_name: &str) -> Result<StringArray> {
    let array = get_column(batch, column_name, &DataType::Utf8)?;
    Ok(downcast_array::<StringArray>(&array, column_name, "Utf8")?.clone())
}

/// Read a column as calendar dates
pub fn date_column(batch: &RecordBatch, column_name: &str) -> Result<Date32Array> {
    let array = get_column(batch, column_name, &DataType::Date32)?;
    Ok(downcast_array::<Date32Array>(&array, column_name, "Date32")?.clone())
}

/// Read a column as 64-bit floats
pub fn float_column(batch: &RecordBatch, column_name: &str) -> Result<Float64Array> {
    let array = get_column(batch, column_name, &DataType::Float64)?;
    Ok(downcast_array::<Float64Array>(&array, column_name, "Float64")?.clone())
}

fn invalid_type(column_name: &str, expected_type: &DataType) -> Error {
    Error::InvalidDataType {
        column: column_name.to_string(),
        expected: format!("{expected_type:?}"),
    }
}
