//! Parquet file operations
//!
//! Population and measurement tables are read into a single record batch;
//! the joined profile table is written back as one Parquet file.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a Parquet file into one record batch
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", &path.display().to_string());

    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    let batch = concat_batches(&schema, &batches)?;

    log_operation_complete(
        "read",
        &path.display().to_string(),
        batch.num_rows(),
        Some(start.elapsed()),
    );
    Ok(batch)
}

/// Write a record batch to a Parquet file, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be created or written
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete(
        "wrote",
        &path.display().to_string(),
        batch.num_rows(),
        Some(start.elapsed()),
    );
    Ok(())
}
