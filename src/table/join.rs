//! Reconciliation of profiles with the population table

use std::sync::Arc;

use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::{info, warn};
use rustc_hash::FxHashMap;

use super::columns::string_column;
use super::convert::PERSON_ID;
use crate::config::JoinPolicy;
use crate::error::{Error, Result};

/// Attach profile columns to the population by `person_id`
///
/// With [`JoinPolicy::Left`] every population row is kept and rows without a
/// matching profile get null profile columns. [`JoinPolicy::Inner`] drops
/// them. Population order is preserved in both cases.
///
/// # Errors
/// Returns [`Error::DuplicatePersonId`] if a non-null `person_id` appears
/// twice among the profiles, or [`Error::MissingColumns`] if either table
/// lacks `person_id`.
pub fn join_profiles(
    population: &RecordBatch,
    profiles: &RecordBatch,
    policy: JoinPolicy,
) -> Result<RecordBatch> {
    let population_ids = string_column(population, PERSON_ID)?;
    let profile_ids = string_column(profiles, PERSON_ID)?;

    let population_rows = row_count(population, "population")?;
    row_count(profiles, "profile")?;

    let mut profile_index: FxHashMap<&str, u32> = FxHashMap::default();
    for (row, id) in (0..).zip(profile_ids.iter()) {
        let Some(id) = id else { continue };
        if profile_index.insert(id, row).is_some() {
            return Err(Error::DuplicatePersonId(id.to_string()));
        }
    }

    let matches: Vec<Option<u32>> = population_ids
        .iter()
        .map(|id| id.and_then(|id| profile_index.get(id).copied()))
        .collect();
    let unmatched = matches.iter().filter(|m| m.is_none()).count();

    let (left_rows, right_rows): (Vec<u32>, Vec<Option<u32>>) = match policy {
        JoinPolicy::Left => (0..population_rows).zip(matches).unzip(),
        JoinPolicy::Inner => (0..population_rows)
            .zip(matches)
            .filter(|(_, m)| m.is_some())
            .unzip(),
    };

    if unmatched > 0 {
        match policy {
            JoinPolicy::Left => info!("{unmatched} participants have no profile key; profile columns left null"),
            JoinPolicy::Inner => warn!("Inner join dropped {unmatched} participants without a profile key"),
        }
    }

    let left_indices = UInt32Array::from(left_rows);
    let right_indices = UInt32Array::from(right_rows);

    let mut fields: Vec<Field> = population
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    let mut columns: Vec<ArrayRef> = population
        .columns()
        .iter()
        .map(|c| take(c.as_ref(), &left_indices, None))
        .collect::<std::result::Result<_, _>>()?;

    let profile_schema = profiles.schema();
    for (field, column) in profile_schema.fields().iter().zip(profiles.columns()) {
        if field.name() == PERSON_ID {
            continue;
        }
        fields.push(field.as_ref().clone().with_nullable(true));
        columns.push(take(column.as_ref(), &right_indices, None)?);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Row count of a table as a `take` index
fn row_count(batch: &RecordBatch, table: &str) -> Result<u32> {
    u32::try_from(batch.num_rows()).map_err(|_| {
        ArrowError::InvalidArgumentError(format!(
            "{table} table has {} rows, more than a u32 join index can address",
            batch.num_rows()
        ))
        .into()
    })
}
