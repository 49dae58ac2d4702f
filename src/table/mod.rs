//! Arrow table boundary of the profiler
//!
//! Converts the population and measurement tables into typed rows, turns
//! profiles back into a table, and joins that table onto the population.

pub mod columns;
pub mod convert;
pub mod join;
pub mod output;

pub use convert::{POPULATION_COLUMNS, measurements_from_batch, participants_from_batch};
pub use join::join_profiles;
pub use output::{profile_column_names, profiles_to_batch};
