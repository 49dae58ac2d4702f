//! Parallel profile dispatch
//!
//! Runs the profile builder once per participant on a dedicated rayon pool.
//! Tasks share only the read-only measurement set; each writes its own
//! result slot, and results come back in input order regardless of which
//! worker finished first. The first failing participant aborts the batch.

use std::time::Instant;

use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::builder::ProfileBuilder;
use crate::config::ProfilingConfig;
use crate::error::Result;
use crate::models::{ExposureProfile, MatchState, ParticipantWindow};
use crate::utils::logging::progress;

/// Dedicated pool with `config.worker_count()` named threads
pub(crate) fn worker_pool(config: &ProfilingConfig) -> Result<ThreadPool> {
    Ok(ThreadPoolBuilder::new()
        .num_threads(config.worker_count())
        .thread_name(|i| format!("exposure-worker-{i}"))
        .build()?)
}

/// Profile every participant in parallel, preserving input order
///
/// The pool size is fixed for the whole call: `config.workers` if set,
/// otherwise available parallelism minus one (at least one thread).
///
/// # Errors
/// Returns an error if the worker pool cannot be created or if any
/// participant's profile fails; no partial results are returned.
pub fn dispatch_profiles(
    participants: &[ParticipantWindow],
    builder: &ProfileBuilder<'_>,
    config: &ProfilingConfig,
) -> Result<Vec<ExposureProfile>> {
    let start = Instant::now();
    let workers = config.worker_count();
    info!(
        "Profiling {} participants with {workers} worker threads",
        participants.len()
    );

    let pool = worker_pool(config)?;

    let pb = progress::profiling_progress_bar(participants.len(), config.show_progress);

    let profiles = pool.install(|| {
        participants
            .par_iter()
            .progress_with(pb.clone())
            .map(|participant| builder.build(participant))
            .collect::<Result<Vec<_>>>()
    });

    match &profiles {
        Ok(_) => progress::finish_progress_bar(&pb, Some("Profiling complete")),
        Err(_) => pb.abandon_with_message("Profiling aborted"),
    }
    let profiles = profiles?;

    let (no_zip, no_date) = profiles.iter().fold((0_usize, 0_usize), |(z, d), p| match p.state() {
        MatchState::NoZipMatch => (z + 1, d),
        MatchState::NoDateMatch => (z, d + 1),
        MatchState::Matched => (z, d),
    });
    info!(
        "Profiled {} participants in {:?} ({} matched, {no_zip} without zip3 data, {no_date} without data in window)",
        profiles.len(),
        start.elapsed(),
        profiles.len() - no_zip - no_date,
    );

    Ok(profiles)
}
