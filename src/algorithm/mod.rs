//! Algorithm implementations for exposure profiling
//!
//! This module contains the per-participant profiling pipeline and the
//! parallel dispatcher that runs it across a population.

pub mod exposure;
