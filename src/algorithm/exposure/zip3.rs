//! Zip3 partitioning of the measurement table

use std::ops::Range;

use log::debug;
use rustc_hash::FxHashMap;

use crate::models::Measurement;

/// Read-only measurement table partitioned by zip3
///
/// Measurements are stored sorted by `(zip3, date)`, so every zip3 partition
/// is a contiguous, date-ordered slice. Rows sharing a key keep their input
/// order, which keeps downstream floating-point sums reproducible.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    measurements: Vec<Measurement>,
    partitions: FxHashMap<String, Range<usize>>,
}

impl MeasurementSet {
    /// Build the partitioned set from unordered measurements
    #[must_use]
    pub fn new(mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by(|a, b| a.zip3.cmp(&b.zip3).then(a.date.cmp(&b.date)));

        let mut partitions = FxHashMap::default();
        let mut start = 0;
        for end in 1..=measurements.len() {
            if end == measurements.len() || measurements[end].zip3 != measurements[start].zip3 {
                partitions.insert(measurements[start].zip3.clone(), start..end);
                start = end;
            }
        }

        debug!(
            "Partitioned {} measurements into {} zip3 regions",
            measurements.len(),
            partitions.len()
        );

        Self {
            measurements,
            partitions,
        }
    }

    /// Measurements recorded in `zip3`, ordered by date
    ///
    /// Empty when no station exists in the region.
    #[must_use]
    pub fn match_zip3(&self, zip3: &str) -> &[Measurement] {
        match self.partitions.get(zip3) {
            Some(range) => &self.measurements[range.clone()],
            None => &[],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Number of distinct zip3 regions with at least one measurement
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.partitions.len()
    }
}

impl From<Vec<Measurement>> for MeasurementSet {
    fn from(measurements: Vec<Measurement>) -> Self {
        Self::new(measurements)
    }
}
