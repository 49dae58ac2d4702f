use anyhow::Result;
use arrow::record_batch::RecordBatch;
use exposure_profiler::{ExposureProfiler, ProfileType, read_parquet, write_parquet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{
    all_stats_null, band_columns, date, f64_values, i64_values, measurement_batch,
    population_batch, test_config, u32_values,
};

const ZIP3S: [&str; 6] = ["100", "101", "102", "103", "104", "999"];

/// Seeded random population and measurement tables
fn random_tables(seed: u64, participants: usize, readings: usize) -> (RecordBatch, RecordBatch) {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = date(2019, 1, 1);

    let ids: Vec<String> = (0..participants).map(|i| format!("P{i:04}")).collect();
    let population_rows: Vec<_> = ids
        .iter()
        .map(|id| {
            let zip3 = ZIP3S[rng.random_range(0..ZIP3S.len())];
            let start = base + chrono::Duration::days(rng.random_range(0..900));
            let end = start + chrono::Duration::days(rng.random_range(0..120));
            (Some(id.as_str()), Some(zip3), start, end)
        })
        .collect();

    // Stations never report for the last zip3
    let measurement_rows: Vec<_> = (0..readings)
        .map(|_| {
            let zip3 = ZIP3S[rng.random_range(0..ZIP3S.len() - 1)];
            let day = base + chrono::Duration::days(rng.random_range(0..1100));
            let raw = rng.random_bool(0.9).then(|| f64::from(rng.random_range(0..500_u32)) / 10.0);
            let aqi = f64::from(rng.random_range(0..300_u32));
            (zip3, day, raw, aqi)
        })
        .collect();

    (
        population_batch(&population_rows),
        measurement_batch(&measurement_rows),
    )
}

#[test]
fn test_results_independent_of_worker_count() -> Result<()> {
    let (population, measurements) = random_tables(7, 300, 4000);

    let single = ExposureProfiler::new(test_config().with_workers(1))?.profile_table(
        &population,
        &measurements,
        "pm25",
        ProfileType::Aqi,
    )?;
    let pooled = ExposureProfiler::new(test_config().with_workers(4))?.profile_table(
        &population,
        &measurements,
        "pm25",
        ProfileType::Aqi,
    )?;

    assert_eq!(single, pooled);
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let (population, measurements) = random_tables(11, 150, 2000);
    let profiler = ExposureProfiler::new(test_config())?;
    let profile_type = ProfileType::Ratio { threshold: 100.0 };

    let first = profiler.profile_table(&population, &measurements, "ozone", profile_type)?;
    let second = profiler.profile_table(&population, &measurements, "ozone", profile_type)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_bands_partition_measured_days() -> Result<()> {
    let (population, measurements) = random_tables(23, 250, 5000);
    let result = ExposureProfiler::new(test_config())?.profile_table(
        &population,
        &measurements,
        "pm25",
        ProfileType::Aqi,
    )?;

    let totals = u32_values(&result, "pm25_total_measured_days");
    let before = u32_values(&result, "pm25_measured_days_before_dx");
    let bands: Vec<Vec<Option<u32>>> = band_columns("pm25")
        .iter()
        .map(|name| u32_values(&result, name))
        .collect();

    let mut computed = 0;
    for row in 0..result.num_rows() {
        match totals[row] {
            Some(total) => {
                computed += 1;
                let band_sum: u32 = bands.iter().map(|band| band[row].unwrap_or(0)).sum();
                assert_eq!(band_sum, total, "row {row}");
                assert!(total > 0);
                assert!(before[row].unwrap() <= total);
            }
            None => assert!(all_stats_null(&result, "pm25", row), "row {row}"),
        }
    }
    assert!(computed > 0);
    Ok(())
}

#[test]
fn test_coverage_is_measured_over_diagnosis_days() -> Result<()> {
    let (population, measurements) = random_tables(31, 200, 6000);
    let result = ExposureProfiler::new(test_config())?.profile_table(
        &population,
        &measurements,
        "pm25",
        ProfileType::Aqi,
    )?;

    let totals = u32_values(&result, "pm25_total_measured_days");
    let dx_days = i64_values(&result, "pm25_total_dx_days");
    let coverage = f64_values(&result, "pm25_data_coverage");

    for row in 0..result.num_rows() {
        if let (Some(total), Some(days)) = (totals[row], dx_days[row]) {
            let expected = f64::from(total) / days as f64;
            assert!((coverage[row].unwrap() - expected).abs() < 1e-12, "row {row}");
        }
    }
    Ok(())
}

#[test]
fn test_parquet_files_end_to_end() -> Result<()> {
    let (population, measurements) = random_tables(5, 80, 1500);
    let dir = std::env::temp_dir().join(format!("exposure_profiler_e2e_{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let population_path = dir.join("population.parquet");
    let measurement_path = dir.join("measurements.parquet");
    let output_path = dir.join("profiled.parquet");

    write_parquet(&population_path, &population)?;
    write_parquet(&measurement_path, &measurements)?;

    let profiler = ExposureProfiler::new(test_config())?;
    let returned = profiler.profile_parquet_files(
        &population_path,
        &measurement_path,
        &output_path,
        "pm25",
        ProfileType::Aqi,
    )?;
    let written = read_parquet(&output_path)?;
    let in_memory =
        profiler.profile_table(&population, &measurements, "pm25", ProfileType::Aqi)?;
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(written.num_rows(), population.num_rows());
    assert_eq!(returned.num_rows(), in_memory.num_rows());
    for name in ["pm25_total_measured_days", "pm25_aqi_151plus_days"] {
        assert_eq!(u32_values(&written, name), u32_values(&in_memory, name));
    }
    assert_eq!(
        f64_values(&written, "pm25_data_coverage"),
        f64_values(&in_memory, "pm25_data_coverage")
    );
    Ok(())
}
