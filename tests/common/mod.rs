//! Common test utilities

use std::path::{Path, PathBuf};

use trendline::models::YearCount;

/// Build a yearly series from (year, count) pairs
pub fn series(points: &[(i32, u64)]) -> Vec<YearCount> {
    points
        .iter()
        .map(|&(year, count)| YearCount::new(year, count))
        .collect()
}

/// Write a CSV file into `dir` and return its path
#[allow(dead_code)]
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Should be able to write test CSV");
    path
}
