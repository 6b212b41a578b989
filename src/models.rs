// Core data structures for the trendline pipeline

use serde::{Deserialize, Serialize};

/// One raw row of the incident dataset
///
/// Only the timestamp cell is retained; the rest of the row is not needed
/// for yearly aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IncidentRecord {
    pub timestamp: String, // e.g. "6/1/2020 2:00:00 PM"
}

impl IncidentRecord {
    /// Create a record from a raw timestamp cell
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
        }
    }
}

/// Number of incidents observed in one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

impl YearCount {
    /// Create a new year/count pair
    pub fn new(year: i32, count: u64) -> Self {
        Self { year, count }
    }
}

/// Model-predicted incident count for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub predicted_count: f64,
}

/// Aggregated yearly series plus bookkeeping about dropped records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct YearlySeries {
    /// Year buckets, strictly ascending by year
    pub points: Vec<YearCount>,

    /// Number of records fed to the aggregator
    pub total_records: usize,

    /// Records dropped because their timestamp could not be parsed
    pub skipped_records: usize,
}

impl YearlySeries {
    /// Number of distinct years
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if no year bucket exists
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest yearly count, 0 for an empty series
    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    /// First and last year of the series
    pub fn year_span(&self) -> Option<(i32, i32)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }

    /// Number of records that made it into a year bucket
    pub fn counted_records(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

impl From<Vec<YearCount>> for YearlySeries {
    fn from(points: Vec<YearCount>) -> Self {
        let total = points.iter().map(|p| p.count as usize).sum();
        Self {
            points,
            total_records: total,
            skipped_records: 0,
        }
    }
}
