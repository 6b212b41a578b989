//! Group-by-year aggregation of incident records

use std::collections::BTreeMap;

use super::normalize::YearParser;
use crate::models::{IncidentRecord, YearCount, YearlySeries};

/// Count incidents per year from raw timestamp cells
///
/// Cells whose year cannot be parsed are dropped and reported through
/// [`YearlySeries::skipped_records`]; they never form a bucket of their own.
/// The result is sorted ascending by year with one entry per distinct year.
pub fn aggregate_years<I, S>(timestamps: I, parser: &YearParser) -> YearlySeries
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buckets: BTreeMap<i32, u64> = BTreeMap::new();
    let mut total_records = 0usize;
    let mut skipped_records = 0usize;

    for raw in timestamps {
        total_records += 1;
        match parser.parse_year(raw.as_ref()) {
            Some(year) => *buckets.entry(year).or_insert(0) += 1,
            None => {
                skipped_records += 1;
                tracing::debug!(timestamp = %raw.as_ref(), "Skipping record with unparsable timestamp");
            }
        }
    }

    let points: Vec<YearCount> = buckets
        .into_iter()
        .map(|(year, count)| YearCount::new(year, count))
        .collect();

    if skipped_records > 0 {
        tracing::warn!(
            skipped = skipped_records,
            total = total_records,
            format = %parser.format(),
            "Dropped records with unparsable timestamps"
        );
    }

    tracing::debug!(years = points.len(), total = total_records, "Grouped incidents by year");

    YearlySeries {
        points,
        total_records,
        skipped_records,
    }
}

/// Count incidents per year from loaded records
pub fn aggregate_by_year(records: &[IncidentRecord], parser: &YearParser) -> YearlySeries {
    aggregate_years(records.iter().map(|r| r.timestamp.as_str()), parser)
}
