//! CSV dataset loading
//!
//! The dataset load is the only asynchronous step of the pipeline: the file is
//! read through `tokio::fs`, then parsed in memory with the `csv` crate.

use std::io::Read;
use std::path::Path;

use crate::config::DatasetConfig;
use crate::models::IncidentRecord;
use crate::utils::error::LoadError;

/// Read incident records from a CSV file
///
/// # Example
/// ```no_run
/// use trendline::config::DatasetConfig;
/// use trendline::loader::load_records;
///
/// # async fn run() -> Result<(), trendline::utils::error::LoadError> {
/// let dataset = DatasetConfig::default();
/// let records = load_records(&dataset.path, &dataset).await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_records(
    path: &Path,
    dataset: &DatasetConfig,
) -> Result<Vec<IncidentRecord>, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read dataset");

    let records = read_records(bytes.as_slice(), dataset)?;

    tracing::info!(path = %path.display(), records = records.len(), "Loaded dataset");
    Ok(records)
}

/// Parse incident records from any CSV reader
///
/// The first row must be a header containing `dataset.timestamp_column`.
/// Rows too short to reach that column yield an empty timestamp. Fields are
/// decoded lossily, so invalid UTF-8 never fails the load: a damaged
/// timestamp simply fails to parse later and the row is skipped.
pub fn read_records<R: Read>(
    reader: R,
    dataset: &DatasetConfig,
) -> Result<Vec<IncidentRecord>, LoadError> {
    if !dataset.delimiter.is_ascii() {
        return Err(LoadError::InvalidDelimiter(dataset.delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dataset.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let column = reader
        .byte_headers()?
        .iter()
        .position(|h| String::from_utf8_lossy(h) == dataset.timestamp_column)
        .ok_or_else(|| LoadError::ColumnNotFound(dataset.timestamp_column.clone()))?;

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let row = result?;
        let timestamp = row
            .get(column)
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        records.push(IncidentRecord::new(timestamp));
    }

    Ok(records)
}
