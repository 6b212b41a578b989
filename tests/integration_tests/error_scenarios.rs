//! Error scenario tests
//!
//! Verify that failures surface as typed errors with the right category.

use tempfile::TempDir;

use trendline::config::OutputFormat;
use trendline::error::{Error, ErrorCategory, TrendlineErrorTrait};
use trendline::pipeline::ChartPipeline;
use trendline::utils::error::{LoadError, RenderError};

use super::fixtures::{config_for, series_config, SAMPLE_INCIDENTS_CSV, SINGLE_YEAR_CSV};
use crate::common;

#[tokio::test]
async fn test_missing_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.csv");
    let config = config_for(&missing, temp_dir.path(), OutputFormat::Html);

    let pipeline = ChartPipeline::new(config).unwrap();
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::Load(LoadError::Io { .. })));
    assert_eq!(err.category(), ErrorCategory::Input);
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_missing_timestamp_column() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", SAMPLE_INCIDENTS_CSV);
    let mut config = config_for(&dataset, temp_dir.path(), OutputFormat::Html);
    config.dataset.timestamp_column = String::from("Reported_At");

    let pipeline = ChartPipeline::new(config).unwrap();
    let err = pipeline.run().await.unwrap_err();

    match &err {
        Error::Load(LoadError::ColumnNotFound(column)) => assert_eq!(column, "Reported_At"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::Parsing);
    assert!(err.user_desc().contains("Reported_At"));
}

#[tokio::test]
async fn test_header_only_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "empty.csv", "Occured_date_time\n");
    let config = config_for(&dataset, temp_dir.path(), OutputFormat::Svg);

    let pipeline = ChartPipeline::new(config).unwrap();
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::EmptySeries(_))));
    assert_eq!(err.category(), ErrorCategory::Rendering);
}

#[tokio::test]
async fn test_single_year_trendline_degrades() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "one-year.csv", SINGLE_YEAR_CSV);
    let mut config = config_for(&dataset, temp_dir.path(), OutputFormat::Html);
    config.charts = vec![series_config("single", true)];

    let pipeline = ChartPipeline::new(config).unwrap();
    let output = pipeline.run().await.unwrap();

    assert_eq!(output.series.len(), 1);
    assert!(!output.charts[0].trendline_visible());
    assert!(output.document.contains("Trendline unavailable"));
}

#[test]
fn test_duplicate_chart_ids_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = config_for(
        &temp_dir.path().join("incidents.csv"),
        temp_dir.path(),
        OutputFormat::Html,
    );
    config.charts = vec![series_config("same", false), series_config("same", true)];

    let err = ChartPipeline::new(config).err().unwrap();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.category(), ErrorCategory::Config);
}
