//! Pipeline integration tests
//!
//! Exercise load -> aggregate -> estimate -> render -> write against CSV
//! files written into a temporary directory.

use tempfile::TempDir;

use trendline::analytics::TrendDirection;
use trendline::config::OutputFormat;
use trendline::models::{TrendPoint, YearCount};
use trendline::pipeline::{summarize, ChartPipeline};

use super::fixtures::{
    config_for, series_config, RISING_INCIDENTS_CSV, SAMPLE_INCIDENTS_CSV, SEMICOLON_CSV,
};
use crate::common;

#[tokio::test]
async fn test_html_pipeline_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", SAMPLE_INCIDENTS_CSV);
    let config = config_for(&dataset, temp_dir.path(), OutputFormat::Html);

    let pipeline = ChartPipeline::new(config).unwrap();
    let output = pipeline.run().await.unwrap();

    assert_eq!(
        output.series.points,
        vec![YearCount::new(2020, 2), YearCount::new(2021, 1)]
    );
    assert_eq!(output.series.total_records, 4);
    assert_eq!(output.series.skipped_records, 1);

    let path = output
        .write_to(&pipeline.config().output.path)
        .await
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    assert!(written.starts_with("<!DOCTYPE html>"));
    assert!(written.contains(r#"id="chart-useofforce""#));
    assert!(written.contains("<title>Year: 2020\nIncidents: 2</title>"));
}

#[tokio::test]
async fn test_svg_pipeline_with_trendline() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", RISING_INCIDENTS_CSV);
    let mut config = config_for(&dataset, temp_dir.path(), OutputFormat::Svg);
    config.charts = vec![series_config("rising", true)];

    let pipeline = ChartPipeline::new(config).unwrap();
    let output = pipeline.run().await.unwrap();

    assert_eq!(
        output.series.points,
        vec![
            YearCount::new(2015, 1),
            YearCount::new(2016, 2),
            YearCount::new(2017, 3),
            YearCount::new(2018, 4),
        ]
    );

    let chart = &output.charts[0];
    let trend: Vec<f64> = chart
        .trendline()
        .unwrap()
        .iter()
        .map(|p| p.predicted_count)
        .collect();
    for (fitted, expected) in trend.iter().zip([1.0, 2.0, 3.0, 4.0]) {
        assert!((fitted - expected).abs() < 1e-6);
    }

    assert!(output.document.starts_with("<svg"));
    assert!(output.document.contains(r#"class="trendline""#));
}

#[tokio::test]
async fn test_chart_instances_share_one_series() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", RISING_INCIDENTS_CSV);
    let mut config = config_for(&dataset, temp_dir.path(), OutputFormat::Html);
    config.charts = vec![series_config("plain", false), series_config("trend", true)];

    let pipeline = ChartPipeline::new(config).unwrap();
    let output = pipeline.run().await.unwrap();

    assert_eq!(output.charts.len(), 2);
    assert_eq!(output.charts[0].series(), output.charts[1].series());
    assert!(!output.charts[0].trendline_visible());
    assert!(output.charts[1].trendline_visible());

    assert!(output
        .document
        .contains(r#"id="trendline-toggle-trend" checked"#));
    assert!(!output
        .document
        .contains(r#"id="trendline-toggle-plain" checked"#));
}

#[tokio::test]
async fn test_toggle_is_idempotent_after_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", RISING_INCIDENTS_CSV);
    let config = config_for(&dataset, temp_dir.path(), OutputFormat::Svg);

    let pipeline = ChartPipeline::new(config).unwrap();
    let mut output = pipeline.run().await.unwrap();
    let chart = &mut output.charts[0];

    chart.set_trendline(true).unwrap();
    let once = chart.trendline().map(<[TrendPoint]>::to_vec);
    chart.set_trendline(true).unwrap();
    assert_eq!(chart.trendline().map(<[TrendPoint]>::to_vec), once);

    chart.set_trendline(false).unwrap();
    chart.set_trendline(false).unwrap();
    assert!(chart.trendline().is_none());
    assert!(chart.scene().trend_path.is_none());
}

#[tokio::test]
async fn test_custom_delimiter_and_column() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "beats.csv", SEMICOLON_CSV);
    let mut config = config_for(&dataset, temp_dir.path(), OutputFormat::Svg);
    config.dataset.delimiter = ';';
    config.dataset.timestamp_column = String::from("Reported");

    let pipeline = ChartPipeline::new(config).unwrap();
    let output = pipeline.run().await.unwrap();

    assert_eq!(
        output.series.points,
        vec![YearCount::new(2010, 1), YearCount::new(2011, 2)]
    );
}

#[tokio::test]
async fn test_summary_of_loaded_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = common::write_csv(temp_dir.path(), "incidents.csv", RISING_INCIDENTS_CSV);
    let config = config_for(&dataset, temp_dir.path(), OutputFormat::Html);

    let pipeline = ChartPipeline::new(config).unwrap();
    let records = trendline::loader::load_records(&dataset, &pipeline.config().dataset)
        .await
        .unwrap();
    let summary = summarize(&pipeline.aggregate(&records));

    let fit = summary.fit.unwrap();
    assert!((fit.slope - 1.0).abs() < 1e-9);
    assert_eq!(summary.direction, Some(TrendDirection::Rising));

    let json = serde_json::to_value(&summary.series).unwrap();
    assert_eq!(json["points"][0]["year"], 2015);
}
