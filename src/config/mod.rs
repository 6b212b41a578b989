//! Configuration management for the trendline pipeline
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::analytics::{YearParser, DEFAULT_DATE_FORMAT};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input dataset configuration
    pub dataset: DatasetConfig,

    /// Shared chart layout
    pub chart: ChartConfig,

    /// One entry per chart instance
    pub charts: Vec<SeriesConfig>,

    /// Output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file path
    pub path: PathBuf,

    /// Header name of the timestamp column
    pub timestamp_column: String,

    /// chrono layout of the timestamp column
    pub date_format: String,

    /// Field delimiter (single byte)
    pub delimiter: char,
}

/// Chart canvas and axis configuration shared by every chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer SVG width in pixels
    pub width: u32,

    /// Outer SVG height in pixels
    pub height: u32,

    /// Space around the plot area
    pub margin: MarginConfig,

    /// Band padding of the year axis, in `[0, 1)`
    pub band_padding: f64,

    /// Radius of the hover points
    pub point_radius: f64,

    /// Approximate number of count-axis ticks
    pub y_ticks: usize,

    /// Year axis label
    pub x_label: String,

    /// Count axis label
    pub y_label: String,
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Per-chart options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Chart identifier, used for element ids in HTML output
    pub id: String,

    /// Optional chart title
    #[serde(default)]
    pub title: Option<String>,

    /// Stroke color of the observed series
    #[serde(default = "default_series_color")]
    pub series_color: String,

    /// Stroke color of the trendline
    #[serde(default = "default_series_color")]
    pub trendline_color: String,

    /// Fill color of the hover points
    #[serde(default = "default_point_color")]
    pub point_color: String,

    /// Whether the trendline starts switched on
    #[serde(default)]
    pub show_trendline: bool,
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone SVG of the first chart
    Svg,
    /// HTML page with every chart and trendline checkboxes
    Html,
}

impl OutputFormat {
    /// Parse from a CLI string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the rendered document is written
    pub path: PathBuf,

    /// Document format
    pub format: OutputFormat,

    /// Heading of the HTML page
    pub title: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl LoggingConfig {
    /// Filter directive for the crate's own events at `level`
    pub fn filter_directive(&self) -> String {
        format!("trendline={},warn", self.level.trim().to_lowercase())
    }
}

fn default_series_color() -> String {
    String::from("gray")
}

fn default_point_color() -> String {
    String::from("blue")
}

fn env_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables keep their default values.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("TRENDLINE_DATASET") {
            config.dataset.path = PathBuf::from(path);
        }

        if let Ok(column) = std::env::var("TRENDLINE_TIMESTAMP_COLUMN") {
            config.dataset.timestamp_column = column;
        }

        if let Ok(format) = std::env::var("TRENDLINE_DATE_FORMAT") {
            config.dataset.date_format = format;
        }

        if let Some(delimiter) = std::env::var("TRENDLINE_DELIMITER")
            .ok()
            .and_then(|v| v.chars().next())
        {
            config.dataset.delimiter = delimiter;
        }

        if let Some(width) = std::env::var("TRENDLINE_WIDTH")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.chart.width = width;
        }

        if let Some(height) = std::env::var("TRENDLINE_HEIGHT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.chart.height = height;
        }

        let series_color = std::env::var("TRENDLINE_SERIES_COLOR").ok();
        let show_trendline = std::env::var("TRENDLINE_SHOW_TRENDLINE")
            .ok()
            .and_then(|v| env_bool(&v));

        for chart in &mut config.charts {
            if let Some(color) = &series_color {
                chart.series_color = color.clone();
            }
            if let Some(show) = show_trendline {
                chart.show_trendline = show;
            }
        }

        if let Ok(path) = std::env::var("TRENDLINE_OUTPUT") {
            config.output.path = PathBuf::from(path);
        }

        if let Some(format) = std::env::var("TRENDLINE_OUTPUT_FORMAT")
            .ok()
            .and_then(|v| OutputFormat::parse(&v))
        {
            config.output.format = format;
        }

        if let Ok(level) = std::env::var("TRENDLINE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("TRENDLINE_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.dataset.timestamp_column.trim().is_empty() {
            anyhow::bail!("timestamp_column must not be empty");
        }

        if !self.dataset.delimiter.is_ascii() {
            anyhow::bail!("delimiter must be a single ASCII character");
        }

        if !YearParser::new(self.dataset.date_format.as_str()).is_usable() {
            anyhow::bail!(
                "date_format '{}' cannot parse a year",
                self.dataset.date_format
            );
        }

        let margin = &self.chart.margin;
        if u64::from(self.chart.width) <= u64::from(margin.left) + u64::from(margin.right) {
            anyhow::bail!("chart width must exceed left and right margins");
        }

        if u64::from(self.chart.height) <= u64::from(margin.top) + u64::from(margin.bottom) {
            anyhow::bail!("chart height must exceed top and bottom margins");
        }

        if !(0.0..1.0).contains(&self.chart.band_padding) {
            anyhow::bail!("band_padding must be in [0, 1)");
        }

        if self.chart.point_radius <= 0.0 {
            anyhow::bail!("point_radius must be positive");
        }

        if self.chart.y_ticks == 0 {
            anyhow::bail!("y_ticks must be greater than 0");
        }

        if self.charts.is_empty() {
            anyhow::bail!("at least one chart must be configured");
        }

        let mut ids = HashSet::new();
        for chart in &self.charts {
            if chart.id.trim().is_empty() {
                anyhow::bail!("chart id must not be empty");
            }
            if !ids.insert(chart.id.as_str()) {
                anyhow::bail!("duplicate chart id: {}", chart.id);
            }
        }

        Ok(())
    }

}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            chart: ChartConfig::default(),
            charts: vec![SeriesConfig::default()],
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/SPDUseofForce.csv"),
            timestamp_column: String::from("Occured_date_time"),
            date_format: String::from(DEFAULT_DATE_FORMAT),
            delimiter: ',',
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            margin: MarginConfig::default(),
            band_padding: 0.1,
            point_radius: 6.0,
            y_ticks: 10,
            x_label: String::from("Year"),
            y_label: String::from("Number of Incidents"),
        }
    }
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 50,
            right: 30,
            bottom: 60,
            left: 70,
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            id: String::from("useofforce"),
            title: None,
            series_color: default_series_color(),
            trendline_color: default_series_color(),
            point_color: default_point_color(),
            show_trendline: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output/chart.html"),
            format: OutputFormat::Html,
            title: String::from("Use of Force Incidents by Year"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
