//! End-to-end chart pipeline
//!
//! One parameterized pipeline drives every chart instance:
//!
//! ```text
//! load (async) -> normalize -> aggregate -> per chart: estimate -> render
//! ```
//!
//! Each configured chart gets its own [`LineChart`] built from the same
//! aggregated series and its own [`ChartOptions`].

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analytics::{aggregate_by_year, LinearFit, TrendDirection, YearParser};
use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::loader::load_records;
use crate::models::{IncidentRecord, YearlySeries};
use crate::render::{ChartLayout, ChartOptions, LineChart, SvgRenderer};

/// Result of a pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    /// Aggregated yearly series
    pub series: YearlySeries,

    /// One chart per configured chart instance
    pub charts: Vec<LineChart>,

    /// Rendered document
    pub document: String,

    /// Format of `document`
    pub format: OutputFormat,
}

impl PipelineOutput {
    /// Write the rendered document, creating parent directories
    pub async fn write_to(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, self.document.as_bytes()).await?;

        tracing::info!(
            path = %path.display(),
            format = %self.format.extension(),
            bytes = self.document.len(),
            "Wrote chart document"
        );
        Ok(path.to_path_buf())
    }
}

/// Chart pipeline bound to one configuration
pub struct ChartPipeline {
    config: Config,
    renderer: SvgRenderer<'static>,
}

impl ChartPipeline {
    /// Create a pipeline after validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(|e| Error::config(format!("{e:#}")))?;
        let renderer = SvgRenderer::new()?;

        Ok(Self { config, renderer })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured dataset and run every stage
    pub async fn run(&self) -> Result<PipelineOutput> {
        let dataset = &self.config.dataset;
        let records = load_records(&dataset.path, dataset).await?;
        self.process(&records)
    }

    /// Aggregate already-loaded records
    pub fn aggregate(&self, records: &[IncidentRecord]) -> YearlySeries {
        let parser = YearParser::new(self.config.dataset.date_format.as_str());
        let series = aggregate_by_year(records, &parser);

        tracing::info!(
            years = series.len(),
            counted = series.counted_records(),
            skipped = series.skipped_records,
            span = ?series.year_span(),
            "Grouped incidents by year"
        );
        series
    }

    /// Build one chart instance and apply its trendline toggle
    ///
    /// A trendline that cannot be fitted is logged and left off.
    pub fn build_chart(&self, series: &YearlySeries, options: ChartOptions) -> LineChart {
        let show_trendline = options.show_trendline;
        let mut chart = LineChart::new(
            series.points.clone(),
            options,
            ChartLayout::from(&self.config.chart),
        );

        if let Err(err) = chart.set_trendline(show_trendline) {
            tracing::warn!(
                chart = %chart.options().id,
                error = %err,
                "Trendline requested but series cannot be fitted, drawing without it"
            );
        }

        chart
    }

    /// Run normalize, aggregate, estimate and render on loaded records
    pub fn process(&self, records: &[IncidentRecord]) -> Result<PipelineOutput> {
        let series = self.aggregate(records);

        let charts: Vec<LineChart> = self
            .config
            .charts
            .iter()
            .map(|chart_config| self.build_chart(&series, ChartOptions::from(chart_config)))
            .collect();

        let format = self.config.output.format;
        let document = match format {
            OutputFormat::Svg => {
                let first = charts.first().ok_or(crate::error::RenderError::NoCharts)?;
                self.renderer.render_chart(first)?
            }
            OutputFormat::Html => {
                self.renderer
                    .render_page(&self.config.output.title, &series, &charts)?
            }
        };

        Ok(PipelineOutput {
            series,
            charts,
            document,
            format,
        })
    }
}

/// Textual overview of a series and its fitted trend
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub series: YearlySeries,
    pub fit: Option<LinearFit>,
    pub direction: Option<TrendDirection>,
    pub fit_error: Option<String>,
}

/// Fit the series and collect the outcome
pub fn summarize(series: &YearlySeries) -> Summary {
    match LinearFit::fit(&series.points) {
        Ok(fit) => Summary {
            series: series.clone(),
            direction: Some(fit.direction()),
            fit: Some(fit),
            fit_error: None,
        },
        Err(err) => Summary {
            series: series.clone(),
            fit: None,
            direction: None,
            fit_error: Some(err.to_string()),
        },
    }
}
