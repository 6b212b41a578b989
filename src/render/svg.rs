//! SVG and HTML output with the Handlebars template engine
//!
//! This module turns [`LineChart`] scenes into standalone SVG documents, or
//! into an HTML page where every chart gets its own trendline checkbox.

use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

use super::chart::{ChartScene, LineChart};
use crate::models::YearlySeries;
use crate::utils::error::RenderError;

/// Default chart template
const CHART_TEMPLATE: &str = include_str!("../../templates/chart.svg.hbs");

/// Default page template
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html.hbs");

/// Template data for one chart section of the page
#[derive(Debug, Serialize)]
struct PageChartData {
    id: String,
    has_trendline: bool,
    checked: bool,
    warning: Option<String>,
    svg: String,
}

/// Template data for the page
#[derive(Debug, Serialize)]
struct PageData<'a> {
    title: &'a str,
    counted_records: u64,
    years: usize,
    skipped_records: usize,
    charts: Vec<PageChartData>,
}

/// Chart renderer with Handlebars template engine
pub struct SvgRenderer<'a> {
    /// Handlebars template engine
    handlebars: Handlebars<'a>,
}

impl<'a> SvgRenderer<'a> {
    /// Create a renderer with the built-in templates
    ///
    /// # Example
    /// ```
    /// use trendline::render::SvgRenderer;
    ///
    /// let renderer = SvgRenderer::new().unwrap();
    /// ```
    pub fn new() -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();

        handlebars.register_template_string("chart", CHART_TEMPLATE)?;
        handlebars.register_template_string("page", PAGE_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    /// Create with custom template files
    ///
    /// # Arguments
    /// * `chart_template` - Handlebars template for a single chart SVG
    /// * `page_template` - Handlebars template for the HTML page
    pub fn with_templates(chart_template: &Path, page_template: &Path) -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();

        handlebars.register_template_file("chart", chart_template)?;
        handlebars.register_template_file("page", page_template)?;

        Ok(Self { handlebars })
    }

    /// Render a resolved scene to SVG
    pub fn render_scene(&self, scene: &ChartScene) -> Result<String, RenderError> {
        Ok(self.handlebars.render("chart", scene)?)
    }

    /// Render a chart with its trendline as currently toggled
    pub fn render_chart(&self, chart: &LineChart) -> Result<String, RenderError> {
        if chart.series().is_empty() {
            return Err(RenderError::EmptySeries(chart.options().id.clone()));
        }

        let svg = self.render_scene(&chart.scene())?;
        tracing::debug!(
            chart = %chart.options().id,
            trendline = chart.trendline_visible(),
            bytes = svg.len(),
            "Rendered chart"
        );
        Ok(svg)
    }

    /// Render an HTML page holding every chart
    ///
    /// Each chart carries its fitted trendline, shown or hidden by its own
    /// checkbox. The checkbox starts in the chart's current toggle state.
    /// Charts whose series cannot be fitted get a warning instead.
    pub fn render_page(
        &self,
        title: &str,
        series: &YearlySeries,
        charts: &[LineChart],
    ) -> Result<String, RenderError> {
        if charts.is_empty() {
            return Err(RenderError::NoCharts);
        }

        let mut sections = Vec::with_capacity(charts.len());
        for chart in charts {
            if chart.series().is_empty() {
                return Err(RenderError::EmptySeries(chart.options().id.clone()));
            }

            let (scene, fit_error) = chart.interactive_scene();
            if let Some(err) = &fit_error {
                tracing::warn!(chart = %chart.options().id, error = %err, "Trendline unavailable");
            }

            sections.push(PageChartData {
                id: chart.options().id.clone(),
                has_trendline: fit_error.is_none(),
                checked: chart.trendline_visible(),
                warning: fit_error.map(|e| e.to_string()),
                svg: self.render_scene(&scene)?,
            });
        }

        let data = PageData {
            title,
            counted_records: series.counted_records(),
            years: series.len(),
            skipped_records: series.skipped_records,
            charts: sections,
        };

        Ok(self.handlebars.render("page", &data)?)
    }
}
