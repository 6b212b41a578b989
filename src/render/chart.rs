//! Line chart instances with an optional trendline overlay
//!
//! Each [`LineChart`] owns its drawing surface (layout and scales) and its
//! tooltip handle. The trendline is switched with [`LineChart::set_trendline`],
//! which either fully recomputes the fitted line or fully removes it.

use serde::Serialize;

use super::scale::{BandScale, LinearScale};
use crate::analytics::{fit_trend, TrendError, TrendResult};
use crate::config::{ChartConfig, SeriesConfig};
use crate::models::{TrendPoint, YearCount};
use crate::utils::{format_tick, format_year};

/// Canvas geometry and axis labels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub band_padding: f64,
    pub point_radius: f64,
    pub y_ticks: usize,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLayout {
    /// Plot area width inside the margins
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Plot area height inside the margins
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl From<&ChartConfig> for ChartLayout {
    fn from(config: &ChartConfig) -> Self {
        Self {
            width: f64::from(config.width),
            height: f64::from(config.height),
            margin_top: f64::from(config.margin.top),
            margin_right: f64::from(config.margin.right),
            margin_bottom: f64::from(config.margin.bottom),
            margin_left: f64::from(config.margin.left),
            band_padding: config.band_padding,
            point_radius: config.point_radius,
            y_ticks: config.y_ticks,
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

/// Per-chart pipeline options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub id: String,
    pub title: Option<String>,
    pub series_color: String,
    pub trendline_color: String,
    pub point_color: String,
    pub show_trendline: bool,
}

impl From<&SeriesConfig> for ChartOptions {
    fn from(config: &SeriesConfig) -> Self {
        Self {
            id: config.id.clone(),
            title: config.title.clone(),
            series_color: config.series_color.clone(),
            trendline_color: config.trendline_color.clone(),
            point_color: config.point_color.clone(),
            show_trendline: config.show_trendline,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from(&SeriesConfig::default())
    }
}

/// Hover content for data points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    year_label: String,
    count_label: String,
}

impl Tooltip {
    /// Create a tooltip with custom field labels
    pub fn new(year_label: impl Into<String>, count_label: impl Into<String>) -> Self {
        Self {
            year_label: year_label.into(),
            count_label: count_label.into(),
        }
    }

    /// Text shown when hovering a point
    pub fn content(&self, point: &YearCount) -> String {
        format!(
            "{}: {}\n{}: {}",
            self.year_label,
            format_year(point.year),
            self.count_label,
            point.count
        )
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new("Year", "Incidents")
    }
}

/// Layout and scales a chart draws onto
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSurface {
    pub layout: ChartLayout,
    pub x: BandScale,
    pub y: LinearScale,
}

impl ChartSurface {
    /// Build scales for a series
    pub fn new(series: &[YearCount], layout: ChartLayout) -> Self {
        let years = series.iter().map(|p| p.year).collect();
        let max = series.iter().map(|p| p.count).max().unwrap_or(0);

        let x = BandScale::new(years, layout.inner_width(), layout.band_padding);
        let y = LinearScale::for_counts(max as f64, layout.inner_height());

        Self { layout, x, y }
    }

    /// Pixel coordinates of a (year, value) pair inside the plot area
    pub fn project(&self, year: i32, value: f64) -> Option<(f64, f64)> {
        self.x.center(year).map(|x| (x, self.y.scale(value)))
    }

    /// SVG path through a sequence of (year, value) pairs
    pub fn path<I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut d = String::new();
        for (year, value) in values {
            if let Some((x, y)) = self.project(year, value) {
                let command = if d.is_empty() { 'M' } else { 'L' };
                d.push_str(&format!("{command}{x:.2},{y:.2}"));
            }
        }
        d
    }
}

/// A hover point of the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePoint {
    pub cx: String,
    pub cy: String,
    pub r: f64,
    pub tooltip: String,
}

/// An axis tick of the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneTick {
    pub offset: String,
    pub label: String,
}

/// Fully resolved drawing primitives of one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScene {
    pub id: String,
    pub title: Option<String>,
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub series_color: String,
    pub trendline_color: String,
    pub point_color: String,
    pub line_path: String,
    pub trend_path: Option<String>,
    pub points: Vec<ScenePoint>,
    pub x_ticks: Vec<SceneTick>,
    pub y_ticks: Vec<SceneTick>,
    pub x_label: String,
    pub y_label: String,
    pub x_label_x: f64,
    pub x_label_y: f64,
    pub y_label_x: f64,
    pub y_label_y: f64,
}

/// A line chart of yearly counts
#[derive(Debug, Clone)]
pub struct LineChart {
    series: Vec<YearCount>,
    options: ChartOptions,
    surface: ChartSurface,
    tooltip: Tooltip,
    trend: Option<Vec<TrendPoint>>,
}

impl LineChart {
    /// Create a chart with the trendline switched off
    pub fn new(series: Vec<YearCount>, options: ChartOptions, layout: ChartLayout) -> Self {
        let surface = ChartSurface::new(&series, layout);
        Self {
            series,
            options,
            surface,
            tooltip: Tooltip::default(),
            trend: None,
        }
    }

    /// Switch the trendline on or off
    ///
    /// Switching on refits the current series; switching off removes the
    /// line. On error the chart is left without a trendline.
    pub fn set_trendline(&mut self, is_on: bool) -> TrendResult<()> {
        self.trend = None;

        if is_on {
            let points = fit_trend(&self.series)?;
            tracing::debug!(chart = %self.options.id, years = points.len(), "Trendline drawn");
            self.trend = Some(points);
        } else {
            tracing::debug!(chart = %self.options.id, "Trendline removed");
        }

        Ok(())
    }

    /// Whether a trendline is currently drawn
    pub fn trendline_visible(&self) -> bool {
        self.trend.is_some()
    }

    /// Currently drawn trendline
    pub fn trendline(&self) -> Option<&[TrendPoint]> {
        self.trend.as_deref()
    }

    /// Observed series
    pub fn series(&self) -> &[YearCount] {
        &self.series
    }

    /// Chart options
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Drawing surface
    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    /// Scene with the trendline as currently toggled
    pub fn scene(&self) -> ChartScene {
        self.build_scene(self.trend.as_deref())
    }

    /// Scene carrying the fitted trendline regardless of the toggle
    ///
    /// Used where the viewer flips the toggle client-side. Returns the fit
    /// error instead when no line can be fitted.
    pub fn interactive_scene(&self) -> (ChartScene, Option<TrendError>) {
        match fit_trend(&self.series) {
            Ok(points) => (self.build_scene(Some(&points)), None),
            Err(err) => (self.build_scene(None), Some(err)),
        }
    }

    fn build_scene(&self, trend: Option<&[TrendPoint]>) -> ChartScene {
        let surface = &self.surface;
        let layout = &surface.layout;

        let line_path = surface.path(self.series.iter().map(|p| (p.year, p.count as f64)));
        let trend_path =
            trend.map(|points| surface.path(points.iter().map(|p| (p.year, p.predicted_count))));

        let points = self
            .series
            .iter()
            .filter_map(|p| {
                surface
                    .project(p.year, p.count as f64)
                    .map(|(x, y)| ScenePoint {
                        cx: format!("{x:.2}"),
                        cy: format!("{y:.2}"),
                        r: layout.point_radius,
                        tooltip: self.tooltip.content(p),
                    })
            })
            .collect();

        let x_ticks = self
            .series
            .iter()
            .filter_map(|p| {
                surface.x.center(p.year).map(|x| SceneTick {
                    offset: format!("{x:.2}"),
                    label: format_year(p.year),
                })
            })
            .collect();

        let step = surface.y.tick_step(layout.y_ticks);
        let y_ticks = surface
            .y
            .ticks(layout.y_ticks)
            .into_iter()
            .map(|value| SceneTick {
                offset: format!("{:.2}", surface.y.scale(value)),
                label: format_tick(value, step),
            })
            .collect();

        ChartScene {
            id: self.options.id.clone(),
            title: self.options.title.clone(),
            width: layout.width,
            height: layout.height,
            margin_left: layout.margin_left,
            margin_top: layout.margin_top,
            inner_width: layout.inner_width(),
            inner_height: layout.inner_height(),
            series_color: self.options.series_color.clone(),
            trendline_color: self.options.trendline_color.clone(),
            point_color: self.options.point_color.clone(),
            line_path,
            trend_path,
            points,
            x_ticks,
            y_ticks,
            x_label: layout.x_label.clone(),
            y_label: layout.y_label.clone(),
            x_label_x: layout.inner_width() / 2.0,
            x_label_y: layout.inner_height() + layout.margin_bottom - 10.0,
            // rotated -90 degrees, so x runs along the vertical axis
            y_label_x: -layout.inner_height() / 2.0,
            y_label_y: -layout.margin_left + 20.0,
        }
    }
}
