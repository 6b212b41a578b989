//! Chart rendering: scales, chart instances and SVG/HTML output

pub mod chart;
pub mod scale;
pub mod svg;

pub use chart::{ChartLayout, ChartOptions, ChartScene, ChartSurface, LineChart, Tooltip};
pub use scale::{BandScale, LinearScale};
pub use svg::SvgRenderer;
