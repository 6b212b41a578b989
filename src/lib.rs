//! trendline - yearly incident charts with a least-squares trendline
//!
//! Loads an incident export from CSV, counts incidents per calendar year and
//! renders the yearly series as a line chart. Each chart can overlay an
//! ordinary-least-squares trendline that is switched on and off per chart.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`loader`] - CSV dataset loading
//! - [`analytics`] - Year normalization, aggregation and trend estimation
//! - [`render`] - Scales, chart instances and SVG/HTML output
//! - [`pipeline`] - End-to-end pipeline driving one or more charts
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use trendline::config::Config;
//! use trendline::pipeline::ChartPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = ChartPipeline::new(config)?;
//!     let output = pipeline.run().await?;
//!     output.write_to(&pipeline.config().output.path).await?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{fit_trend, LinearFit, TrendError, YearParser};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, TrendlineErrorTrait};
    pub use crate::models::{IncidentRecord, TrendPoint, YearCount, YearlySeries};
    pub use crate::pipeline::{ChartPipeline, PipelineOutput};
    pub use crate::render::{ChartOptions, LineChart, SvgRenderer};
}

// Direct re-exports for convenience
pub use models::{IncidentRecord, TrendPoint, YearCount, YearlySeries};
