//! Analytics module: year normalization, aggregation and trend estimation

pub mod aggregate;
pub mod normalize;
pub mod trend;

pub use aggregate::{aggregate_by_year, aggregate_years};
pub use normalize::{YearParser, DEFAULT_DATE_FORMAT};
pub use trend::{fit_trend, LinearFit, TrendDirection, TrendError, TrendResult};
