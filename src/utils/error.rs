//! Error types for loading and rendering
//!
//! This module defines the error types used by the input and output stages.
//! Estimator errors live next to the estimator in [`crate::analytics::trend`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the incident dataset
#[derive(Error, Debug)]
pub enum LoadError {
    /// Dataset file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Timestamp column is not in the header row
    #[error("Column '{0}' not found in CSV header")]
    ColumnNotFound(String),

    /// Delimiter is not a single-byte character
    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(char),
}

/// Errors that can occur while rendering charts
#[derive(Error, Debug)]
pub enum RenderError {
    /// Template could not be registered
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Nothing to draw
    #[error("No charts to render")]
    NoCharts,

    /// Chart has no data points
    #[error("Chart '{0}' has no data points")]
    EmptySeries(String),
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}
