//! Unified error handling for the trendline crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`TrendlineErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use trendline::error::{Error, ErrorCategory, TrendlineErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.category() == ErrorCategory::Analysis {
//!         eprintln!("Rendering without trendline: {}", err.user_desc());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::analytics::TrendError;
pub use crate::utils::error::{LoadError, RenderError};

/// Common trait for all trendline error types
pub trait TrendlineErrorTrait: std::error::Error {
    /// Check if this error is recoverable (the run can continue without the failed part)
    fn is_recoverable(&self) -> bool;

    /// Get description for user-facing messages
    fn user_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Dataset could not be read
    Input,
    /// Dataset content could not be parsed
    Parsing,
    /// Trend estimation errors
    Analysis,
    /// Template and chart output errors
    Rendering,
    /// Output file errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get description for the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "input error",
            Self::Parsing => "parsing error",
            Self::Analysis => "analysis error",
            Self::Rendering => "rendering error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
            Self::Other => "other error",
        }
    }
}

impl TrendlineErrorTrait for LoadError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn user_desc(&self) -> String {
        match self {
            Self::Io { path, .. } => format!("Cannot read dataset {}", path.display()),
            Self::Csv(e) => format!("Dataset is not valid CSV: {e}"),
            Self::ColumnNotFound(column) => {
                format!("Dataset has no '{column}' column")
            }
            Self::InvalidDelimiter(c) => format!("Delimiter {c:?} is not a single byte"),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } => ErrorCategory::Input,
            Self::Csv(_) | Self::ColumnNotFound(_) => ErrorCategory::Parsing,
            Self::InvalidDelimiter(_) => ErrorCategory::Config,
        }
    }
}

impl TrendlineErrorTrait for TrendError {
    fn is_recoverable(&self) -> bool {
        // the chart can still be drawn without its trendline
        true
    }

    fn user_desc(&self) -> String {
        match self {
            Self::InsufficientData { required, actual } => {
                format!("A trendline needs at least {required} years of data, found {actual}")
            }
            Self::UnorderedSeries { .. } => String::from("Yearly series is not sorted by year"),
            Self::DegenerateVariance => String::from("All data falls in a single year"),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Analysis
    }
}

impl TrendlineErrorTrait for RenderError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn user_desc(&self) -> String {
        match self {
            Self::Template(e) => format!("Invalid chart template: {e}"),
            Self::Render(e) => format!("Chart rendering failed: {e}"),
            Self::NoCharts => String::from("No charts are configured"),
            Self::EmptySeries(id) => format!("Chart '{id}' has no dated records to draw"),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NoCharts => ErrorCategory::Config,
            _ => ErrorCategory::Rendering,
        }
    }
}

/// Unified error type for the trendline crate
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Trend estimation errors
    #[error("Trend error: {0}")]
    Trend(#[from] TrendError),

    /// Rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TrendlineErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Load(e) => e.is_recoverable(),
            Self::Trend(e) => e.is_recoverable(),
            Self::Render(e) => e.is_recoverable(),
            Self::Io(_) => false,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn user_desc(&self) -> String {
        match self {
            Self::Load(e) => e.user_desc(),
            Self::Trend(e) => e.user_desc(),
            Self::Render(e) => e.user_desc(),
            Self::Io(e) => format!("{}: {e}", ErrorCategory::Storage.description()),
            Self::Json(e) => format!("{}: {e}", ErrorCategory::Parsing.description()),
            Self::Config(msg) => format!("{}: {msg}", ErrorCategory::Config.description()),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Load(e) => e.category(),
            Self::Trend(e) => e.category(),
            Self::Render(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: format!("{err:#}"),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
