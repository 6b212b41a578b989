//! Integration tests module
//!
//! End-to-end tests for the chart pipeline, from a CSV file on disk to the
//! written SVG or HTML document.

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
