pub mod render;
pub mod summary;

use anyhow::Result;
use std::path::{Path, PathBuf};

use trendline::config::Config;

// Re-export command functions for convenience
pub use render::{render, RenderParams};
pub use summary::summary;

/// Load config from a TOML file, or from the environment when none is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading config file");
            Config::from_file(path)
        }
        None => Config::from_env(),
    }
}

/// Apply the dataset overrides shared by all commands
fn apply_dataset_overrides(config: &mut Config, input: Option<PathBuf>, column: Option<String>) {
    if let Some(input) = input {
        config.dataset.path = input;
    }
    if let Some(column) = column {
        config.dataset.timestamp_column = column;
    }
}
