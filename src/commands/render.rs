use anyhow::{Context, Result};
use std::path::PathBuf;

use trendline::config::{Config, OutputFormat};
use trendline::pipeline::ChartPipeline;

use super::apply_dataset_overrides;

/// Parameters for the render command
pub struct RenderParams {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub trendline: bool,
    pub color: Option<String>,
    pub column: Option<String>,
}

pub async fn render(mut config: Config, params: RenderParams) -> Result<()> {
    apply_dataset_overrides(&mut config, params.input, params.column);

    if let Some(format) = params.format.as_deref() {
        config.output.format = OutputFormat::parse(format)
            .with_context(|| format!("Unknown output format '{format}' (expected svg or html)"))?;
    }

    match params.output {
        Some(output) => config.output.path = output,
        None => {
            // keep the extension in line with an overridden format
            config.output.path = config
                .output
                .path
                .with_extension(config.output.format.extension());
        }
    }

    for chart in &mut config.charts {
        if params.trendline {
            chart.show_trendline = true;
        }
        if let Some(color) = &params.color {
            chart.series_color = color.clone();
        }
    }

    let pipeline = ChartPipeline::new(config).context("Invalid configuration")?;
    let output = pipeline.run().await.context("Failed to build chart")?;

    let path = output.write_to(&pipeline.config().output.path).await?;

    println!("Rendered {} chart(s) to {}", output.charts.len(), path.display());
    println!(
        "  Years: {} | Incidents: {} | Skipped records: {}",
        output.series.len(),
        output.series.counted_records(),
        output.series.skipped_records
    );
    for chart in &output.charts {
        println!(
            "  {}: trendline {}",
            chart.options().id,
            if chart.trendline_visible() { "on" } else { "off" }
        );
    }

    Ok(())
}
