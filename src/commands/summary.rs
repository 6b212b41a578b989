use anyhow::{Context, Result};
use std::path::PathBuf;

use trendline::config::Config;
use trendline::pipeline::{summarize, ChartPipeline, Summary};

use super::apply_dataset_overrides;

pub async fn summary(
    mut config: Config,
    input: Option<PathBuf>,
    json: bool,
    column: Option<String>,
) -> Result<()> {
    apply_dataset_overrides(&mut config, input, column);

    let pipeline = ChartPipeline::new(config).context("Invalid configuration")?;
    let dataset = &pipeline.config().dataset;

    let records = trendline::loader::load_records(&dataset.path, dataset)
        .await
        .with_context(|| format!("Failed to load {}", dataset.path.display()))?;
    let summary = summarize(&pipeline.aggregate(&records));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_table(&summary);
    }

    Ok(())
}

fn print_table(summary: &Summary) {
    let series = &summary.series;

    println!("Incidents by year");
    println!("=================");
    println!("{:>6}  {:>10}  {:>10}", "Year", "Incidents", "Trend");

    for point in &series.points {
        let trend = summary
            .fit
            .map(|fit| format!("{:.1}", fit.predict(point.year)))
            .unwrap_or_else(|| String::from("-"));
        println!("{:>6}  {:>10}  {:>10}", point.year, point.count, trend);
    }

    println!();
    println!(
        "Records: {} total, {} counted, {} skipped",
        series.total_records,
        series.counted_records(),
        series.skipped_records
    );

    match (&summary.fit, &summary.direction) {
        (Some(fit), Some(direction)) => {
            println!(
                "Trend: {:+.2} incidents/year ({direction}), intercept {:.2}",
                fit.slope, fit.intercept
            );
            if let Some(r2) = fit.r_squared {
                println!("R²: {r2:.3}");
            }
        }
        _ => {
            println!(
                "Trend: unavailable ({})",
                summary.fit_error.as_deref().unwrap_or("unknown reason")
            );
        }
    }
}
