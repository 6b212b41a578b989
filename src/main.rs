use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendline::config::LoggingConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "trendline",
    version,
    about = "Yearly incident line charts with an optional least-squares trendline",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json), defaults to TRENDLINE_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the yearly chart to SVG or HTML
    Render {
        /// Input CSV file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (svg, html)
        #[arg(short, long)]
        format: Option<String>,

        /// Start with the trendline switched on
        #[arg(long, default_value = "false")]
        trendline: bool,

        /// Stroke color of the series line
        #[arg(long)]
        color: Option<String>,

        /// Timestamp column name
        #[arg(long)]
        column: Option<String>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print yearly counts and the fitted trend
    Summary {
        /// Input CSV file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,

        /// Timestamp column name
        #[arg(long)]
        column: Option<String>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Render { config, .. } | Commands::Summary { config, .. } => config.clone(),
    };
    let settings = commands::load_config(config_path.as_deref())?;

    // Initialize tracing/logging
    let log_format = cli.log_format.as_deref().unwrap_or(&settings.logging.format);
    setup_tracing(log_format, &settings.logging, cli.verbose)?;

    tracing::info!("trendline starting");

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            trendline,
            color,
            column,
            config,
        } => {
            tracing::info!(
                config = ?config,
                input = ?input,
                output = ?output,
                format = ?format,
                trendline = %trendline,
                "Starting render command"
            );
            commands::render(
                settings,
                commands::RenderParams {
                    input,
                    output,
                    format,
                    trendline,
                    color,
                    column,
                },
            )
            .await?;
        }

        Commands::Summary {
            input,
            json,
            column,
            config,
        } => {
            tracing::info!(config = ?config, input = ?input, json = %json, "Starting summary command");
            commands::summary(settings, input, json, column).await?;
        }
    }

    tracing::info!("trendline completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendline=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(logging.filter_directive())
        })
    };

    // logs go to stderr so summaries on stdout stay machine-readable
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
