mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::analysis::{AnalyzeArgs, ClassifyArgs, ForecastArgs, MetricArgs, SheetArgs};

/// Liquidity ratio analysis
#[derive(Parser)]
#[command(
    name = "lqa",
    version,
    about = "Liquidity ratio analysis",
    long_about = "Computes current, quick and cash ratios from balance-sheet figures, \
                  classifies them, assesses liquidity, cash-flow, operational and market \
                  risk, runs sensitivity scenarios and a compounding five-year forecast, \
                  and produces prioritised recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and print the complete report
    Analyze(AnalyzeArgs),
    /// Calculate current, quick and cash ratios
    Ratios(SheetArgs),
    /// Classify a single ratio value
    Classify(ClassifyArgs),
    /// Assess liquidity, cash-flow, operational and market risk
    Risk(AnalyzeArgs),
    /// Optimistic and pessimistic what-if ratios
    Sensitivity(AnalyzeArgs),
    /// Compounding multi-year forecast for each growth scenario
    Forecast(ForecastArgs),
    /// Prioritised recommendations
    Recommend(AnalyzeArgs),
    /// Focused analysis of one ratio
    Metric(MetricArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "liquidity_core=debug,lqa=debug"
    } else {
        "liquidity_core=warn,lqa=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Ratios(args) => commands::analysis::run_ratios(args),
        Commands::Classify(args) => commands::analysis::run_classify(args),
        Commands::Risk(args) => commands::analysis::run_risk(args),
        Commands::Sensitivity(args) => commands::analysis::run_sensitivity(args),
        Commands::Forecast(args) => commands::analysis::run_forecast(args),
        Commands::Recommend(args) => commands::analysis::run_recommend(args),
        Commands::Metric(args) => commands::analysis::run_metric(args),
        Commands::Version => {
            println!("lqa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
