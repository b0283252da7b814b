//! bsm - Black-Scholes-Merton option pricer
//!
//! # Commands
//!
//! - `bsm price -o call -u 100 -s 95 -t 2027-03-20` - Price one option from flags
//! - `bsm batch options.csv` - Price every row of a CSV file (or stdin)
//!
//! Volatility, interest and dividend yield default to the values in
//! [`config::PricingDefaults`] when omitted.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod expiry;
mod reader;
mod report;
mod request;

use commands::batch::BatchArgs;
use commands::price::PriceArgs;
use commands::RunContext;
use config::PricingDefaults;
use report::OutputFormat;

/// Black-Scholes-Merton pricer for European options
#[derive(Parser, Debug)]
#[command(name = "bsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// JSON file overriding the default volatility, interest, dividend and precision
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Decimal places shown (default from config)
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u32).range(0..=12))]
    precision: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a single option
    Price(PriceArgs),

    /// Price options from CSV rows: option_type,underlying,strike,expiry,volatility,interest,dividend
    Batch(BatchArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let defaults = PricingDefaults::load(cli.config.as_deref())?;
    let ctx = RunContext {
        precision: cli.precision.unwrap_or(defaults.precision),
        format: cli.format,
        today: chrono::Local::now().date_naive(),
        defaults,
    };
    debug!(?ctx, "starting");

    let stdout = io::stdout().lock();
    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &ctx, stdout),
        Commands::Batch(args) => commands::batch::run(args, &ctx, stdout).map(|_| ()),
    }
}
