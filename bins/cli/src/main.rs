//! AgroBill command-line front end.
//!
//! Prices bills, summarises orders by period, and formats amounts from the
//! shell. Output goes to stdout as JSON (or plain text for `format`); logs
//! go to stderr.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use agrobill_shared::AppConfig;
use agrobill_shared::config::LogConfig;

/// AgroBill billing tools.
#[derive(Debug, Parser)]
#[command(name = "agrobill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute line amounts and totals for a bill.
    Totals(commands::TotalsArgs),
    /// Summarise orders for a reporting period.
    Report(commands::ReportArgs),
    /// Format an amount in rupees.
    Format(commands::FormatArgs),
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.log);

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Totals(args) => commands::totals(&config, &args)?,
        Command::Report(args) => commands::report(&config, &args)?,
        Command::Format(args) => commands::format(&config, &args),
    };
    println!("{output}");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    let json = log.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (!log.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
