//! kumo CLI - live Ichimoku cloud over a replayed price feed.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;
mod source;

use commands::config::ConfigArgs;
use display::Format;

#[derive(Parser)]
#[command(name = "kumo")]
#[command(about = "Live Ichimoku cloud over a replayed price feed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay price events through the live pipeline and write render payloads
    Replay {
        /// Event file (.csv with time,price columns, or .ndjson)
        events: PathBuf,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "ndjson")]
        format: Format,

        /// Bars to continue from (JSON array as written by `kumo bars`)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Write every payload instead of only the final one
        #[arg(long)]
        every: bool,

        /// Delay between replayed events in milliseconds
        #[arg(long, default_value = "0")]
        pace_ms: u64,

        #[command(flatten)]
        settings: ConfigArgs,
    },

    /// Aggregate price events into bars
    Bars {
        /// Event file (.csv with time,price columns, or .ndjson)
        events: PathBuf,

        /// Bar interval (s1, m1, m5, m15, m30, h1, h4, d1)
        #[arg(short, long, default_value = "m1")]
        interval: kumo_lib::Interval,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Print the effective pipeline configuration as JSON
    Config {
        #[command(flatten)]
        settings: ConfigArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet)?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Replay {
            events,
            output,
            format,
            history,
            every,
            pace_ms,
            settings,
        } => {
            commands::replay::replay(commands::replay::ReplayOptions {
                events,
                output,
                format,
                history,
                every,
                pace_ms,
                settings,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::Bars {
            events,
            interval,
            output,
            format,
        } => commands::bars::bars(&events, interval, output, format, cli.quiet).await,
        Commands::Config { settings } => commands::config::show_config(&settings),
    }
}
