mod handlers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sweep::config::SweepConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sweep", version, about = "Ward pickup schedules and collection status")]
struct Cli {
    /// Config file (defaults to .sweep/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// List every ward in the catalog
    Wards {
        #[arg(long)]
        json: bool,
    },
    /// Show one ward's schedule and next pickups
    Show {
        /// Ward, e.g. "Ward 7" or "7"; unknown wards get the default schedule
        ward: String,
        /// Moment to evaluate, e.g. "2024-03-11 09:00" (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show a ward's pickup days for a month
    Calendar {
        /// Ward, e.g. "Ward 7" or "7"; unknown wards get the default schedule
        ward: String,
        #[arg(long)]
        year: Option<i32>,
        /// Month number, 1-12
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,
        #[arg(long)]
        json: bool,
    },
    /// Classify a ward's task from its backend status
    Status {
        /// Ward, e.g. "Ward 7" or "7"; unknown wards get the default schedule
        ward: String,
        /// Backend status: scheduled, in-progress or completed
        #[arg(long, short = 's', default_value = "scheduled")]
        status: String,
        /// Time slot label reported by the backend, e.g. "6:00 AM - 8:00 AM"
        #[arg(long)]
        slot: Option<String>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the next pickup days after today
    Upcoming {
        /// Ward, e.g. "Ward 7" or "7"; unknown wards get the default schedule
        ward: String,
        /// How many pickups to list (defaults to the configured count)
        #[arg(long, short = 'n')]
        count: Option<usize>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the wards collecting today
    Today {
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Resolve every ward against a backend status feed
    Board {
        /// JSON array of { ward, status, timeSlot, date } records
        #[arg(long, short = 'f')]
        feed: Option<PathBuf>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigAction {
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("SWEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(SweepConfig::default_path);

    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = cli.command
    {
        return handlers::config::init(&config_path, force);
    }

    let config = SweepConfig::load_or_default(&config_path)?;
    dispatch(cli.command, &config)
}

fn dispatch(cmd: Commands, config: &SweepConfig) -> Result<()> {
    match cmd {
        Commands::Wards { json } => handlers::wards::handle(config, json),
        Commands::Show { ward, at, json } => handlers::show::handle(config, &ward, at.as_deref(), json),
        Commands::Calendar {
            ward,
            year,
            month,
            json,
        } => handlers::calendar::handle(config, &ward, year, month, json),
        Commands::Status {
            ward,
            status,
            slot,
            at,
            json,
        } => handlers::status::handle(config, &ward, &status, slot.as_deref(), at.as_deref(), json),
        Commands::Upcoming {
            ward,
            count,
            at,
            json,
        } => handlers::upcoming::handle(config, &ward, count, at.as_deref(), json),
        Commands::Today { at, json } => handlers::today::handle(config, at.as_deref(), json),
        Commands::Board { feed, at, json } => {
            handlers::board::handle(config, feed.as_deref(), at.as_deref(), json)
        }
        Commands::Config { .. } => unreachable!("config commands are handled before dispatch"),
    }
}
