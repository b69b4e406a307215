//! Datastore CLI - Demo scenario and container benchmark.
//!
//! # Usage
//!
//! ```bash
//! # Run the demo scenario and print each step
//! ds-cli demo
//!
//! # Same scenario, as one JSON document
//! ds-cli demo --json
//!
//! # Time insert/contains/iterate across standard containers
//! ds-cli bench --size 200000 --lookups 50000 --warmup 2
//! ```
//!
//! # Commands
//!
//! - `demo` - Drive a fresh store through a fixed sequence of mutations
//! - `bench` - Container timing experiment, independent of the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{BenchConfig, CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "ds-cli")]
#[command(author, version, about = "Datastore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo scenario against a fresh in-memory store
    Demo {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Time insert, contains and iterate on standard containers
    Bench {
        /// Elements inserted per container
        #[arg(short, long)]
        size: Option<usize>,

        /// Membership lookups per container
        #[arg(short, long)]
        lookups: Option<usize>,

        /// Untimed warm-up rounds
        #[arg(short, long)]
        warmup: Option<usize>,

        /// Seed for the generated data (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "datastore=info,datastore_cli=info".into());

    // Logs go to stderr so reports on stdout stay parseable
    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Demo { json } => commands::demo::run(json)?,
        Commands::Bench {
            size,
            lookups,
            warmup,
            seed,
        } => {
            let bench = BenchConfig {
                size: size.unwrap_or(config.bench.size),
                lookups: lookups.unwrap_or(config.bench.lookups),
                warmup: warmup.unwrap_or(config.bench.warmup),
            };
            if bench.size == 0 || bench.lookups == 0 {
                return Err(CliError::InvalidArgument(
                    "size and lookups must be greater than zero".to_string(),
                ));
            }
            commands::bench::run(&bench, seed.unwrap_or_else(rand::random));
        }
    }
    Ok(())
}
