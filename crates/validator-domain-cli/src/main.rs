//! validator-domain - verify that a network validator controls the domain its manifest claims.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod fetch;
mod input;
mod output;

use commands::{encode, normalize, signing_form, verify};
use fetch::FetchConfig;

/// Exit code when verification could not be completed.
const EXIT_INCOMPLETE: i32 = 2;

#[derive(Parser)]
#[command(name = "validator-domain")]
#[command(about = "Validator manifest and domain attestation verification CLI")]
struct Cli {
    /// Log filter, e.g. `debug` or `validator_domain_core=trace` (default: RUST_LOG, then warn)
    #[arg(long, global = true, env = "VALIDATOR_DOMAIN_LOG")]
    log_level: Option<String>,
    /// Timeout for fetching a domain's xrp-ledger.toml, in seconds
    #[arg(long, global = true, env = "VALIDATOR_DOMAIN_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the domain claimed by a manifest
    Verify {
        /// Manifest: hex, base64, path to a JSON file, or `-` for stdin
        manifest: String,
        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
        /// Read the domain table from a local TOML file instead of fetching it
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Print the canonical manifest JSON
    Normalize {
        /// Manifest: hex, base64, path to a JSON file, or `-` for stdin
        manifest: String,
    },
    /// Show the signed bytes and check the manifest signatures
    SigningForm {
        /// Manifest: hex, base64, path to a JSON file, or `-` for stdin
        manifest: String,
    },
    /// Print the canonical binary encoding of a manifest
    Encode {
        /// Manifest: hex, base64, path to a JSON file, or `-` for stdin
        manifest: String,
        /// Output base64 instead of hex
        #[arg(long)]
        base64: bool,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = FetchConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..FetchConfig::default()
    };

    let (result, error_code) = match cli.command {
        Commands::Verify {
            manifest,
            json,
            table,
        } => (verify::run(manifest, json, table, &config), EXIT_INCOMPLETE),
        Commands::Normalize { manifest } => (normalize::run(manifest), 1),
        Commands::SigningForm { manifest } => (signing_form::run(manifest), 1),
        Commands::Encode { manifest, base64 } => (encode::run(manifest, base64), 1),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(error_code);
    }
}
