//! `jito` — command-line client for the block-engine JSON-RPC API
//!
//! Each subcommand opens one session, performs one call, prints the JSON
//! result on stdout and closes the session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use client::{ClientError, JitoClient};
use config::{Config, ConfigError};
use logging::LoggingError;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Logging(#[from] LoggingError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("--params is not valid JSON: {0}")]
    Params(serde_json::Error),
    #[error("failed to render output: {0}")]
    Output(serde_json::Error),
}

/// Command-line interface configuration for jito.
#[derive(Parser, Debug)]
#[command(
    name = "jito",
    about = "Command-line client for the Jito block-engine JSON-RPC API",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// TOML config file (defaults to <config dir>/jito/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Block-engine endpoint URL, overriding the config file
    #[arg(long, global = true)]
    url: Option<String>,
    /// Environment variable holding the auth UUID
    #[arg(long, global = true)]
    uuid_var: Option<String>,
    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Available jito commands.
#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List the tip accounts
    TipAccounts,
    /// Print one tip account chosen at random
    RandomTipAccount,
    /// Submit a bundle of encoded signed transactions
    SendBundle {
        #[arg(required = true)]
        transactions: Vec<String>,
    },
    /// Query statuses of landed bundles
    BundleStatuses {
        #[arg(required = true)]
        bundle_ids: Vec<String>,
    },
    /// Query statuses of in-flight bundles
    InflightBundleStatuses {
        #[arg(required = true)]
        bundle_ids: Vec<String>,
    },
    /// Call any JSON-RPC method
    Call {
        method: String,
        /// JSON parameters
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

/// Applies command-line overrides on top of the loaded file.
fn apply_overrides(
    mut config: Config,
    url: Option<String>,
    uuid_var: Option<String>,
    log_level: Option<String>,
) -> Config {
    if let Some(url) = url {
        config.endpoint.base_url = url;
    }
    if let Some(uuid_var) = uuid_var {
        config.endpoint.uuid_var = Some(uuid_var);
    }
    if let Some(level) = log_level {
        config.logging.level = level;
    }
    config
}

async fn execute(client: &JitoClient, cmd: Commands) -> Result<Value, CliError> {
    let output = match cmd {
        Commands::TipAccounts => client.get_tip_accounts().await?.data,
        Commands::RandomTipAccount => Value::String(client.get_random_tip_account().await?),
        Commands::SendBundle { transactions } => client.send_bundle(json!([transactions])).await?.data,
        Commands::BundleStatuses { bundle_ids } => {
            client.get_bundle_statuses(&bundle_ids).await?.data
        }
        Commands::InflightBundleStatuses { bundle_ids } => {
            client.get_inflight_bundle_statuses(&bundle_ids).await?.data
        }
        Commands::Call { method, params } => {
            let params: Value = serde_json::from_str(&params).map_err(CliError::Params)?;
            client.generic_call(&method, params).await?.data
        }
    };
    Ok(output)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { cmd, config, url, uuid_var, log_level } = cli;
    let config = apply_overrides(Config::load_or_default(config.as_deref())?, url, uuid_var, log_level);
    logging::init(&config.logging.level)?;

    let client = JitoClient::from_config(&config);
    let output = {
        let client = client.session()?;
        execute(&client, cmd).await?
    };

    println!("{}", serde_json::to_string_pretty(&output).map_err(CliError::Output)?);
    Ok(())
}

/// Main entry point for the jito application.
#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
