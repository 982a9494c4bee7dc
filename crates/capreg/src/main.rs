//! capreg - Entry Point
//!
//! Resolve, assign and list capabilities from the command line.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `capreg get <path> [--default <json>]` | Resolve a dotted path |
//! | `capreg set <path> <json>` | Assign a value (writable namespaces only) |
//! | `capreg backends` | List discovered namespaces |
//! | `capreg modules` | List registered loadable modules |

// Force-link capreg-providers so linkme registrations are included
extern crate capreg_providers;

use std::path::PathBuf;

use anyhow::Context;
use capreg_application::ports::registry::{list_backends, list_modules};
use capreg_infrastructure::build_router;
use capreg_infrastructure::config::ConfigLoader;
use capreg_infrastructure::logging::init_logging;
use clap::{Parser, Subcommand};
use serde_json::Value;

/// Command line interface for capreg
#[derive(Parser, Debug)]
#[command(name = "capreg")]
#[command(about = "Capability registry - resolve dotted paths through pluggable backends")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a dotted path and print the value as JSON
    Get {
        /// Dotted path, e.g. `config.database.host`
        path: String,

        /// JSON value returned where the backend supports defaults
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Assign a JSON value to a dotted path
    Set {
        /// Dotted path, e.g. `storage.session_id`
        path: String,

        /// JSON value; bare words are stored as strings
        value: String,
    },
    /// List discovered backend namespaces
    Backends,
    /// List registered loadable modules
    Modules,
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Command::Backends => {
            for (namespace, description) in list_backends() {
                println!("{namespace:<10} {description}");
            }
        }
        Command::Modules => {
            for (name, description) in list_modules() {
                println!("{name:<20} {description}");
            }
        }
        Command::Get { path, default } => {
            let router = build_router(&config);
            let value = match default {
                Some(default) => router.resolve_or(&path, parse_value(&default)).await,
                None => router.resolve(&path).await,
            }
            .with_context(|| format!("Failed to resolve {path}"))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Set { path, value } => {
            let router = build_router(&config);
            router
                .assign(&path, parse_value(&value))
                .await
                .with_context(|| format!("Failed to assign {path}"))?;
        }
    }

    Ok(())
}
