//! CLI glue for csv-sanitizer: command parsing and the async [`run`] entrypoint.
//!
//! All cleaning logic lives in `csv-sanitizer-core`; this module only loads
//! configuration, builds the local object store and hands the target object to the
//! core handler. [`run`] returns the handler's [`InvocationResult`] so `main` decides
//! how to print it and which exit code to use.
//!
//! When adding subcommands, extend [`Commands`] and keep non-trivial logic in the core crate.
use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use csv_sanitizer_core::handler::{handle_notification, handle_object, InvocationResult};
use csv_sanitizer_core::store::LocalObjectStore;
use std::path::PathBuf;

/// CLI for csv-sanitizer: validate, clean and republish raw CSV objects.
#[derive(Parser)]
#[clap(
    name = "csv-sanitizer",
    version,
    about = "Validate, clean and republish raw CSV files with a side-channel error log"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Handle an object-created notification stored as a JSON file
    Invoke {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Path to the notification JSON
        #[clap(long)]
        event: PathBuf,
    },
    /// Clean one object addressed by bucket and key
    Clean {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        #[clap(long)]
        bucket: String,
        #[clap(long)]
        key: String,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<InvocationResult> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let result = match cli.command {
        Commands::Invoke { config, event } => {
            let config = load_config(config)?;
            let payload = std::fs::read(&event)
                .with_context(|| format!("Failed to read event file {}", event.display()))?;
            tracing::info!(command = "invoke", event = %event.display(), "Handling notification");
            let store = LocalObjectStore::new(&config.storage_root);
            handle_notification(&config.sanitizer, &store, &payload).await
        }
        Commands::Clean {
            config,
            bucket,
            key,
        } => {
            let config = load_config(config)?;
            tracing::info!(command = "clean", bucket = %bucket, key = %key, "Cleaning object");
            let store = LocalObjectStore::new(&config.storage_root);
            handle_object(&config.sanitizer, &store, &bucket, &key).await
        }
    };

    tracing::info!(status_code = result.status_code, body = %result.body, "Invocation finished");
    Ok(result)
}
