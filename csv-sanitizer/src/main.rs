use anyhow::Result;
use clap::Parser;
use csv_sanitizer::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the invocation result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let result = match run(cli).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            return Err(e);
        }
    };

    println!("{}", serde_json::to_string(&result)?);
    if !result.is_success() {
        tracing::error!(status_code = result.status_code, "Invocation did not succeed");
        std::process::exit(1);
    }
    tracing::info!("CLI completed successfully");
    Ok(())
}
