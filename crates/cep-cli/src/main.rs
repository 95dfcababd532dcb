use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cep_client::config::ENDPOINT_ENV;
use cep_client::{ClientConfig, CorreiosTracker};
use cep_core::AddressRecord;

#[derive(Parser)]
#[command(name = "cep", version, about = "Correios postal code lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more postal codes and print the normalized addresses as JSON
    Track {
        /// Postal codes to look up (e.g. 01310100)
        #[arg(required = true)]
        ceps: Vec<String>,

        /// Correios search endpoint (defaults to the public endpoint)
        #[arg(short, long, env = ENDPOINT_ENV)]
        endpoint: Option<String>,

        /// Print single-line JSON
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cep=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track {
            ceps,
            endpoint,
            compact,
        } => {
            let config = match endpoint.filter(|e| !e.trim().is_empty()) {
                Some(endpoint) => ClientConfig::new(endpoint),
                None => ClientConfig::from_env(),
            }
            .context("Invalid endpoint configuration")?;
            tracing::debug!(endpoint = %config.endpoint, "Resolved configuration");
            let tracker = cep_client::tracker(config).context("Failed to create HTTP client")?;
            cmd_track(&tracker, &ceps, compact).await?;
        }
    }

    Ok(())
}

async fn cmd_track(tracker: &CorreiosTracker, ceps: &[String], compact: bool) -> Result<()> {
    let output = match ceps {
        [cep] => serde_json::to_value(lookup(tracker, cep).await?)?,
        _ => {
            let mut by_cep = serde_json::Map::new();
            for cep in ceps {
                let records = lookup(tracker, cep).await?;
                by_cep.insert(cep.clone(), serde_json::to_value(records)?);
            }
            serde_json::Value::Object(by_cep)
        }
    };

    if compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

async fn lookup(tracker: &CorreiosTracker, cep: &str) -> Result<Vec<AddressRecord>> {
    let records = tracker
        .track(cep)
        .await
        .with_context(|| format!("Lookup failed for CEP {cep}"))?;

    let found = records.iter().filter(|r| !r.is_not_found()).count();
    tracing::info!(cep = %cep, found, "Lookup complete");

    Ok(records)
}
