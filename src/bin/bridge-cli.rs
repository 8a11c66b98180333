use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use signer_bridge::config::{load_config, BridgeConfig};
use signer_bridge::l1::L1Signer;
use signer_bridge::observability::logging::init_logging;
use signer_bridge::remote::{ApiKeyDirectory, HttpApiKeyClient};

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Management CLI for the signer bridge", long_about = None)]
struct Cli {
    /// Bridge configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the API keys registered for an account
    ApiKey {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
        #[arg(short, long)]
        account_index: i64,
        #[arg(short = 's', long)]
        api_key_slot: u8,
    },
    /// Sign the MessageToSign of a transaction document with the L1 key
    ///
    /// Reads BRIDGE_L1_PRIVATE_KEY unless --key is given.
    SignL1 {
        /// Transaction JSON as produced by a Transfer or ChangePubKey build
        tx_json: String,
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Load and validate a configuration file
    CheckConfig { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    init_logging(&config.observability)?;

    match cli.command {
        Commands::ApiKey {
            url,
            account_index,
            api_key_slot,
        } => {
            let timeout = Duration::from_secs(config.remote.timeout_secs);
            let client = HttpApiKeyClient::new(config.remote)?;
            let keys = tokio::time::timeout(
                timeout,
                client.api_keys(&url, account_index, api_key_slot),
            )
            .await
            .map_err(|_| format!("api key lookup timed out after {:?}", timeout))??;
            println!("{}", serde_json::to_string_pretty(&keys)?);
        }
        Commands::SignL1 { tx_json, key } => {
            let signer = match key {
                Some(key) => L1Signer::from_private_key(&key)?,
                None => L1Signer::from_env()?,
            };
            let signature = signer.sign_transaction_document(&tx_json).await?;
            let output = serde_json::json!({
                "address": signer.address().to_string(),
                "signature": signature,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::CheckConfig { path } => match load_config(&path) {
            Ok(config) => {
                println!("{}: ok", path.display());
                println!("{}", toml::to_string_pretty(&config)?);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
