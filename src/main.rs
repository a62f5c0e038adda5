//! erst-rpc: inspect RPC endpoint configuration and endpoint health.
//!
//! ```text
//! options file / flags / environment
//!     → config::load_config
//!     → RpcClient
//!     → show  : print the resolved configuration
//!     → probe : GET every endpoint, print circuit state per endpoint
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use erst_rpc::config::{load_config, load_options_file, EnvSnapshot, RpcOptions, UrlSource};
use erst_rpc::health::EndpointProber;
use erst_rpc::observability::logging;
use erst_rpc::RpcClient;

#[derive(Parser)]
#[command(name = "erst-rpc")]
#[command(about = "Resolve and probe RPC endpoint configuration", long_about = None)]
struct Cli {
    /// TOML options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated endpoint URLs (overrides ERST_RPC_URLS)
    #[arg(short, long)]
    urls: Option<String>,

    /// Headers as JSON or key=value pairs (overrides ERST_RPC_HEADERS)
    #[arg(long)]
    headers: Option<String>,

    /// Network name: mainnet, testnet, futurenet or a custom name
    #[arg(short, long)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Show,
    /// Probe every endpoint once and print its circuit state
    Probe,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER);

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => load_options_file(path)?,
        None => RpcOptions::default(),
    };
    if let Some(urls) = cli.urls {
        options.urls = Some(UrlSource::Delimited(urls));
    }
    if let Some(headers) = cli.headers {
        options.headers = None;
        options.headers_raw = Some(headers);
    }
    if let Some(network) = cli.network {
        options.network = Some(network);
    }

    let env = EnvSnapshot::from_process();
    let config = load_config(&options, &env)?;

    tracing::info!(
        network = %config.network,
        primary_url = %config.primary_url,
        endpoints = config.alternate_urls.len(),
        "Configuration loaded"
    );

    let client = RpcClient::from_configuration(config, &env)?;

    let output = match cli.command {
        Commands::Show => describe(&client),
        Commands::Probe => {
            let outcomes = EndpointProber::new(&client).probe_all().await;
            let healthy = outcomes.iter().filter(|o| o.healthy).count();
            tracing::info!(healthy, total = outcomes.len(), "Probe complete");
            json!({
                "endpoints": outcomes,
                "selected": client.select_endpoint().map(|s| s.url),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn describe(client: &RpcClient) -> Value {
    let policy = client.policy();
    let mut header_names: Vec<&str> = client.headers().keys().map(String::as_str).collect();
    header_names.sort_unstable();

    json!({
        "network": client.network().to_string(),
        "network_config": client.network_config(),
        "primary_url": client.primary_url(),
        "alternate_urls": client.alternate_urls(),
        "secondary_url": client.secondary_url(),
        "header_names": header_names,
        "has_token": client.token().is_some(),
        "cache_enabled": client.cache_enabled(),
        "request_timeout_ms": client.request_timeout().as_millis() as u64,
        "policy": {
            "timeout_ms": policy.timeout.as_millis() as u64,
            "retries": policy.retries,
            "retry_delay_ms": policy.retry_delay.as_millis() as u64,
            "circuit_breaker_threshold": policy.circuit_breaker_threshold,
            "circuit_breaker_timeout_ms": policy.circuit_breaker_timeout.as_millis() as u64,
            "max_redirects": policy.max_redirects,
        },
        "endpoints": client.endpoint_status(),
    })
}
