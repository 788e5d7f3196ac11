//! Command-line front end for a shared config file.
//!
//! ```text
//! shared-config app.json get height weight
//! shared-config app.json dump
//! shared-config app.json watch weight --interval-ms 500
//! ```

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use shared_config::observability::{logging, metrics};
use shared_config::SharedConfig;

#[derive(Parser)]
#[command(name = "shared-config")]
#[command(about = "Read and watch a hot-reloadable key/value config file", long_about = None)]
struct Cli {
    /// Backing file: a JSON object of strings, or a TOML table for `.toml`
    file: PathBuf,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "shared_config=info")]
    log: String,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of each key once
    Get {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the whole config as JSON
    Dump,
    /// Print the given keys (or everything) once, then again whenever they change, until Ctrl-C
    Watch {
        keys: Vec<String>,

        /// How often to check for changes
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr);
    }

    let config = SharedConfig::new(&cli.file)?;

    match cli.command {
        Commands::Get { keys } => {
            for key in keys {
                println!("{}={}", key, config.get(&key).await);
            }
        }
        Commands::Dump => {
            let sorted: BTreeMap<_, _> = config.snapshot().await.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        Commands::Watch { keys, interval_ms } => {
            watch(&config, &keys, Duration::from_millis(interval_ms)).await;
        }
    }

    config.close();
    Ok(())
}

async fn watch(config: &SharedConfig, keys: &[String], interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<BTreeMap<String, String>> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = read_keys(config, keys).await;
                if last.as_ref() != Some(&current) {
                    for (key, value) in &current {
                        println!("{}={}", key, value);
                    }
                    println!();
                    last = Some(current);
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, closing shared config");
                break;
            }
        }
    }
}

async fn read_keys(config: &SharedConfig, keys: &[String]) -> BTreeMap<String, String> {
    if keys.is_empty() {
        return config.snapshot().await.into_iter().collect();
    }

    let mut values = BTreeMap::new();
    for key in keys {
        values.insert(key.clone(), config.get(key).await);
    }
    values
}
