//! Zenoh bridge exposing a virtual PMIC measurement instrument.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use zenmon_common::keyexpr::AttrKeyBuilder;
use zenmon_common::{LoggingConfig, connect, init_tracing};
use zenmon_instrument::{Channel, bindings};

use zenoh_bridge_vpmic::config::VpmicBridgeConfig;
use zenoh_bridge_vpmic::host::InstrumentHost;
use zenoh_bridge_vpmic::status::InstrumentStatus;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(about = "Zenoh bridge exposing a virtual PMIC instrument")]
struct BridgeArgs {
    /// Path to configuration file.
    #[arg(short, long, default_value = "vpmic.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = BridgeArgs::parse();

    let config = VpmicBridgeConfig::load_from_file(&args.config)?;

    // CLI log level wins over the config file.
    let log_config = match &args.log_level {
        Some(level) => LoggingConfig {
            level: level.clone(),
            ..config.logging.clone()
        },
        None => config.logging.clone(),
    };
    init_tracing(&log_config).map_err(|e| anyhow::anyhow!("{}", e))?;

    let version = env!("CARGO_PKG_VERSION");
    tracing::info!(instrument = %config.instrument.name, version, "Starting vpmic bridge");

    let session = connect(&config.zenoh)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let host = InstrumentHost::attach(&session, &config.instrument).await?;

    let keys = AttrKeyBuilder::with_prefix(&config.instrument.key_prefix, &config.instrument.name);
    let status_key = keys.status_key();

    let metadata = serde_json::json!({
        "key_prefix": config.instrument.key_prefix,
        "channels": Channel::COUNT,
        "attributes": bindings().len(),
    });
    if let Err(e) = InstrumentStatus::running(&config.instrument.name, version)
        .with_metadata(metadata)
        .publish(&session, &status_key)
        .await
    {
        tracing::warn!(error = %e, "Failed to publish running status");
    }

    tracing::info!("Bridge running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal");

    if let Err(e) = InstrumentStatus::offline(&config.instrument.name, version)
        .publish(&session, &status_key)
        .await
    {
        tracing::warn!(error = %e, "Failed to publish offline status");
    }

    host.detach().await;

    session
        .close()
        .await
        .map_err(|e| anyhow::anyhow!("Error closing Zenoh session: {}", e))?;

    tracing::info!("Goodbye!");
    Ok(())
}
