use alloy::providers::Provider;
use anyhow::Error;
use common::{
    config::{Config, ConfigTrait},
    shared::alloy_tools,
};
use shasta_bindings::{
    BondManagerContract, FilterOpts, InboxContract, ProviderBackend, ProviderBackendConfig,
};
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod monitor;

use monitor::ShastaMonitor;

#[tokio::main]
async fn main() -> Result<(), Error> {
    common::utils::logging::init_logging()?;

    info!("🚀 Starting Shasta monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::read_env_variables()?;
    info!("Startup config:\n{config}");

    let provider = match &config.l1_private_key {
        Some(private_key) => {
            let (provider, address) =
                alloy_tools::create_alloy_provider_with_signer(&config.l1_rpc_url, private_key)
                    .await?;
            info!("Transactions will be signed by {address}");
            provider
        }
        None => alloy_tools::create_alloy_provider_without_wallet(&config.l1_rpc_url).await?,
    };
    let latest_block = provider
        .get_block_number()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get L1 block number: {}", e))?;

    let backend = Arc::new(ProviderBackend::new(
        provider,
        ProviderBackendConfig {
            page_size: config.log_page_size,
            poll_interval: config.log_poll_interval,
            buffer_size: config.log_buffer_size,
        },
    ));
    let inbox = InboxContract::new(config.shasta_inbox_address, backend.clone())
        .map_err(|e| anyhow::anyhow!("Failed to bind Inbox: {}", e))?;
    let bond_manager = BondManagerContract::new(config.bond_manager_address, backend)
        .map_err(|e| anyhow::anyhow!("Failed to bind BondManager: {}", e))?;
    let monitor = ShastaMonitor::new(inbox, bond_manager, config.log_buffer_size);

    if let Err(e) = monitor.log_protocol_state().await {
        warn!("Failed to read inbox state: {}", e);
    }

    if config.l1_start_block <= latest_block {
        let stats = monitor
            .replay(FilterOpts::range(config.l1_start_block, latest_block))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replay historical events: {}", e))?;
        info!(
            "Replayed blocks {}..={}: {:?}",
            config.l1_start_block, latest_block, stats
        );
    }

    let cancel_token = CancellationToken::new();

    // Set up panic hook to cancel token on panic
    let panic_cancel_token = cancel_token.clone();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Panic occurred: {:?}", panic_info);
        panic_cancel_token.cancel();
        info!("Cancellation token triggered, initiating shutdown...");
    }));

    let watches = monitor
        .watch(latest_block.saturating_add(1), &cancel_token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start event watches: {}", e))?;

    wait_for_the_termination(&cancel_token).await?;

    for watch in watches {
        watch.join().await;
    }
    info!("👋 Shasta monitor stopped");
    Ok(())
}

async fn wait_for_the_termination(cancel_token: &CancellationToken) -> Result<(), Error> {
    info!("Starting signal handler...");
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to set up SIGTERM handler: {}", e))?;
    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down..."),
        _ = cancel_token.cancelled() => info!("Shutdown signal received, stopping watches..."),
    }
    cancel_token.cancel();
    Ok(())
}
