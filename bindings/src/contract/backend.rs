use super::subscription::LogSubscription;
use alloy::{
    eips::BlockId,
    primitives::{Bytes, TxHash, U256},
    providers::Provider,
    rpc::types::{Filter, Log, TransactionRequest},
    transports::{TransportError, TransportResult},
};
use std::{future::Future, ops::RangeInclusive, time::Duration};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Low level chain access used by bound contracts.
pub trait ContractBackend: Send + Sync + 'static {
    /// Executes a read-only call against the given block.
    fn call(
        &self,
        request: TransactionRequest,
        block: BlockId,
    ) -> impl Future<Output = TransportResult<Bytes>> + Send;

    /// Signs and submits a transaction, returning its hash without waiting for inclusion.
    fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> impl Future<Output = TransportResult<TxHash>> + Send;

    /// Streams the historical logs matching `filter`. The stream ends after the last match.
    fn filter_logs(
        &self,
        filter: Filter,
    ) -> impl Future<Output = TransportResult<LogSubscription>> + Send;

    /// Streams logs matching `filter` as new blocks arrive, until unsubscribed. Logs already
    /// mined from the filter's start block onwards are delivered first.
    fn subscribe_logs(
        &self,
        filter: Filter,
    ) -> impl Future<Output = TransportResult<LogSubscription>> + Send;
}

#[derive(Debug, Clone)]
pub struct ProviderBackendConfig {
    /// Number of blocks per `eth_getLogs` request when reading history.
    pub page_size: u64,
    /// Delay between `eth_getFilterChanges` polls.
    pub poll_interval: Duration,
    /// Capacity of the channel between the log producer and its consumer.
    pub buffer_size: usize,
}

impl Default for ProviderBackendConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            poll_interval: Duration::from_secs(2),
            buffer_size: 256,
        }
    }
}

/// [`ContractBackend`] over an alloy provider.
#[derive(Debug, Clone)]
pub struct ProviderBackend<P> {
    provider: P,
    config: ProviderBackendConfig,
}

impl<P: Provider + Clone + 'static> ProviderBackend<P> {
    pub fn new(provider: P, config: ProviderBackendConfig) -> Self {
        Self { provider, config }
    }
}

impl<P: Provider + Clone + 'static> ContractBackend for ProviderBackend<P> {
    async fn call(&self, request: TransactionRequest, block: BlockId) -> TransportResult<Bytes> {
        self.provider.call(request).block(block).await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> TransportResult<TxHash> {
        let pending = self.provider.send_transaction(request).await?;
        Ok(*pending.tx_hash())
    }

    async fn filter_logs(&self, filter: Filter) -> TransportResult<LogSubscription> {
        let from = filter.get_from_block().unwrap_or_default();
        let to = match filter.get_to_block() {
            Some(to) => to,
            None => self.provider.get_block_number().await?,
        };
        let page_size = self.config.page_size.max(1);

        let (tx, rx) = mpsc::channel(self.config.buffer_size.max(1));
        let cancel = CancellationToken::new();
        let provider = self.provider.clone();
        let task_cancel = cancel.clone();

        debug!(from, to, page_size, "Reading historical logs");
        tokio::spawn(async move {
            forward_history(&provider, &filter, from..=to, page_size, &tx, &task_cancel).await;
        });

        Ok(LogSubscription::new(rx, move || cancel.cancel()))
    }

    async fn subscribe_logs(&self, filter: Filter) -> TransportResult<LogSubscription> {
        let filter_id = self.provider.new_filter(&filter).await?;
        debug!("Installed log filter {filter_id}");

        let (tx, rx) = mpsc::channel(self.config.buffer_size.max(1));
        let cancel = CancellationToken::new();
        let provider = self.provider.clone();
        let poll_interval = self.config.poll_interval;
        let page_size = self.config.page_size.max(1);
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let mut changes = FilterChanges {
                filter_id,
                poll_interval,
                delivered_up_to: None,
            };
            // eth_getFilterChanges only reports blocks mined after the filter was installed.
            let backfilled = match filter.get_from_block() {
                Some(from) => match provider.get_block_number().await {
                    Ok(head) => {
                        debug!(from, head, "Backfilling logs mined before the filter");
                        changes.delivered_up_to = Some(head);
                        forward_history(&provider, &filter, from..=head, page_size, &tx, &task_cancel)
                            .await
                    }
                    Err(err) => {
                        forward(&tx, &task_cancel, Err(err)).await;
                        false
                    }
                },
                None => true,
            };
            if backfilled {
                changes.poll(&provider, &tx, &task_cancel).await;
            }
            match provider.uninstall_filter(filter_id).await {
                Ok(_) => debug!("Uninstalled log filter {filter_id}"),
                Err(err) => warn!("Failed to uninstall log filter {filter_id}: {err}"),
            }
        });

        Ok(LogSubscription::new(rx, move || cancel.cancel()))
    }
}

/// Pages `eth_getLogs` over `range`. Returns false when the consumer is gone, the
/// subscription was cancelled or a request failed.
async fn forward_history<P: Provider>(
    provider: &P,
    filter: &Filter,
    range: RangeInclusive<u64>,
    page_size: u64,
    tx: &mpsc::Sender<Result<Log, TransportError>>,
    cancel: &CancellationToken,
) -> bool {
    let (mut start, to) = range.into_inner();
    while start <= to {
        let end = to.min(start.saturating_add(page_size - 1));
        let page = filter.clone().from_block(start).to_block(end);
        let logs = tokio::select! {
            _ = cancel.cancelled() => return false,
            logs = provider.get_logs(&page) => logs,
        };
        match logs {
            Ok(logs) => {
                for log in logs {
                    if !forward(tx, cancel, Ok(log)).await {
                        return false;
                    }
                }
            }
            Err(err) => {
                forward(tx, cancel, Err(err)).await;
                return false;
            }
        }
        match end.checked_add(1) {
            Some(next) => start = next,
            None => break,
        }
    }
    true
}

struct FilterChanges {
    filter_id: U256,
    poll_interval: Duration,
    /// Last block already covered by the backfill; changes up to it are dropped.
    delivered_up_to: Option<u64>,
}

impl FilterChanges {
    fn is_new(&self, log: &Log) -> bool {
        match (self.delivered_up_to, log.block_number) {
            (Some(head), Some(number)) => number > head,
            _ => true,
        }
    }

    async fn poll<P: Provider>(
        &self,
        provider: &P,
        tx: &mpsc::Sender<Result<Log, TransportError>>,
        cancel: &CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
            match provider.get_filter_changes::<Log>(self.filter_id).await {
                Ok(logs) => {
                    for log in logs.into_iter().filter(|log| self.is_new(log)) {
                        if !forward(tx, cancel, Ok(log)).await {
                            return;
                        }
                    }
                }
                Err(err) => {
                    forward(tx, cancel, Err(err)).await;
                    return;
                }
            }
        }
    }
}

/// Sends one item to the consumer. Returns false when the consumer is gone or cancelled.
async fn forward(
    tx: &mpsc::Sender<Result<Log, TransportError>>,
    cancel: &CancellationToken,
    item: Result<Log, TransportError>,
) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        sent = tx.send(item) => sent.is_ok(),
    }
}
