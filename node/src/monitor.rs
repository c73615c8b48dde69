use alloy::sol_types::SolEvent;
use futures_util::StreamExt;
use shasta_bindings::{
    BindingError, CallOpts, ContractBackend, DecodedLog, FilterOpts, WatchOpts,
    bond_manager::{BondManager, BondManagerContract},
    contract::{EventIterator, WatchHandle},
    inbox::{Inbox, InboxContract},
};
use std::pin::pin;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

type Describe<E> = fn(&DecodedLog<E>) -> String;

/// Number of historical events replayed per kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub proposed: usize,
    pub proved: usize,
    pub forced_inclusions: usize,
    pub bonds_credited: usize,
    pub bonds_debited: usize,
}

/// A live event watch and the task that logs what it delivers.
pub struct RunningWatch {
    name: &'static str,
    handle: WatchHandle,
    logger: JoinHandle<()>,
}

impl RunningWatch {
    fn spawn<E: Send + 'static>(
        name: &'static str,
        handle: WatchHandle,
        mut records: mpsc::Receiver<DecodedLog<E>>,
        describe: Describe<E>,
    ) -> Self {
        let logger = tokio::spawn(async move {
            while let Some(record) = records.recv().await {
                info!("{}", describe(&record));
            }
        });
        Self {
            name,
            handle,
            logger,
        }
    }

    /// Waits for the watch to stop; its sink closes after the relay exits, which ends the logger.
    pub async fn join(self) {
        match self.handle.join().await {
            Ok(()) => info!("{} watch stopped", self.name),
            Err(e) => warn!("{} watch failed: {}", self.name, e),
        }
        if let Err(e) = self.logger.await {
            warn!("{} logger task failed: {}", self.name, e);
        }
    }
}

pub struct ShastaMonitor<B> {
    inbox: InboxContract<B>,
    bond_manager: BondManagerContract<B>,
    buffer_size: usize,
}

impl<B: ContractBackend> ShastaMonitor<B> {
    pub fn new(
        inbox: InboxContract<B>,
        bond_manager: BondManagerContract<B>,
        buffer_size: usize,
    ) -> Self {
        Self {
            inbox,
            bond_manager,
            buffer_size: buffer_size.max(1),
        }
    }

    pub async fn log_protocol_state(&self) -> Result<(), BindingError> {
        let opts = CallOpts::default();

        let config = self.inbox.caller.get_config(&opts).await?;
        info!(
            "Inbox config: proving window {}s, ring buffer size {}, min bond {}, liveness bond {}, forced inclusion delay {}s",
            config.provingWindow,
            config.ringBufferSize,
            config.minBond,
            config.livenessBond,
            config.forcedInclusionDelay
        );

        let state = self.inbox.caller.get_core_state(&opts).await?;
        info!(
            "Inbox core state: next proposal {}, last finalized proposal {} at {}, last finalized block hash {}",
            state.nextProposalId,
            state.lastFinalizedProposalId,
            state.lastFinalizedTimestamp,
            state.lastFinalizedBlockHash
        );

        let queue = self.inbox.caller.get_forced_inclusion_state(&opts).await?;
        info!(
            "Forced inclusion queue: head {}, tail {}",
            queue.head_, queue.tail_
        );
        Ok(())
    }

    /// Logs every monitored event in the range of `opts`.
    pub async fn replay(&self, opts: FilterOpts) -> Result<ReplayStats, BindingError> {
        let inbox = &self.inbox.filterer;
        let bond_manager = &self.bond_manager.filterer;

        Ok(ReplayStats {
            proposed: drain(
                inbox.filter_proposed(&opts, &[], &[]).await?,
                describe_proposed,
            )
            .await?,
            proved: drain(inbox.filter_proved(&opts, &[]).await?, describe_proved).await?,
            forced_inclusions: drain(
                inbox.filter_forced_inclusion_saved(&opts).await?,
                describe_forced_inclusion,
            )
            .await?,
            bonds_credited: drain(
                bond_manager.filter_bond_credited(&opts, &[]).await?,
                describe_bond_credited,
            )
            .await?,
            bonds_debited: drain(
                bond_manager.filter_bond_debited(&opts, &[]).await?,
                describe_bond_debited,
            )
            .await?,
        })
    }

    /// Starts live watches from block `start`. All of them stop when `cancel` fires.
    pub async fn watch(
        &self,
        start: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<RunningWatch>, BindingError> {
        let opts = WatchOpts {
            start: Some(start),
            cancel: cancel.clone(),
        };
        let inbox = &self.inbox.filterer;
        let bond_manager = &self.bond_manager.filterer;
        let mut watches = Vec::with_capacity(5);

        let (sink, records) = mpsc::channel(self.buffer_size);
        let handle = inbox.watch_proposed(opts.clone(), sink, &[], &[]).await?;
        watches.push(RunningWatch::spawn(
            "Proposed",
            handle,
            records,
            describe_proposed,
        ));

        let (sink, records) = mpsc::channel(self.buffer_size);
        let handle = inbox.watch_proved(opts.clone(), sink, &[]).await?;
        watches.push(RunningWatch::spawn("Proved", handle, records, describe_proved));

        let (sink, records) = mpsc::channel(self.buffer_size);
        let handle = inbox.watch_forced_inclusion_saved(opts.clone(), sink).await?;
        watches.push(RunningWatch::spawn(
            "ForcedInclusionSaved",
            handle,
            records,
            describe_forced_inclusion,
        ));

        let (sink, records) = mpsc::channel(self.buffer_size);
        let handle = bond_manager
            .watch_bond_credited(opts.clone(), sink, &[])
            .await?;
        watches.push(RunningWatch::spawn(
            "BondCredited",
            handle,
            records,
            describe_bond_credited,
        ));

        let (sink, records) = mpsc::channel(self.buffer_size);
        let handle = bond_manager.watch_bond_debited(opts, sink, &[]).await?;
        watches.push(RunningWatch::spawn(
            "BondDebited",
            handle,
            records,
            describe_bond_debited,
        ));

        info!("Watching {} events from block {}", watches.len(), start);
        Ok(watches)
    }
}

async fn drain<E: SolEvent>(
    iter: EventIterator<E>,
    describe: Describe<E>,
) -> Result<usize, BindingError> {
    let mut records = pin!(iter.into_stream());
    let mut count = 0;
    while let Some(record) = records.next().await {
        info!("{}", describe(&record?));
        count += 1;
    }
    Ok(count)
}

fn block_of<E>(record: &DecodedLog<E>) -> String {
    record
        .raw
        .block_number
        .map_or_else(|| "pending".to_string(), |number| number.to_string())
}

pub fn describe_proposed(record: &DecodedLog<Inbox::Proposed>) -> String {
    let event = &record.event;
    let forced = event
        .sources
        .iter()
        .filter(|source| source.isForcedInclusion)
        .count();
    let blobs: usize = event
        .sources
        .iter()
        .map(|source| source.blobSlice.blobHashes.len())
        .sum();
    format!(
        "Proposed #{} by {} in block {}: {} sources ({} forced), {} blobs, basefee sharing {}%",
        event.id,
        event.proposer,
        block_of(record),
        event.sources.len(),
        forced,
        blobs,
        event.basefeeSharingPctg
    )
}

pub fn describe_proved(record: &DecodedLog<Inbox::Proved>) -> String {
    let event = &record.event;
    format!(
        "Proved proposals {}..={} by {} in block {} (first new {}, checkpoint synced: {})",
        event.firstProposalId,
        event.lastProposalId,
        event.actualProver,
        block_of(record),
        event.firstNewProposalId,
        event.checkpointSynced
    )
}

pub fn describe_forced_inclusion(record: &DecodedLog<Inbox::ForcedInclusionSaved>) -> String {
    let inclusion = &record.event.forcedInclusion;
    format!(
        "Forced inclusion saved in block {}: fee {} gwei, {} blobs, offset {}, timestamp {}",
        block_of(record),
        inclusion.feeInGwei,
        inclusion.blobSlice.blobHashes.len(),
        inclusion.blobSlice.offset,
        inclusion.blobSlice.timestamp
    )
}

pub fn describe_bond_credited(record: &DecodedLog<BondManager::BondCredited>) -> String {
    format!(
        "Bond credited to {} in block {}: {}",
        record.event.account,
        block_of(record),
        record.event.amount
    )
}

pub fn describe_bond_debited(record: &DecodedLog<BondManager::BondDebited>) -> String {
    format!(
        "Bond debited from {} in block {}: {}",
        record.event.account,
        block_of(record),
        record.event.amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        eips::BlockId,
        primitives::{
            Address, B256, Bytes, TxHash, U256,
            aliases::{U24, U48},
        },
        rpc::types::{Filter, Log, TransactionRequest},
        transports::{TransportErrorKind, TransportResult},
    };
    use shasta_bindings::{
        contract::LogSubscription,
        inbox::{IInbox, LibBlobs},
    };
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const INBOX: Address = Address::repeat_byte(0x1b);
    const BOND_MANAGER: Address = Address::repeat_byte(0xb0);

    /// Serves a fixed set of historical logs; reads and writes are unsupported.
    #[derive(Default)]
    struct HistoryBackend {
        logs: Vec<Log>,
        released: Arc<AtomicUsize>,
    }

    impl ContractBackend for HistoryBackend {
        async fn call(&self, _: TransactionRequest, _: BlockId) -> TransportResult<Bytes> {
            Err(TransportErrorKind::custom_str("reads are not served"))
        }

        async fn send_transaction(&self, _: TransactionRequest) -> TransportResult<TxHash> {
            Err(TransportErrorKind::custom_str("writes are not served"))
        }

        async fn filter_logs(&self, filter: Filter) -> TransportResult<LogSubscription> {
            let matching: Vec<Log> = self
                .logs
                .iter()
                .filter(|log| {
                    filter.address.matches(&log.address())
                        && log.topic0().is_some_and(|t| filter.topics[0].matches(t))
                })
                .cloned()
                .collect();
            let (tx, rx) = mpsc::channel(matching.len().max(1));
            for log in matching {
                tx.try_send(Ok(log)).unwrap();
            }
            let released = self.released.clone();
            Ok(LogSubscription::new(rx, move || {
                released.fetch_add(1, Ordering::SeqCst);
            }))
        }

        async fn subscribe_logs(&self, _: Filter) -> TransportResult<LogSubscription> {
            Err(TransportErrorKind::custom_str("live logs are not served"))
        }
    }

    fn log<E: SolEvent>(address: Address, event: &E, block: u64) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address,
                data: event.encode_log_data(),
            },
            block_number: Some(block),
            ..Default::default()
        }
    }

    fn blob_slice(blobs: usize) -> LibBlobs::BlobSlice {
        LibBlobs::BlobSlice {
            blobHashes: vec![B256::repeat_byte(0x0b); blobs],
            offset: U24::from(64u64),
            timestamp: U48::from(1_750_000_000u64),
        }
    }

    fn proposed(id: u64) -> Inbox::Proposed {
        Inbox::Proposed {
            id: U48::from(id),
            proposer: Address::repeat_byte(0x01),
            parentProposalHash: B256::ZERO,
            endOfSubmissionWindowTimestamp: U48::ZERO,
            basefeeSharingPctg: 75,
            sources: vec![
                IInbox::DerivationSource {
                    isForcedInclusion: true,
                    blobSlice: blob_slice(1),
                },
                IInbox::DerivationSource {
                    isForcedInclusion: false,
                    blobSlice: blob_slice(2),
                },
            ],
        }
    }

    fn monitor(backend: HistoryBackend) -> (ShastaMonitor<HistoryBackend>, Arc<AtomicUsize>) {
        let released = backend.released.clone();
        let backend = Arc::new(backend);
        let monitor = ShastaMonitor::new(
            InboxContract::new(INBOX, backend.clone()).unwrap(),
            BondManagerContract::new(BOND_MANAGER, backend).unwrap(),
            4,
        );
        (monitor, released)
    }

    #[tokio::test]
    async fn test_replay_counts_each_event_kind() {
        let credited = BondManager::BondCredited {
            account: Address::repeat_byte(0x02),
            amount: U256::from(10),
        };
        let backend = HistoryBackend {
            logs: vec![
                log(INBOX, &proposed(1), 10),
                log(INBOX, &proposed(2), 11),
                log(BOND_MANAGER, &credited, 11),
                // Same event shape from a foreign contract is ignored.
                log(Address::repeat_byte(0xee), &proposed(3), 12),
            ],
            ..Default::default()
        };
        let (monitor, released) = monitor(backend);

        let stats = monitor.replay(FilterOpts::range(0, 20)).await.unwrap();
        assert_eq!(
            stats,
            ReplayStats {
                proposed: 2,
                bonds_credited: 1,
                ..Default::default()
            }
        );
        assert_eq!(released.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_state_read_failure_is_reported() {
        let (monitor, _) = monitor(HistoryBackend::default());
        assert!(matches!(
            monitor.log_protocol_state().await,
            Err(BindingError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_watch_start_failure_is_reported() {
        let (monitor, _) = monitor(HistoryBackend::default());
        let result = monitor.watch(100, &CancellationToken::new()).await;
        assert!(matches!(result, Err(BindingError::Transport(_))));
    }

    #[test]
    fn test_describe_proposed() {
        let record = DecodedLog {
            event: proposed(42),
            raw: log(INBOX, &proposed(42), 7),
        };
        assert_eq!(
            describe_proposed(&record),
            format!(
                "Proposed #42 by {} in block 7: 2 sources (1 forced), 3 blobs, basefee sharing 75%",
                Address::repeat_byte(0x01)
            )
        );
    }

    #[test]
    fn test_describe_without_block_number() {
        let event = BondManager::BondDebited {
            account: Address::repeat_byte(0x03),
            amount: U256::from(5),
        };
        let record = DecodedLog {
            event,
            raw: Log::default(),
        };
        assert!(describe_bond_debited(&record).ends_with("in block pending: 5"));
    }
}
