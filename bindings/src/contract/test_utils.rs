use super::{backend::ContractBackend, subscription::LogSubscription};
use alloy::{
    eips::BlockId,
    primitives::{Address, B256, Bytes, TxHash, U256},
    rpc::types::{Filter, Log, TransactionRequest},
    sol_types::{SolCall, SolEvent},
    transports::{TransportError, TransportErrorKind, TransportResult},
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::mpsc;

type LogSender = mpsc::Sender<Result<Log, TransportError>>;

/// In-memory backend: canned call results by selector, recorded requests and logs.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<[u8; 4], Bytes>>,
    calls: Mutex<Vec<TransactionRequest>>,
    sent: Mutex<Vec<TransactionRequest>>,
    filters: Mutex<Vec<Filter>>,
    history: Mutex<Vec<Log>>,
    live: Mutex<Option<LogSender>>,
    unsubscribed: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn respond<C: SolCall>(&self, output: impl Into<Bytes>) {
        self.responses
            .lock()
            .unwrap()
            .insert(C::SELECTOR, output.into());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<TransactionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn filters(&self) -> Vec<Filter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn push_log(&self, log: Log) {
        self.history.lock().unwrap().push(log);
    }

    /// Sender feeding the most recent live subscription.
    pub fn live_sender(&self) -> LogSender {
        self.live
            .lock()
            .unwrap()
            .clone()
            .expect("no live subscription")
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribed.load(Ordering::SeqCst)
    }

    fn subscription(&self, rx: mpsc::Receiver<Result<Log, TransportError>>) -> LogSubscription {
        let unsubscribed = self.unsubscribed.clone();
        LogSubscription::new(rx, move || {
            unsubscribed.fetch_add(1, Ordering::SeqCst);
        })
    }
}

pub fn input_of(request: &TransactionRequest) -> Bytes {
    request.input.input().cloned().unwrap_or_default()
}

impl ContractBackend for MockBackend {
    async fn call(&self, request: TransactionRequest, _block: BlockId) -> TransportResult<Bytes> {
        let input = input_of(&request);
        self.calls.lock().unwrap().push(request);
        let selector: [u8; 4] = input
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| TransportErrorKind::custom_str("calldata without selector"))?;
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_transaction(&self, request: TransactionRequest) -> TransportResult<TxHash> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(request);
        Ok(B256::from(U256::from(sent.len())))
    }

    async fn filter_logs(&self, filter: Filter) -> TransportResult<LogSubscription> {
        let matching: Vec<Log> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|log| matches_topics(&filter, log))
            .cloned()
            .collect();
        self.filters.lock().unwrap().push(filter);

        let (tx, rx) = mpsc::channel(matching.len().max(1));
        for log in matching {
            tx.try_send(Ok(log)).unwrap();
        }
        Ok(self.subscription(rx))
    }

    async fn subscribe_logs(&self, filter: Filter) -> TransportResult<LogSubscription> {
        self.filters.lock().unwrap().push(filter);
        let (tx, rx) = mpsc::channel(16);
        *self.live.lock().unwrap() = Some(tx);
        Ok(self.subscription(rx))
    }
}

/// Positional topic match; an empty set accepts any value.
fn matches_topics(filter: &Filter, log: &Log) -> bool {
    filter.topics.iter().enumerate().all(|(position, set)| {
        set.is_empty() || log.topics().get(position).is_some_and(|topic| set.matches(topic))
    })
}

/// A subscription fed by the returned sender that counts how often it was released.
pub fn counting_subscription() -> (LogSender, LogSubscription, Arc<AtomicUsize>) {
    let (tx, rx) = mpsc::channel(4);
    let counter = Arc::new(AtomicUsize::new(0));
    let cloned = counter.clone();
    let sub = LogSubscription::new(rx, move || {
        cloned.fetch_add(1, Ordering::SeqCst);
    });
    (tx, sub, counter)
}

/// Builds the RPC log an `event` emitted by `address` in block `block` would produce.
pub fn rpc_log<E: SolEvent>(address: Address, event: &E, block: u64) -> Log {
    Log {
        inner: alloy::primitives::Log {
            address,
            data: event.encode_log_data(),
        },
        block_hash: Some(B256::repeat_byte(0xbb)),
        block_number: Some(block),
        transaction_hash: Some(B256::from(U256::from(block))),
        transaction_index: Some(0),
        log_index: Some(0),
        ..Default::default()
    }
}
