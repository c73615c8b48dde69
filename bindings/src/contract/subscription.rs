use alloy::{rpc::types::Log, transports::TransportError};
use tokio::sync::mpsc;

type UnsubscribeFn = Box<dyn FnOnce() + Send>;

/// A stream of logs from one upstream source together with the action that releases it.
///
/// The release action runs at most once: on the first `unsubscribe` call or on drop.
pub struct LogSubscription {
    logs: mpsc::Receiver<Result<Log, TransportError>>,
    unsubscribe: Option<UnsubscribeFn>,
}

impl LogSubscription {
    pub fn new(
        logs: mpsc::Receiver<Result<Log, TransportError>>,
        on_unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            logs,
            unsubscribe: Some(Box::new(on_unsubscribe)),
        }
    }

    /// Next log or upstream error. `None` once the source is exhausted or released.
    pub async fn recv(&mut self) -> Option<Result<Log, TransportError>> {
        if self.unsubscribe.is_none() {
            return None;
        }
        self.logs.recv().await
    }

    pub fn unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            self.logs.close();
            unsubscribe();
        }
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
