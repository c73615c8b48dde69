use super::{
    bound::{DecodedLog, decode_log},
    error::BindingError,
    subscription::LogSubscription,
};
use alloy::sol_types::SolEvent;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle to a running watch.
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<(), BindingError>>,
}

impl WatchHandle {
    /// Stops the watch. The caller's cancellation token is left untouched.
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the relay to exit and returns the error that ended it, if any.
    pub async fn join(self) -> Result<(), BindingError> {
        self.task
            .await
            .map_err(|e| BindingError::WatchTask(e.to_string()))?
    }
}

pub(crate) fn spawn_relay<E>(
    subscription: LogSubscription,
    sink: mpsc::Sender<DecodedLog<E>>,
    cancel: CancellationToken,
) -> WatchHandle
where
    E: SolEvent + Send + 'static,
{
    let cancel = cancel.child_token();
    let task = tokio::spawn(relay(subscription, sink, cancel.clone()));
    WatchHandle { cancel, task }
}

async fn relay<E: SolEvent>(
    mut subscription: LogSubscription,
    sink: mpsc::Sender<DecodedLog<E>>,
    cancel: CancellationToken,
) -> Result<(), BindingError> {
    let result = loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => break Ok(()),
            item = subscription.recv() => item,
        };
        let log = match item {
            Some(Ok(log)) => log,
            Some(Err(err)) => break Err(BindingError::from_transport(E::SIGNATURE, err)),
            None => break Ok(()),
        };
        let decoded = match decode_log::<E>(&log) {
            Ok(decoded) => decoded,
            Err(err) => break Err(err),
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break Ok(()),
            sent = sink.send(decoded) => {
                if sent.is_err() {
                    debug!("{} watch: sink closed", E::SIGNATURE);
                    break Ok(());
                }
            }
        }
    };

    subscription.unsubscribe();
    if let Err(err) = &result {
        warn!("{} watch stopped: {}", E::SIGNATURE, err);
    }
    result
}
