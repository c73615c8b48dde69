use super::{
    bound::{DecodedLog, decode_log},
    error::BindingError,
    subscription::LogSubscription,
};
use alloy::sol_types::SolEvent;
use futures_util::{Stream, stream};
use std::marker::PhantomData;

/// Pull-based iterator over historical logs of event `E`.
///
/// The first decode or upstream error is terminal: it is kept in [`EventIterator::error`],
/// the subscription is released and `next` returns `None` from then on.
pub struct EventIterator<E> {
    subscription: LogSubscription,
    error: Option<BindingError>,
    done: bool,
    _event: PhantomData<fn() -> E>,
}

impl<E: SolEvent> EventIterator<E> {
    pub(crate) fn new(subscription: LogSubscription) -> Self {
        Self {
            subscription,
            error: None,
            done: false,
            _event: PhantomData,
        }
    }

    pub async fn next(&mut self) -> Option<DecodedLog<E>> {
        if self.done {
            return None;
        }
        match self.subscription.recv().await {
            Some(Ok(log)) => match decode_log::<E>(&log) {
                Ok(decoded) => Some(decoded),
                Err(err) => self.fail(err),
            },
            Some(Err(err)) => self.fail(BindingError::from_transport(E::SIGNATURE, err)),
            None => {
                self.close();
                None
            }
        }
    }

    fn fail(&mut self, err: BindingError) -> Option<DecodedLog<E>> {
        self.error = Some(err);
        self.close();
        None
    }

    pub fn error(&self) -> Option<&BindingError> {
        self.error.as_ref()
    }

    /// Releases the underlying subscription. Safe to call more than once.
    pub fn close(&mut self) {
        self.done = true;
        self.subscription.unsubscribe();
    }

    /// Drains the iterator, returning the terminal error if one occurred.
    pub async fn collect_all(mut self) -> Result<Vec<DecodedLog<E>>, BindingError> {
        let mut events = Vec::new();
        while let Some(event) = self.next().await {
            events.push(event);
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(events),
        }
    }

    /// Adapts the iterator into a stream of results; the terminal error is its last item.
    pub fn into_stream(self) -> impl Stream<Item = Result<DecodedLog<E>, BindingError>> {
        stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            match iter.next().await {
                Some(event) => Some((Ok(event), Some(iter))),
                None => iter.error.take().map(|err| (Err(err), None)),
            }
        })
    }
}
