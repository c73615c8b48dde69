use super::{
    backend::ContractBackend,
    error::BindingError,
    iterator::EventIterator,
    metadata::{ContractMetadata, Interface},
    opts::{CallOpts, FilterOpts, TransactOpts, WatchOpts},
    watch::{self, WatchHandle},
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, B256, TxHash},
    rpc::types::{Filter, Log, TransactionRequest},
    sol_types::{SolCall, SolEvent},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// A decoded event together with the raw log it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog<E> {
    pub event: E,
    pub raw: Log,
}

/// Generic handle to a deployed contract: address, parsed interface and backend.
pub struct BoundContract<B> {
    address: Address,
    name: &'static str,
    interface: Arc<Interface>,
    backend: Arc<B>,
}

impl<B> Clone for BoundContract<B> {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            name: self.name,
            interface: self.interface.clone(),
            backend: self.backend.clone(),
        }
    }
}

impl<B: ContractBackend> BoundContract<B> {
    pub fn new(
        address: Address,
        metadata: &ContractMetadata,
        backend: Arc<B>,
    ) -> Result<Self, BindingError> {
        let interface = Arc::new(metadata.parse()?);
        debug!("Bound {} at {}", metadata.name, address);
        Ok(Self {
            address,
            name: metadata.name,
            interface,
            backend,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn ensure_known<C: SolCall>(&self) -> Result<(), BindingError> {
        if self.interface.function(&C::SELECTOR.into()).is_none() {
            return Err(BindingError::UnknownMethod(C::SIGNATURE));
        }
        Ok(())
    }

    fn ensure_event<E: SolEvent>(&self) -> Result<(), BindingError> {
        if self.interface.event(&E::SIGNATURE_HASH).is_none() {
            return Err(BindingError::UnknownEvent(E::SIGNATURE));
        }
        Ok(())
    }

    /// Executes `call` as `eth_call` and decodes its typed return value.
    pub async fn call<C: SolCall>(&self, opts: &CallOpts, call: C) -> Result<C::Return, BindingError> {
        self.ensure_known::<C>()?;

        let mut request = TransactionRequest::default()
            .with_to(self.address)
            .with_call(&call);
        if let Some(from) = opts.from {
            request = request.with_from(from);
        }

        debug!("{}: call {} at {:?}", self.name, C::SIGNATURE, opts.block);
        let output = self
            .backend
            .call(request, opts.block)
            .await
            .map_err(|e| BindingError::from_transport(C::SIGNATURE, e))?;

        let has_outputs = self
            .interface
            .function(&C::SELECTOR.into())
            .is_some_and(|function| !function.outputs.is_empty());
        if output.is_empty() && has_outputs {
            return Err(BindingError::EmptyResponse(C::SIGNATURE));
        }

        C::abi_decode_returns(&output).map_err(|source| BindingError::Decode {
            method: C::SIGNATURE,
            source,
        })
    }

    /// Submits `call` as a transaction signed for `opts.from`.
    pub async fn transact<C: SolCall>(
        &self,
        opts: &TransactOpts,
        call: C,
    ) -> Result<TxHash, BindingError> {
        self.ensure_known::<C>()?;
        if !opts.value.is_zero() && !self.interface.is_payable(&C::SELECTOR.into()) {
            return Err(BindingError::NonPayable(C::SIGNATURE));
        }

        let request = opts.apply(
            TransactionRequest::default()
                .with_to(self.address)
                .with_call(&call),
        );

        debug!("{}: transact {} from {}", self.name, C::SIGNATURE, opts.from);
        self.backend
            .send_transaction(request)
            .await
            .map_err(|e| BindingError::from_transport(C::SIGNATURE, e))
    }

    fn event_filter<E: SolEvent>(&self, topics: [Vec<B256>; 3]) -> Filter {
        let [topic1, topic2, topic3] = topics;
        let mut filter = Filter::new()
            .address(self.address)
            .event_signature(E::SIGNATURE_HASH);
        if !topic1.is_empty() {
            filter = filter.topic1(topic1);
        }
        if !topic2.is_empty() {
            filter = filter.topic2(topic2);
        }
        if !topic3.is_empty() {
            filter = filter.topic3(topic3);
        }
        filter
    }

    /// Iterates over the historical `E` logs in the range of `opts`.
    pub async fn filter_logs<E: SolEvent>(
        &self,
        opts: &FilterOpts,
        topics: [Vec<B256>; 3],
    ) -> Result<EventIterator<E>, BindingError> {
        self.ensure_event::<E>()?;
        let mut filter = self.event_filter::<E>(topics).from_block(opts.start);
        if let Some(end) = opts.end {
            filter = filter.to_block(end);
        }

        debug!(
            "{}: filter {} from {} to {:?}",
            self.name,
            E::SIGNATURE,
            opts.start,
            opts.end
        );
        let subscription = self
            .backend
            .filter_logs(filter)
            .await
            .map_err(|e| BindingError::from_transport(E::SIGNATURE, e))?;
        Ok(EventIterator::new(subscription))
    }

    /// Forwards newly emitted `E` logs into `sink` until `opts.cancel` fires or an error occurs.
    pub async fn watch_logs<E>(
        &self,
        opts: WatchOpts,
        sink: mpsc::Sender<DecodedLog<E>>,
        topics: [Vec<B256>; 3],
    ) -> Result<WatchHandle, BindingError>
    where
        E: SolEvent + Send + 'static,
    {
        self.ensure_event::<E>()?;
        let mut filter = self.event_filter::<E>(topics);
        if let Some(start) = opts.start {
            filter = filter.from_block(start);
        }

        debug!("{}: watch {}", self.name, E::SIGNATURE);
        let subscription = self
            .backend
            .subscribe_logs(filter)
            .await
            .map_err(|e| BindingError::from_transport(E::SIGNATURE, e))?;
        Ok(watch::spawn_relay(subscription, sink, opts.cancel))
    }

    pub fn unpack_log<E: SolEvent>(&self, log: &Log) -> Result<DecodedLog<E>, BindingError> {
        self.ensure_event::<E>()?;
        decode_log(log)
    }
}

/// Decodes `log` as event `E`, checking the event signature topic first.
pub fn decode_log<E: SolEvent>(log: &Log) -> Result<DecodedLog<E>, BindingError> {
    let topic0 = log
        .topic0()
        .copied()
        .ok_or(BindingError::MissingEventSignature)?;
    if topic0 != E::SIGNATURE_HASH {
        return Err(BindingError::EventSignatureMismatch {
            expected: E::SIGNATURE_HASH,
            actual: topic0,
        });
    }

    let decoded = log
        .log_decode::<E>()
        .map_err(|source| BindingError::LogDecode {
            event: E::SIGNATURE,
            source,
        })?;
    Ok(DecodedLog {
        event: decoded.inner.data,
        raw: log.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bond_manager::{BOND_MANAGER_METADATA, BondManager},
        contract::test_utils::{MockBackend, rpc_log},
        inbox::Inbox::InboxActivated,
    };
    use alloy::primitives::U256;

    fn bound(backend: Arc<MockBackend>) -> BoundContract<MockBackend> {
        BoundContract::new(Address::repeat_byte(0x42), &BOND_MANAGER_METADATA, backend).unwrap()
    }

    #[test]
    fn test_invalid_metadata_fails_fast() {
        let metadata = ContractMetadata::new("Broken", "not json");
        let result = BoundContract::new(
            Address::ZERO,
            &metadata,
            Arc::new(MockBackend::default()),
        );
        assert!(matches!(result, Err(BindingError::AbiParse(_))));
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let backend = Arc::new(MockBackend::default());
        let contract = BoundContract::new(
            Address::ZERO,
            &crate::inbox::INBOX_METADATA,
            backend.clone(),
        )
        .unwrap();

        let result = contract
            .call(
                &CallOpts::default(),
                BondManager::bondCall {
                    account: Address::ZERO,
                },
            )
            .await;
        assert!(matches!(result, Err(BindingError::UnknownMethod(_))));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_response_for_function_with_outputs() {
        let backend = Arc::new(MockBackend::default());
        let contract = bound(backend.clone());
        let result = contract
            .call(&CallOpts::default(), BondManager::minBondCall {})
            .await;
        assert!(matches!(result, Err(BindingError::EmptyResponse(_))));
    }

    #[tokio::test]
    async fn test_non_payable_with_value_is_rejected() {
        let backend = Arc::new(MockBackend::default());
        let contract = bound(backend.clone());
        let opts = TransactOpts::new(Address::repeat_byte(0x01)).with_value(U256::from(1));
        let result = contract.transact(&opts, BondManager::pauseCall {}).await;
        assert!(matches!(result, Err(BindingError::NonPayable(_))));
        assert!(backend.sent_transactions().is_empty());
    }

    #[test]
    fn test_decode_log_checks_signature() {
        let contract = bound(Arc::new(MockBackend::default()));
        let credited = BondManager::BondCredited {
            account: Address::repeat_byte(0x07),
            amount: U256::from(9),
        };
        let log = rpc_log(Address::repeat_byte(0x42), &credited, 3);

        let decoded = contract
            .unpack_log::<BondManager::BondCredited>(&log)
            .unwrap();
        assert_eq!(decoded.event, credited);
        assert_eq!(decoded.raw.block_number, Some(3));

        assert!(matches!(
            contract.unpack_log::<BondManager::BondDebited>(&log),
            Err(BindingError::EventSignatureMismatch { .. })
        ));
        assert!(matches!(
            contract.unpack_log::<BondManager::BondCredited>(&Log::default()),
            Err(BindingError::MissingEventSignature)
        ));
    }

    #[tokio::test]
    async fn test_event_of_another_contract_is_rejected() {
        let backend = Arc::new(MockBackend::default());
        let contract = bound(backend.clone());
        let activated = InboxActivated {
            lastPacayaBlockHash: B256::repeat_byte(0x01),
        };
        let log = rpc_log(Address::repeat_byte(0x42), &activated, 1);

        assert!(matches!(
            contract.unpack_log::<InboxActivated>(&log),
            Err(BindingError::UnknownEvent(_))
        ));
        assert!(matches!(
            contract
                .filter_logs::<InboxActivated>(&FilterOpts::default(), Default::default())
                .await,
            Err(BindingError::UnknownEvent(_))
        ));
        assert!(backend.filters().is_empty());
    }

    #[test]
    fn test_event_filter_topics() {
        let contract = bound(Arc::new(MockBackend::default()));
        let account = Address::repeat_byte(0x09);
        let filter = contract.event_filter::<BondManager::WithdrawalRequested>([
            vec![account.into_word()],
            vec![],
            vec![],
        ]);
        assert!(
            filter.topics[0].matches(&BondManager::WithdrawalRequested::SIGNATURE_HASH)
        );
        assert!(filter.topics[1].matches(&account.into_word()));
        assert!(filter.topics[2].is_empty());
    }
}
