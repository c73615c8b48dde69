use alloy::{
    eips::BlockId,
    network::TransactionBuilder,
    primitives::{Address, U256},
    rpc::types::TransactionRequest,
};
use tokio_util::sync::CancellationToken;

/// Options for read-only contract calls.
#[derive(Debug, Clone)]
pub struct CallOpts {
    pub from: Option<Address>,
    pub block: BlockId,
}

impl Default for CallOpts {
    fn default() -> Self {
        Self {
            from: None,
            block: BlockId::latest(),
        }
    }
}

impl CallOpts {
    pub fn at_block(block: impl Into<BlockId>) -> Self {
        Self {
            from: None,
            block: block.into(),
        }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

/// Options for state-changing transactions. The sending account is mandatory.
#[derive(Debug, Clone)]
pub struct TransactOpts {
    pub from: Address,
    pub value: U256,
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub nonce: Option<u64>,
}

impl TransactOpts {
    pub fn new(from: Address) -> Self {
        Self {
            from,
            value: U256::ZERO,
            gas_limit: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            nonce: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_fees(mut self, max_fee_per_gas: u128, max_priority_fee_per_gas: u128) -> Self {
        self.max_fee_per_gas = Some(max_fee_per_gas);
        self.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Applies the options to a request; unset fields are left for the backend to fill.
    pub(crate) fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        tx = tx.with_from(self.from);
        if !self.value.is_zero() {
            tx = tx.with_value(self.value);
        }
        if let Some(gas_limit) = self.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }
        if let Some(max_fee_per_gas) = self.max_fee_per_gas {
            tx = tx.with_max_fee_per_gas(max_fee_per_gas);
        }
        if let Some(max_priority_fee_per_gas) = self.max_priority_fee_per_gas {
            tx = tx.with_max_priority_fee_per_gas(max_priority_fee_per_gas);
        }
        if let Some(nonce) = self.nonce {
            tx = tx.with_nonce(nonce);
        }
        tx
    }
}

/// Block range for historical log queries. `end == None` means up to the latest block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOpts {
    pub start: u64,
    pub end: Option<u64>,
}

impl FilterOpts {
    pub fn range(start: u64, end: u64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn from_block(start: u64) -> Self {
        Self { start, end: None }
    }
}

/// Options for live log watches. Cancelling `cancel` stops the watch.
#[derive(Debug, Clone, Default)]
pub struct WatchOpts {
    pub start: Option<u64>,
    pub cancel: CancellationToken,
}

impl WatchOpts {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            start: None,
            cancel,
        }
    }
}
