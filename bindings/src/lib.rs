//! Typed bindings for the Shasta `BondManager` and `Inbox` L1 contracts.
//!
//! Every binding is split into a read-only caller, a transactor and an event filterer that share
//! one [`contract::BoundContract`] on top of a [`contract::ContractBackend`].

pub mod bond_manager;
pub mod contract;
pub mod inbox;

pub use bond_manager::{BOND_MANAGER_METADATA, BondManagerContract};
pub use contract::{
    BindingError, CallOpts, ContractBackend, DecodedLog, FilterOpts, ProviderBackend,
    ProviderBackendConfig, TransactOpts, WatchOpts,
};
pub use inbox::{INBOX_METADATA, InboxContract};
