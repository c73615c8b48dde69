mod backend;
mod bound;
mod error;
mod iterator;
pub(crate) mod macros;
mod metadata;
mod opts;
mod subscription;
pub mod topics;
mod watch;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::{ContractBackend, ProviderBackend, ProviderBackendConfig};
pub use bound::{BoundContract, DecodedLog, decode_log};
pub use error::BindingError;
pub use iterator::EventIterator;
pub use metadata::{ContractMetadata, Interface};
pub use opts::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
pub use subscription::LogSubscription;
pub use topics::IntoTopic;
pub use watch::WatchHandle;
