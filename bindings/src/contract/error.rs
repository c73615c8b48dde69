use alloy::{
    primitives::{B256, Bytes},
    sol_types::SolInterface,
    transports::TransportError,
};
use std::fmt;

#[derive(Debug)]
pub enum BindingError {
    /// The embedded interface description could not be parsed.
    AbiParse(String),
    /// The selector is not part of the bound contract's interface.
    UnknownMethod(&'static str),
    /// The event is not part of the bound contract's interface.
    UnknownEvent(&'static str),
    /// A non-zero value was attached to a non-payable function.
    NonPayable(&'static str),
    /// The call returned no data although the function has outputs.
    EmptyResponse(&'static str),
    Decode {
        method: &'static str,
        source: alloy::sol_types::Error,
    },
    /// The remote execution reverted; `data` is the raw revert payload.
    Revert {
        method: &'static str,
        data: Bytes,
    },
    Transport(TransportError),
    MissingEventSignature,
    EventSignatureMismatch {
        expected: B256,
        actual: B256,
    },
    LogDecode {
        event: &'static str,
        source: alloy::sol_types::Error,
    },
    WatchTask(String),
}

impl BindingError {
    /// Maps a backend error raised while executing `method`, keeping the revert payload if any.
    pub(crate) fn from_transport(method: &'static str, err: TransportError) -> Self {
        match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            Some(data) => BindingError::Revert { method, data },
            None => BindingError::Transport(err),
        }
    }

    pub fn revert_data(&self) -> Option<&Bytes> {
        match self {
            BindingError::Revert { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Decodes the revert payload into one of the contract's declared errors.
    pub fn decode_revert<E: SolInterface>(&self) -> Option<E> {
        self.revert_data()
            .and_then(|data| E::abi_decode(data).ok())
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::AbiParse(msg) => write!(f, "Failed to parse contract ABI: {msg}"),
            BindingError::UnknownMethod(method) => {
                write!(f, "Method {method} not found in contract ABI")
            }
            BindingError::UnknownEvent(event) => {
                write!(f, "Event {event} not found in contract ABI")
            }
            BindingError::NonPayable(method) => {
                write!(f, "Method {method} is not payable but a value was provided")
            }
            BindingError::EmptyResponse(method) => {
                write!(f, "Call to {method} returned no data")
            }
            BindingError::Decode { method, source } => {
                write!(f, "Failed to decode return data of {method}: {source}")
            }
            BindingError::Revert { method, data } => {
                write!(f, "Execution of {method} reverted with data {data}")
            }
            BindingError::Transport(err) => write!(f, "Transport error: {err}"),
            BindingError::MissingEventSignature => write!(f, "Log has no event signature topic"),
            BindingError::EventSignatureMismatch { expected, actual } => write!(
                f,
                "Event signature mismatch: expected {expected}, got {actual}"
            ),
            BindingError::LogDecode { event, source } => {
                write!(f, "Failed to decode {event} log: {source}")
            }
            BindingError::WatchTask(msg) => write!(f, "Watch task failed: {msg}"),
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindingError::Decode { source, .. } | BindingError::LogDecode { source, .. } => {
                Some(source)
            }
            BindingError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for BindingError {
    fn from(err: TransportError) -> Self {
        BindingError::Transport(err)
    }
}
