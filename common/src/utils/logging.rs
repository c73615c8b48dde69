use anyhow::Error;
use tracing_subscriber::{EnvFilter, filter::Directive};

const QUIET_DIRECTIVES: [&str; 4] = [
    "alloy_transport_http=off",
    "alloy_rpc_client=off",
    "reqwest=off",
    "hyper_util=off",
];

/// Installs the global fmt subscriber. The level comes from `RUST_LOG` (default `info`);
/// transport internals are always silenced.
pub fn init_logging() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(silence_transport(filter)?) // reads RUST_LOG
        .init();
    Ok(())
}

fn silence_transport(filter: EnvFilter) -> Result<EnvFilter, Error> {
    QUIET_DIRECTIVES.iter().try_fold(filter, |filter, directive| {
        let directive = directive.parse::<Directive>().map_err(|e| {
            anyhow::anyhow!("Failed to parse env filter directive {directive}: {e}")
        })?;
        Ok(filter.add_directive(directive))
    })
}
