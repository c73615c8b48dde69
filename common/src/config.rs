use alloy::primitives::{Address, hex::FromHexError};
use anyhow::Error;
use std::{fmt, str::FromStr, time::Duration};
use tracing::warn;

pub trait ConfigTrait: Sized {
    fn read_env_variables() -> Result<Self, Error>;
}

pub fn address_parse_error(env_var: &str, err: FromHexError, value: &str) -> Error {
    anyhow::anyhow!("Failed to parse {env_var} address {value}: {err}")
}

#[derive(Clone)]
pub struct Config {
    pub l1_rpc_url: String,
    pub bond_manager_address: Address,
    pub shasta_inbox_address: Address,
    pub l1_private_key: Option<String>,
    pub l1_start_block: u64,
    pub log_page_size: u64,
    pub log_poll_interval: Duration,
    pub log_buffer_size: usize,
}

impl ConfigTrait for Config {
    fn read_env_variables() -> Result<Self, Error> {
        // Load environment variables from .env file
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Config {
    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        const L1_RPC_URL: &str = "L1_RPC_URL";
        let l1_rpc_url =
            lookup(L1_RPC_URL).ok_or_else(|| anyhow::anyhow!("{L1_RPC_URL} env var not found"))?;

        let read_contract_address = |env_var: &str, contract_name: &str| {
            match lookup(env_var) {
                Some(value) => Address::from_str(&value)
                    .map_err(|e| address_parse_error(env_var, e, &value)),
                None => {
                    warn!(
                        "No {} contract address found in {} env var, using default",
                        contract_name, env_var
                    );
                    Ok(Address::ZERO)
                }
            }
        };
        let bond_manager_address = read_contract_address("BOND_MANAGER_ADDRESS", "BondManager")?;
        let shasta_inbox_address = read_contract_address("SHASTA_INBOX_ADDRESS", "Inbox")?;

        let l1_private_key = lookup("L1_PRIVATE_KEY").filter(|key| !key.is_empty());

        let l1_start_block = lookup("L1_START_BLOCK")
            .unwrap_or("0".to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("L1_START_BLOCK must be a number: {}", e))?;

        let log_page_size = lookup("LOG_PAGE_SIZE")
            .unwrap_or("1000".to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("LOG_PAGE_SIZE must be a number: {}", e))
            .and_then(|val| {
                if val == 0 {
                    return Err(anyhow::anyhow!("LOG_PAGE_SIZE must be a positive number"));
                }
                Ok(val)
            })?;

        let log_poll_interval = Duration::from_millis(
            lookup("LOG_POLL_INTERVAL_MS")
                .unwrap_or("2000".to_string())
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("LOG_POLL_INTERVAL_MS must be a number: {}", e))?,
        );

        let log_buffer_size = lookup("LOG_BUFFER_SIZE")
            .unwrap_or("256".to_string())
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("LOG_BUFFER_SIZE must be a number: {}", e))?;

        Ok(Config {
            l1_rpc_url,
            bond_manager_address,
            shasta_inbox_address,
            l1_private_key,
            l1_start_block,
            log_page_size,
            log_poll_interval,
            log_buffer_size,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "l1 rpc url: {}", self.l1_rpc_url)?;
        writeln!(f, "bond manager address: {}", self.bond_manager_address)?;
        writeln!(f, "shasta inbox address: {}", self.shasta_inbox_address)?;
        writeln!(
            f,
            "signer: {}",
            if self.l1_private_key.is_some() {
                "private key"
            } else {
                "none (read only)"
            }
        )?;
        writeln!(f, "l1 start block: {}", self.l1_start_block)?;
        writeln!(f, "log page size: {}", self.log_page_size)?;
        writeln!(
            f,
            "log poll interval: {}ms",
            self.log_poll_interval.as_millis()
        )?;
        writeln!(f, "log buffer size: {}", self.log_buffer_size)?;
        Ok(())
    }
}
