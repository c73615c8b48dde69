use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use anyhow::Error;
use std::str::FromStr;
use tracing::debug;

enum Endpoint {
    Ws(String),
    Http(Url),
}

fn parse_endpoint(url: &str) -> Result<Endpoint, Error> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        Ok(Endpoint::Ws(url.to_string()))
    } else if url.starts_with("http://") || url.starts_with("https://") {
        let url = Url::parse(url)
            .map_err(|e| anyhow::anyhow!("Failed to parse URL {url} for alloy provider: {e}"))?;
        Ok(Endpoint::Http(url))
    } else {
        Err(anyhow::anyhow!(
            "Invalid URL, only websocket and http are supported: {}",
            url
        ))
    }
}

pub async fn create_alloy_provider_without_wallet(url: &str) -> Result<DynProvider, Error> {
    match parse_endpoint(url)? {
        Endpoint::Ws(url) => Ok(ProviderBuilder::new()
            .connect_ws(WsConnect::new(url))
            .await
            .map_err(|e| Error::msg(format!("Execution layer: Failed to connect to WS: {e}")))?
            .erased()),
        Endpoint::Http(url) => Ok(ProviderBuilder::new().connect_http(url).erased()),
    }
}

/// Creates a provider that signs transactions locally with `private_key`.
/// Returns the provider together with the signer address.
pub async fn create_alloy_provider_with_signer(
    url: &str,
    private_key: &str,
) -> Result<(DynProvider, Address), Error> {
    let signer = PrivateKeySigner::from_str(private_key)
        .map_err(|e| anyhow::anyhow!("Failed to parse private key: {e}"))?;
    let address = signer.address();
    let wallet = EthereumWallet::from(signer);
    debug!("Creating alloy provider with URL: {url} and private key signer {address}");

    let provider = match parse_endpoint(url)? {
        Endpoint::Ws(url) => ProviderBuilder::new()
            .wallet(wallet)
            .connect_ws(WsConnect::new(url))
            .await
            .map_err(|e| Error::msg(format!("Execution layer: Failed to connect to WS: {e}")))?
            .erased(),
        Endpoint::Http(url) => ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased(),
    };
    Ok((provider, address))
}
