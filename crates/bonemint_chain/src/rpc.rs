//! Read-only JSON-RPC client.
//!
//! Stats refresh must work before any wallet is connected, so view calls go
//! straight to the network's HTTP RPC endpoint via `eth_call`. Transport
//! failures map to `NetworkError`; call reverts and undecodable results map
//! to `ReadFailure` (which the stats layer swallows into fallbacks).

use std::time::Duration;

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use bonemint_core::{MintConfig, MintError};

use crate::abi::selector;
use crate::contract::{CollectionReader, TokenReader};

/// Low-level `eth_call` transport over HTTP.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Client for the config's effective RPC endpoint and timeout.
    pub fn from_config(config: &MintConfig) -> Result<Self> {
        Self::new(config.rpc_url(), config.rpc_timeout_secs)
    }

    /// Issue `eth_call` against `to` with raw calldata, returning the raw
    /// result bytes.
    pub async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, MintError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": to.to_string(), "data": format!("0x{}", hex::encode(&data)) },
                "latest"
            ]
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MintError::NetworkError(e.to_string()))?;
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MintError::NetworkError(e.to_string()))?;

        if let Some(error) = payload.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("execution reverted");
            debug!(to = %to, error = message, "eth_call reverted");
            return Err(MintError::ReadFailure(message.to_string()));
        }

        let result = payload
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| MintError::ReadFailure("missing result field".into()))?;
        hex::decode(result.trim_start_matches("0x"))
            .map_err(|e| MintError::ReadFailure(format!("undecodable result: {e}")))
    }

    async fn call_u256(&self, to: Address, data: Vec<u8>) -> Result<U256, MintError> {
        let bytes = self.eth_call(to, data).await?;
        decode_word(&bytes)
    }

    async fn call_u64(&self, to: Address, data: Vec<u8>) -> Result<u64, MintError> {
        Ok(self.call_u256(to, data).await?.saturating_to::<u64>())
    }

    async fn call_bool(&self, to: Address, data: Vec<u8>) -> Result<bool, MintError> {
        Ok(!self.call_u256(to, data).await?.is_zero())
    }
}

/// Build calldata from a function signature and pre-encoded arguments.
fn calldata(signature: &str, args: &[[u8; 32]]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    for arg in args {
        data.extend_from_slice(arg);
    }
    data
}

/// ABI-encode an address argument (left-padded to 32 bytes).
fn encode_address(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Decode a single 32-byte return word.
fn decode_word(bytes: &[u8]) -> Result<U256, MintError> {
    if bytes.len() < 32 {
        return Err(MintError::ReadFailure(format!(
            "short result: {} bytes",
            bytes.len()
        )));
    }
    Ok(U256::from_be_slice(&bytes[..32]))
}

// ---------------------------------------------------------------------------
// Typed wrappers
// ---------------------------------------------------------------------------

/// [`CollectionReader`] backed by [`RpcClient`].
#[derive(Debug, Clone)]
pub struct RpcCollection {
    rpc: RpcClient,
    address: Address,
}

impl RpcCollection {
    pub fn new(rpc: RpcClient, address: Address) -> Self {
        Self { rpc, address }
    }

    /// Reader for the configured collection contract.
    pub fn from_config(config: &MintConfig) -> Result<Self> {
        Ok(Self::new(RpcClient::from_config(config)?, config.collection))
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl CollectionReader for RpcCollection {
    async fn total_supply(&self) -> Result<u64, MintError> {
        self.rpc
            .call_u64(self.address, calldata("totalSupply()", &[]))
            .await
    }

    async fn max_supply(&self) -> Result<u64, MintError> {
        self.rpc
            .call_u64(self.address, calldata("MAX_SUPPLY()", &[]))
            .await
    }

    async fn max_per_tx(&self) -> Result<u64, MintError> {
        self.rpc
            .call_u64(self.address, calldata("MAX_PER_TX()", &[]))
            .await
    }

    async fn max_per_wallet(&self) -> Result<u64, MintError> {
        self.rpc
            .call_u64(self.address, calldata("MAX_PER_WALLET()", &[]))
            .await
    }

    async fn minted_by(&self, owner: Address) -> Result<u64, MintError> {
        self.rpc
            .call_u64(
                self.address,
                calldata("mintedBy(address)", &[encode_address(owner)]),
            )
            .await
    }

    async fn mint_price(&self) -> Result<U256, MintError> {
        self.rpc
            .call_u256(self.address, calldata("MINT_PRICE()", &[]))
            .await
    }

    async fn sale_active(&self) -> Result<bool, MintError> {
        self.rpc
            .call_bool(self.address, calldata("saleActive()", &[]))
            .await
    }
}

/// [`TokenReader`] backed by [`RpcClient`].
#[derive(Debug, Clone)]
pub struct RpcToken {
    rpc: RpcClient,
    address: Address,
}

impl RpcToken {
    pub fn new(rpc: RpcClient, address: Address) -> Self {
        Self { rpc, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl TokenReader for RpcToken {
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, MintError> {
        self.rpc
            .call_u256(
                self.address,
                calldata(
                    "allowance(address,address)",
                    &[encode_address(owner), encode_address(spender)],
                ),
            )
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn calldata_is_selector_plus_words() {
        let owner = address!("0x1111111111111111111111111111111111111111");
        let data = calldata("mintedBy(address)", &[encode_address(owner)]);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], selector("mintedBy(address)").as_slice());
        // 12 zero bytes of padding, then the address.
        assert!(data[4..16].iter().all(|b| *b == 0));
        assert_eq!(&data[16..36], owner.as_slice());
    }

    #[test]
    fn calldata_no_args() {
        let data = calldata("totalSupply()", &[]);
        assert_eq!(data, vec![0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn decode_word_reads_big_endian() {
        let mut word = [0u8; 32];
        word[31] = 7;
        assert_eq!(decode_word(&word).unwrap(), U256::from(7));
    }

    #[test]
    fn decode_word_rejects_short_results() {
        let err = decode_word(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, MintError::ReadFailure(_)));

        let err = decode_word(&[]).unwrap_err();
        assert!(matches!(err, MintError::ReadFailure(_)));
    }

    #[test]
    fn collection_from_config_targets_configured_contract() {
        let mut config = MintConfig::default();
        config.collection = address!("0x2222222222222222222222222222222222222222");

        let collection = RpcCollection::from_config(&config).unwrap();
        assert_eq!(collection.address(), config.collection);
    }

    #[test]
    fn client_from_config_uses_effective_rpc_url() {
        let mut config = MintConfig::default();
        config
            .set_custom_rpc("https://rpc.example.com".to_string())
            .unwrap();

        let rpc = RpcClient::from_config(&config).unwrap();
        assert_eq!(rpc.url, "https://rpc.example.com");
    }

    #[test]
    fn client_builds_with_timeout() {
        let rpc = RpcClient::new("https://puppynet.shibrpc.com", 30).unwrap();
        let collection = RpcCollection::new(
            rpc,
            address!("0xC7faEE890862A86EE391c756597173B9922245D6"),
        );
        assert_eq!(
            collection.address(),
            address!("0xC7faEE890862A86EE391c756597173B9922245D6")
        );
    }
}
