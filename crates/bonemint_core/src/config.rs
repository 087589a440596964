use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use alloy_primitives::{address, Address, U256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Supported Shibarium-family networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Shibarium,
    Puppynet,
}

impl Network {
    /// Human-readable label for the network.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Shibarium => "Shibarium",
            Network::Puppynet => "Puppynet Testnet",
        }
    }

    /// EVM chain ID.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Shibarium => 109,
            Network::Puppynet => 157,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Network-specific connection details. Doubles as the add-network payload
/// handed to the wallet when the chain is unknown to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainProfile {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer_url: String,
    pub native_symbol: String,
    pub native_decimals: u8,
}

/// Returns the built-in profiles for all supported networks.
pub fn chain_profiles() -> HashMap<Network, ChainProfile> {
    let mut profiles = HashMap::new();

    profiles.insert(
        Network::Shibarium,
        ChainProfile {
            name: "Shibarium".to_string(),
            chain_id: 109,
            rpc_url: "https://www.shibrpc.com".to_string(),
            explorer_url: "https://shibariumscan.io".to_string(),
            native_symbol: "BONE".to_string(),
            native_decimals: 18,
        },
    );

    profiles.insert(
        Network::Puppynet,
        ChainProfile {
            name: "Puppynet Testnet".to_string(),
            chain_id: 157,
            rpc_url: "https://puppynet.shibrpc.com".to_string(),
            explorer_url: "https://puppyscan.shib.io".to_string(),
            native_symbol: "BONE".to_string(),
            native_decimals: 18,
        },
    );

    profiles
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Fallback defaults
// ---------------------------------------------------------------------------

/// Defaults substituted when a contract read fails.
///
/// Substitution keeps the UI usable through flaky RPC reads; the values are
/// never surfaced as errors. `sale_active` deliberately falls back to
/// `false` so a read outage cannot claim the sale is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackStats {
    pub max_supply: u64,
    pub max_per_tx: u64,
    pub price_wei: U256,
    pub sale_active: bool,
}

impl Default for FallbackStats {
    fn default() -> Self {
        Self {
            max_supply: 10_000,
            max_per_tx: 30,
            // 0.1 BONE
            price_wei: U256::from(100_000_000_000_000_000u64),
            sale_active: false,
        }
    }
}

// ---------------------------------------------------------------------------
// MintConfig
// ---------------------------------------------------------------------------

const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

const DEFAULT_COLLECTION: Address = address!("0xC7faEE890862A86EE391c756597173B9922245D6");

/// File-backed settings for one mint front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    /// Address of the NFT collection contract.
    pub collection: Address,
    /// ERC-20 payment token, when minting is BONE-token-funded rather than
    /// paid in the chain's native currency.
    pub payment_token: Option<Address>,
    pub network: Network,
    /// Custom RPC endpoint overriding the profile default.
    pub custom_rpc: Option<String>,
    pub poll_interval_secs: u64,
    pub rpc_timeout_secs: u64,
    pub fallbacks: FallbackStats,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION,
            payment_token: None,
            network: Network::Puppynet,
            custom_rpc: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
            fallbacks: FallbackStats::default(),
        }
    }
}

impl MintConfig {
    /// Effective RPC endpoint: the custom override if set and valid,
    /// otherwise the network profile default.
    pub fn rpc_url(&self) -> String {
        if let Some(custom) = &self.custom_rpc {
            if validate_url(custom) {
                return custom.clone();
            }
        }
        chain_profiles()
            .remove(&self.network)
            .map(|p| p.rpc_url)
            .unwrap_or_default()
    }

    /// Set a custom RPC endpoint. Returns `Err` if the URL fails validation.
    pub fn set_custom_rpc(&mut self, url: String) -> Result<()> {
        if !validate_url(&url) {
            anyhow::bail!("invalid RPC URL: {url}");
        }
        self.custom_rpc = Some(url);
        Ok(())
    }

    /// Persist the config to a JSON file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Load config from a JSON file. Returns defaults if the file does not
    /// exist or does not parse (a corrupt config never blocks startup).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Ok(serde_json::from_str(&json).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
