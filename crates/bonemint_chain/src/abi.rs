use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};

/// Minimal ABI for the collection contract: the view calls the stats panel
/// needs plus the payable mint.
pub fn collection_abi() -> serde_json::Value {
    serde_json::json!([
        {
            "type": "function",
            "name": "totalSupply",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "MAX_SUPPLY",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "MAX_PER_TX",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "MAX_PER_WALLET",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "mintedBy",
            "inputs": [{ "name": "owner", "type": "address" }],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "MINT_PRICE",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "saleActive",
            "inputs": [],
            "outputs": [{ "name": "", "type": "bool" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "paymentToken",
            "inputs": [],
            "outputs": [{ "name": "", "type": "address" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "mint",
            "inputs": [{ "name": "quantity", "type": "uint256" }],
            "outputs": [],
            "stateMutability": "payable"
        }
    ])
}

/// Minimal ABI for the ERC-20 payment token: allowance read + approval.
pub fn payment_token_abi() -> serde_json::Value {
    serde_json::json!([
        {
            "type": "function",
            "name": "allowance",
            "inputs": [
                { "name": "owner", "type": "address" },
                { "name": "spender", "type": "address" }
            ],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "approve",
            "inputs": [
                { "name": "spender", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ],
            "outputs": [{ "name": "", "type": "bool" }],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "balanceOf",
            "inputs": [{ "name": "account", "type": "address" }],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        }
    ])
}

/// First four bytes of `keccak256(signature)`, e.g. `selector("mint(uint256)")`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// What the loaded collection contract supports, determined once at
/// contract-load time by scanning its ABI. Callers branch on these typed
/// flags instead of probing for function existence at call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Exposes a `saleActive` flag.
    pub sale_flag: bool,
    /// Enforces a per-transaction mint cap.
    pub per_tx_cap: bool,
    /// Enforces a per-wallet mint cap (with a per-caller minted count).
    pub per_wallet_cap: bool,
    /// Minting is funded by an ERC-20 payment token rather than the native
    /// currency; requires the allowance/approval step.
    pub erc20_payment: bool,
}

impl Capabilities {
    /// Scan an ABI definition for the functions backing each capability.
    pub fn from_abi(abi: &serde_json::Value) -> Self {
        let has = |name: &str| {
            abi.as_array()
                .map(|entries| {
                    entries
                        .iter()
                        .any(|e| e.get("name").and_then(|n| n.as_str()) == Some(name))
                })
                .unwrap_or(false)
        };

        Self {
            sale_flag: has("saleActive"),
            per_tx_cap: has("MAX_PER_TX"),
            per_wallet_cap: has("MAX_PER_WALLET") && has("mintedBy"),
            erc20_payment: has("paymentToken"),
        }
    }
}
