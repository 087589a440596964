//! Contract seams: typed view calls against the collection and payment
//! token, and the mint write call with its pending/mined split.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bonemint_core::MintError;

/// Receipt for a mined mint transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintReceipt {
    pub block_number: u64,
    pub tx_hash: String,
}

/// A broadcast-but-unmined mint transaction.
///
/// Mirrors the wallet-library split between sending a transaction and
/// waiting for its inclusion: the hash is known immediately, the receipt
/// only once mined.
#[async_trait]
pub trait PendingMint: Send {
    /// Transaction hash assigned at broadcast.
    fn tx_hash(&self) -> &str;

    /// Await on-chain inclusion. Fails with `MintReverted` if the chain
    /// rejected the transaction, or `NetworkError` if confirmation could
    /// not be observed.
    async fn confirmed(self: Box<Self>) -> Result<MintReceipt, MintError>;
}

/// Read-only view calls against the collection contract. No state change,
/// no gas. Failures map to `ReadFailure`.
#[async_trait]
pub trait CollectionReader: Send + Sync {
    async fn total_supply(&self) -> Result<u64, MintError>;
    async fn max_supply(&self) -> Result<u64, MintError>;
    async fn max_per_tx(&self) -> Result<u64, MintError>;
    async fn max_per_wallet(&self) -> Result<u64, MintError>;
    async fn minted_by(&self, owner: Address) -> Result<u64, MintError>;
    async fn mint_price(&self) -> Result<U256, MintError>;
    async fn sale_active(&self) -> Result<bool, MintError>;
}

/// The mint write call.
#[async_trait]
pub trait CollectionWriter: Send + Sync {
    /// Sign and broadcast `mint(quantity)`, carrying `value` when payment is
    /// in the chain's native currency and no value on the ERC-20 path.
    ///
    /// Fails with `MintRejected` if the user declined the wallet prompt and
    /// `NetworkError` on broadcast failure.
    async fn mint(
        &self,
        quantity: u64,
        value: Option<U256>,
    ) -> Result<Box<dyn PendingMint>, MintError>;
}

/// Allowance view on the ERC-20 payment token.
#[async_trait]
pub trait TokenReader: Send + Sync {
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, MintError>;
}

/// Allowance write on the ERC-20 payment token.
#[async_trait]
pub trait TokenApprover: Send + Sync {
    /// Approve `spender` for exactly `amount` and await finalization of the
    /// approval transaction before returning.
    async fn approve(&self, spender: Address, amount: U256) -> Result<(), MintError>;
}
