//! Wallet seam: account discovery, network identity, and network switching.

use alloy_primitives::Address;
use async_trait::async_trait;

use bonemint_core::{ChainProfile, MintError};

/// Failure modes of a wallet network-switch request.
#[derive(Debug, thiserror::Error)]
pub enum SwitchChainError {
    /// The wallet does not know the requested chain. Recoverable: issue an
    /// add-network request with the chain profile and retry.
    #[error("Chain unknown to wallet")]
    ChainUnknown,

    /// Any other rejection. Fatal to the connect attempt.
    #[error("Switch rejected: {0}")]
    Rejected(String),
}

/// Browser-wallet primitives the mint flow depends on but does not implement.
///
/// Implementations bridge to an injected provider (MetaMask or compatible).
/// All methods suspend on user prompts or RPC round-trips; callers chain
/// them strictly in sequence.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Prompt for account access. An empty list means the user authorized
    /// no account; implementations may also fail with `ConnectionRejected`.
    async fn request_accounts(&self) -> Result<Vec<Address>, MintError>;

    /// Chain ID the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64, MintError>;

    /// Ask the wallet to switch to `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), SwitchChainError>;

    /// Ask the wallet to add the network described by `profile`.
    async fn add_chain(&self, profile: &ChainProfile) -> Result<(), MintError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_unknown_is_distinguishable() {
        let err = SwitchChainError::ChainUnknown;
        assert!(matches!(err, SwitchChainError::ChainUnknown));

        let rejected = SwitchChainError::Rejected("user declined".into());
        assert!(rejected.to_string().contains("user declined"));
    }
}
