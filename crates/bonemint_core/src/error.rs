//! Error kinds surfaced by mint-flow actions.

/// Errors that a connect, refresh, approve, or mint action can produce.
///
/// `ReadFailure` is special: the stats layer swallows it and substitutes a
/// fallback default, so it never reaches the initiating action. Every other
/// kind propagates and is surfaced as a transient notification. Nothing here
/// is fatal to the process; each failure leaves the system ready for the
/// user to retry the same action.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// The user declined wallet access.
    #[error("Wallet access rejected by the user")]
    ConnectionRejected,

    /// Unable to switch to or add the required network.
    #[error("Wrong network: {0}")]
    WrongNetwork(String),

    /// The requested mint quantity is not a usable positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A contract view call reverted or timed out.
    #[error("Contract read failed: {0}")]
    ReadFailure(String),

    /// The ERC-20 approval call was rejected or errored.
    #[error("Approval failed: {0}")]
    ApprovalFailed(String),

    /// The user declined the mint transaction in their wallet.
    #[error("Mint transaction rejected by the user")]
    MintRejected,

    /// The chain rejected the mint (sale inactive, insufficient funds, ...).
    #[error("Mint transaction reverted: {0}")]
    MintReverted(String),

    /// Broadcast or RPC transport failure.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A mint or approval is already in flight for this session.
    #[error("A mint is already in progress")]
    Busy,
}

impl MintError {
    /// Short stable tag for each kind, used when labelling notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            MintError::ConnectionRejected => "connection_rejected",
            MintError::WrongNetwork(_) => "wrong_network",
            MintError::InvalidQuantity(_) => "invalid_quantity",
            MintError::ReadFailure(_) => "read_failure",
            MintError::ApprovalFailed(_) => "approval_failed",
            MintError::MintRejected => "mint_rejected",
            MintError::MintReverted(_) => "mint_reverted",
            MintError::NetworkError(_) => "network_error",
            MintError::Busy => "busy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_reason() {
        let err = MintError::MintReverted("sale inactive".into());
        assert!(err.to_string().contains("sale inactive"));
    }

    #[test]
    fn kind_tags_are_distinct() {
        let errors = [
            MintError::ConnectionRejected,
            MintError::WrongNetwork(String::new()),
            MintError::InvalidQuantity(String::new()),
            MintError::ReadFailure(String::new()),
            MintError::ApprovalFailed(String::new()),
            MintError::MintRejected,
            MintError::MintReverted(String::new()),
            MintError::NetworkError(String::new()),
            MintError::Busy,
        ];
        let mut tags: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), errors.len());
    }
}
