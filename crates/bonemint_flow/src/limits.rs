use serde::{Deserialize, Serialize};

/// The caps a mint quantity is clamped against. Derived from fresh contract
/// reads on demand, never persisted or cached across actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintLimits {
    pub max_per_tx: u64,
    pub max_per_wallet: u64,
    pub minted_by_caller: u64,
    pub total_supply: u64,
    pub max_supply: u64,
}

impl MintLimits {
    /// Tokens left before the collection sells out.
    pub fn remaining_supply(&self) -> u64 {
        self.max_supply.saturating_sub(self.total_supply)
    }

    /// Tokens the caller may still mint under the per-wallet cap.
    pub fn remaining_wallet(&self) -> u64 {
        self.max_per_wallet.saturating_sub(self.minted_by_caller)
    }

    /// The largest quantity a mint transaction may actually carry:
    /// `min(max_per_tx, wallet headroom, remaining supply)`. Zero when the
    /// collection is sold out or the caller's wallet cap is exhausted.
    pub fn true_capacity(&self) -> u64 {
        self.max_per_tx
            .min(self.remaining_wallet())
            .min(self.remaining_supply())
    }

    /// Capacity floored at 1 for quantity inputs and "max" buttons. UI only:
    /// minting re-validates against [`true_capacity`](Self::true_capacity).
    pub fn allowed_quantity(&self) -> u64 {
        self.true_capacity().max(1)
    }
}
