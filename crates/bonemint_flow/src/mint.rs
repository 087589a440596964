//! Mint transaction submission.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use bonemint_chain::{CollectionWriter, MintReceipt};
use bonemint_core::MintError;

use crate::request::MintRequest;

/// How a mint is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payment {
    /// Payment in the chain's native currency: the mint call carries
    /// `value = total_cost`.
    Native,
    /// Payment via an ERC-20 token: the mint call carries no value, the
    /// already-granted allowance covers the cost.
    Erc20 { token: Address },
}

/// Broadcast the mint and await on-chain inclusion.
///
/// On the ERC-20 path the caller must have run
/// [`ensure_allowance`](crate::allowance::ensure_allowance) to completion
/// first; the two steps run strictly in series.
pub async fn submit_mint(
    request: &MintRequest,
    payment: Payment,
    writer: &dyn CollectionWriter,
) -> Result<MintReceipt, MintError> {
    let value = match payment {
        Payment::Native => Some(request.total_cost()),
        Payment::Erc20 { .. } => None,
    };

    let pending = writer.mint(request.quantity, value).await?;
    info!(tx_hash = %pending.tx_hash(), quantity = request.quantity, "mint transaction sent");

    let receipt = pending.confirmed().await?;
    info!(block = receipt.block_number, "mint confirmed");
    Ok(receipt)
}
