//! Allowance gating for the ERC-20 funded mint path.

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use bonemint_chain::{TokenApprover, TokenReader};
use bonemint_core::MintError;

/// Make sure `spender` may pull at least `required` from `owner`.
///
/// The current allowance is read fresh immediately before each mint (never
/// cached; on-chain state can change between reads). If it already covers
/// `required` the call returns without approving, so repeat invocations are
/// idempotent. Otherwise an approval for exactly `required` is submitted
/// and awaited to finalization.
///
/// Two-phase with no rollback: if the approval lands but the subsequent
/// mint fails, the allowance stays granted and the next attempt skips
/// straight past this step.
pub async fn ensure_allowance(
    owner: Address,
    spender: Address,
    required: U256,
    reader: &dyn TokenReader,
    approver: &dyn TokenApprover,
) -> Result<(), MintError> {
    let current = reader
        .allowance(owner, spender)
        .await
        .map_err(|e| MintError::ApprovalFailed(format!("allowance read failed: {e}")))?;

    if current >= required {
        debug!(%current, %required, "allowance sufficient, skipping approval");
        return Ok(());
    }

    info!(%current, %required, spender = %spender, "requesting approval");
    approver
        .approve(spender, required)
        .await
        .map_err(|e| match e {
            MintError::ApprovalFailed(_) => e,
            other => MintError::ApprovalFailed(other.to_string()),
        })?;
    Ok(())
}
