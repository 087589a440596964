use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use bonemint_core::MintError;

use crate::limits::MintLimits;

/// One mint attempt: quantity plus the unit price it was quoted at.
/// Created transiently per attempt and discarded after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub quantity: u64,
    pub unit_price_wei: U256,
}

impl MintRequest {
    /// `unit_price_wei * quantity`, exact integer arithmetic. Overflow is
    /// ruled out by [`prepare_mint_request`]; a hand-built request saturates.
    pub fn total_cost(&self) -> U256 {
        self.unit_price_wei.saturating_mul(U256::from(self.quantity))
    }
}

/// Parse and clamp a requested quantity into a [`MintRequest`].
///
/// `raw` comes from a text input. It must parse as a positive integer
/// (`InvalidQuantity` otherwise); the value is then clamped into
/// `[1, limits.true_capacity()]`. Fails when no quantity is mintable at all
/// (sold out, or the caller's wallet cap is exhausted).
pub fn prepare_mint_request(
    raw: &str,
    limits: &MintLimits,
    unit_price_wei: U256,
) -> Result<MintRequest, MintError> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err(MintError::InvalidQuantity(format!(
            "quantity must be positive, got {raw}"
        )));
    }
    let requested: u128 = raw
        .parse()
        .map_err(|_| MintError::InvalidQuantity(format!("not a whole number: {raw:?}")))?;
    if requested == 0 {
        return Err(MintError::InvalidQuantity(
            "quantity must be at least 1".into(),
        ));
    }

    let capacity = limits.true_capacity();
    if capacity == 0 {
        return Err(MintError::InvalidQuantity(
            "nothing mintable: collection sold out or wallet cap reached".into(),
        ));
    }

    let quantity = requested.min(capacity as u128) as u64;
    if unit_price_wei
        .checked_mul(U256::from(quantity))
        .is_none()
    {
        return Err(MintError::InvalidQuantity(
            "total cost overflows 256 bits".into(),
        ));
    }

    Ok(MintRequest {
        quantity,
        unit_price_wei,
    })
}
