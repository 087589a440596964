//! Collection stat refresh with per-read fallback substitution.
//!
//! Read failures never escape this module: each value individually falls
//! back to its configured default so the UI stays usable through flaky RPC
//! reads. Fallback substitution is recorded on the `degraded` flag and
//! logged at debug, nothing more.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bonemint_chain::{Capabilities, CollectionReader};
use bonemint_core::{FallbackStats, MintError};

use crate::limits::MintLimits;

/// Snapshot of the collection's public mint state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_supply: u64,
    pub max_supply: u64,
    pub remaining: u64,
    /// Integer percent minted, capped at 100.
    pub minted_pct: u8,
    pub price_wei: U256,
    pub sale_active: bool,
    /// True when at least one read fell back to a default this refresh.
    pub degraded: bool,
}

fn or_fallback<T>(
    result: Result<T, MintError>,
    fallback: T,
    degraded: &mut bool,
    what: &str,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            debug!(read = what, error = %e, "contract read failed, using fallback");
            *degraded = true;
            fallback
        }
    }
}

/// Read the public stats, substituting fallbacks per failed read.
pub async fn refresh_stats(
    reader: &dyn CollectionReader,
    fallbacks: &FallbackStats,
) -> CollectionStats {
    let mut degraded = false;

    let total_supply = or_fallback(reader.total_supply().await, 0, &mut degraded, "totalSupply");
    let max_supply = or_fallback(
        reader.max_supply().await,
        fallbacks.max_supply,
        &mut degraded,
        "MAX_SUPPLY",
    );
    let price_wei = or_fallback(
        reader.mint_price().await,
        fallbacks.price_wei,
        &mut degraded,
        "MINT_PRICE",
    );
    let sale_active = or_fallback(
        reader.sale_active().await,
        fallbacks.sale_active,
        &mut degraded,
        "saleActive",
    );

    let remaining = max_supply.saturating_sub(total_supply);
    let minted_pct = if max_supply == 0 {
        0
    } else {
        ((total_supply as u128 * 100) / max_supply as u128).min(100) as u8
    };

    CollectionStats {
        total_supply,
        max_supply,
        remaining,
        minted_pct,
        price_wei,
        sale_active,
        degraded,
    }
}

/// Read the caps for a mint attempt by `caller`, fallback-substituted.
///
/// Capabilities the contract does not expose dissolve into no-ops: without
/// a per-wallet cap the wallet headroom is unbounded and the per-caller
/// minted count is not read at all.
pub async fn read_limits(
    reader: &dyn CollectionReader,
    caller: Address,
    capabilities: Capabilities,
    fallbacks: &FallbackStats,
) -> MintLimits {
    let mut degraded = false;

    let max_per_tx = or_fallback(
        reader.max_per_tx().await,
        fallbacks.max_per_tx,
        &mut degraded,
        "MAX_PER_TX",
    );
    let (max_per_wallet, minted_by_caller) = if capabilities.per_wallet_cap {
        (
            or_fallback(
                reader.max_per_wallet().await,
                fallbacks.max_per_tx,
                &mut degraded,
                "MAX_PER_WALLET",
            ),
            or_fallback(reader.minted_by(caller).await, 0, &mut degraded, "mintedBy"),
        )
    } else {
        (u64::MAX, 0)
    };
    let total_supply = or_fallback(reader.total_supply().await, 0, &mut degraded, "totalSupply");
    let max_supply = or_fallback(
        reader.max_supply().await,
        fallbacks.max_supply,
        &mut degraded,
        "MAX_SUPPLY",
    );

    MintLimits {
        max_per_tx,
        max_per_wallet,
        minted_by_caller,
        total_supply,
        max_supply,
    }
}
