//! The mint flow: computing an allowed mint quantity against multiple caps,
//! preparing a mint request, gating the ERC-20 funded path behind an
//! allowance approval, and submitting the mint transaction. Also carries
//! the connect flow, fallback-substituted stats refresh, and the
//! cancellable stats poller.

pub mod allowance;
pub mod flow;
pub mod limits;
pub mod mint;
pub mod poller;
pub mod request;
pub mod session;
pub mod stats;

// Re-export primary types for convenient access.
pub use allowance::ensure_allowance;
pub use flow::MintFlow;
pub use limits::MintLimits;
pub use mint::{submit_mint, Payment};
pub use poller::{StatsCell, StatsPoller, StatsSnapshot};
pub use request::{prepare_mint_request, MintRequest};
pub use session::{connect, Session};
pub use stats::{read_limits, refresh_stats, CollectionStats};
