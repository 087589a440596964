//! Shared foundation for the BoneMint workspace: error kinds, chain
//! profiles, file-backed configuration, wei/BONE unit conversion, and
//! logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod units;

// Re-export primary types for convenient access.
pub use config::{chain_profiles, validate_url, ChainProfile, FallbackStats, MintConfig, Network};
pub use error::MintError;
pub use units::{format_units, parse_units};
