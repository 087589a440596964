//! Chain access for the mint flow: collaborator traits for the wallet and
//! contract seams, the minimal contract ABI with capability probing, and a
//! JSON-RPC read-only client for wallet-less stat refreshes.

pub mod abi;
pub mod contract;
pub mod gateway;
pub mod rpc;

// Re-export primary types for convenient access.
pub use abi::{collection_abi, payment_token_abi, selector, Capabilities};
pub use contract::{
    CollectionReader, CollectionWriter, MintReceipt, PendingMint, TokenApprover, TokenReader,
};
pub use gateway::{SwitchChainError, WalletGateway};
pub use rpc::{RpcClient, RpcCollection, RpcToken};
