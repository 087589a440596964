//! Wallet connection and the per-connection session value.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use bonemint_chain::{Capabilities, SwitchChainError, WalletGateway};
use bonemint_core::{ChainProfile, MintError};

/// Everything a connected wallet session consists of. A single immutable
/// value, replaced wholesale on each successful connect; no field is ever
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub account: Address,
    pub chain_id: u64,
    pub capabilities: Capabilities,
    pub connected_at: DateTime<Utc>,
}

impl Session {
    /// Short display form of the account, `0x1234…abcd` style.
    pub fn short_account(&self) -> String {
        let full = self.account.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

/// Run the connect flow: account discovery, then network alignment.
///
/// If the wallet sits on a different chain a switch is requested; a
/// `ChainUnknown` refusal is recovered by issuing an add-network request
/// with the profile (the wallet switches as part of adding). Any other
/// switch rejection fails the connect with `WrongNetwork`.
pub async fn connect(
    gateway: &dyn WalletGateway,
    profile: &ChainProfile,
    capabilities: Capabilities,
) -> Result<Session, MintError> {
    let accounts = gateway.request_accounts().await?;
    let account = *accounts.first().ok_or(MintError::ConnectionRejected)?;

    let current = gateway.chain_id().await?;
    if current != profile.chain_id {
        match gateway.switch_chain(profile.chain_id).await {
            Ok(()) => {}
            Err(SwitchChainError::ChainUnknown) => {
                gateway
                    .add_chain(profile)
                    .await
                    .map_err(|e| MintError::WrongNetwork(e.to_string()))?;
            }
            Err(SwitchChainError::Rejected(reason)) => {
                return Err(MintError::WrongNetwork(reason));
            }
        }
    }

    info!(account = %account, chain_id = profile.chain_id, "wallet connected");
    Ok(Session {
        account,
        chain_id: profile.chain_id,
        capabilities,
        connected_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use bonemint_core::{chain_profiles, Network};

    #[derive(Default)]
    struct MockGateway {
        accounts: Vec<Address>,
        wallet_chain: u64,
        chain_known: bool,
        decline_switch: bool,
        added_chains: Mutex<Vec<u64>>,
        switch_requests: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl WalletGateway for MockGateway {
        async fn request_accounts(&self) -> Result<Vec<Address>, MintError> {
            Ok(self.accounts.clone())
        }

        async fn chain_id(&self) -> Result<u64, MintError> {
            Ok(self.wallet_chain)
        }

        async fn switch_chain(&self, chain_id: u64) -> Result<(), SwitchChainError> {
            self.switch_requests.lock().push(chain_id);
            if self.decline_switch {
                return Err(SwitchChainError::Rejected("user declined".into()));
            }
            if !self.chain_known {
                return Err(SwitchChainError::ChainUnknown);
            }
            Ok(())
        }

        async fn add_chain(&self, profile: &ChainProfile) -> Result<(), MintError> {
            self.added_chains.lock().push(profile.chain_id);
            Ok(())
        }
    }

    fn puppynet() -> ChainProfile {
        chain_profiles().remove(&Network::Puppynet).unwrap()
    }

    fn account() -> Address {
        Address::repeat_byte(0xaa)
    }

    #[tokio::test]
    async fn connect_on_right_chain_skips_switch() {
        let gateway = MockGateway {
            accounts: vec![account()],
            wallet_chain: 157,
            ..Default::default()
        };

        let session = connect(&gateway, &puppynet(), Capabilities::default())
            .await
            .unwrap();
        assert_eq!(session.account, account());
        assert_eq!(session.chain_id, 157);
        assert!(gateway.switch_requests.lock().is_empty());
    }

    #[tokio::test]
    async fn connect_switches_when_on_wrong_chain() {
        let gateway = MockGateway {
            accounts: vec![account()],
            wallet_chain: 1,
            chain_known: true,
            ..Default::default()
        };

        let session = connect(&gateway, &puppynet(), Capabilities::default())
            .await
            .unwrap();
        assert_eq!(session.chain_id, 157);
        assert_eq!(*gateway.switch_requests.lock(), vec![157]);
        assert!(gateway.added_chains.lock().is_empty());
    }

    #[tokio::test]
    async fn unknown_chain_triggers_add_network() {
        let gateway = MockGateway {
            accounts: vec![account()],
            wallet_chain: 1,
            chain_known: false,
            ..Default::default()
        };

        let session = connect(&gateway, &puppynet(), Capabilities::default())
            .await
            .unwrap();
        assert_eq!(session.chain_id, 157);
        assert_eq!(*gateway.added_chains.lock(), vec![157]);
    }

    #[tokio::test]
    async fn switch_rejection_fails_with_wrong_network() {
        let gateway = MockGateway {
            accounts: vec![account()],
            wallet_chain: 1,
            decline_switch: true,
            ..Default::default()
        };

        let err = connect(&gateway, &puppynet(), Capabilities::default())
            .await
            .unwrap_err();
        match err {
            MintError::WrongNetwork(reason) => assert!(reason.contains("user declined")),
            other => panic!("expected WrongNetwork, got {other:?}"),
        }
        assert!(gateway.added_chains.lock().is_empty());
    }

    #[tokio::test]
    async fn no_authorized_account_is_a_rejection() {
        let gateway = MockGateway {
            wallet_chain: 157,
            ..Default::default()
        };

        let err = connect(&gateway, &puppynet(), Capabilities::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MintError::ConnectionRejected));
    }

    #[test]
    fn short_account_elides_middle() {
        let session = Session {
            account: account(),
            chain_id: 157,
            capabilities: Capabilities::default(),
            connected_at: Utc::now(),
        };
        let short = session.short_account();
        assert!(short.starts_with("0x"));
        assert!(short.contains('…'));
        assert_eq!(short.chars().count(), 11);
    }
}
