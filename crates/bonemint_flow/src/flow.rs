//! Top-level orchestration of the connect, refresh, and mint actions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info};

use bonemint_chain::{
    collection_abi, Capabilities, CollectionReader, CollectionWriter, MintReceipt, TokenApprover,
    TokenReader, WalletGateway,
};
use bonemint_core::{chain_profiles, ChainProfile, MintConfig, MintError};

use crate::allowance::ensure_allowance;
use crate::mint::{submit_mint, Payment};
use crate::poller::{StatsCell, StatsPoller, StatsSnapshot};
use crate::request::prepare_mint_request;
use crate::session::{connect, Session};
use crate::stats::{read_limits, refresh_stats, CollectionStats};

/// Clears the busy flag on drop so every exit path of a mint attempt,
/// including errors, releases it.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrates one mint front end.
///
/// Each user action (connect, refresh, mint) is a strictly sequential chain
/// of awaited steps. The session is one immutable value replaced wholesale
/// per successful connect, and a busy flag refuses a second mint while one
/// is in flight.
pub struct MintFlow {
    config: MintConfig,
    profile: ChainProfile,
    capabilities: Capabilities,
    session: RwLock<Option<Session>>,
    stats: StatsCell,
    busy: AtomicBool,
}

impl MintFlow {
    pub fn new(config: MintConfig) -> Self {
        let profile = chain_profiles()
            .remove(&config.network)
            .expect("built-in profile exists for every network");
        let capabilities = Capabilities::from_abi(&collection_abi());
        Self {
            config,
            profile,
            capabilities,
            session: RwLock::new(None),
            stats: StatsCell::new(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The current session, if a wallet is connected.
    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Whether a mint or approval is currently outstanding. The UI disables
    /// the mint control while this holds.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// How the configured contract is paid.
    pub fn payment(&self) -> Payment {
        match self.config.payment_token {
            Some(token) if self.capabilities.erc20_payment => Payment::Erc20 { token },
            _ => Payment::Native,
        }
    }

    /// Run the connect flow and install the new session, replacing any
    /// previous one wholesale.
    pub async fn connect(&self, gateway: &dyn WalletGateway) -> Result<Session, MintError> {
        let session = connect(gateway, &self.profile, self.capabilities).await?;
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    /// Refresh the public collection stats (usable without a session) and
    /// publish them as the latest snapshot.
    pub async fn refresh(&self, reader: &dyn CollectionReader) -> CollectionStats {
        let generation = self.stats.begin();
        let stats = refresh_stats(reader, &self.config.fallbacks).await;
        self.stats.publish(generation, stats.clone());
        stats
    }

    /// The most recently published stats snapshot, if any refresh ran yet.
    pub fn latest_stats(&self) -> Option<StatsSnapshot> {
        self.stats.latest()
    }

    /// Spawn a background poller that refreshes into this flow's snapshot
    /// cell at the configured interval.
    pub fn start_poller(&self, reader: Arc<dyn CollectionReader>) -> StatsPoller {
        StatsPoller::start(
            reader,
            self.config.fallbacks.clone(),
            Duration::from_secs(self.config.poll_interval_secs),
            self.stats.clone(),
        )
    }

    /// One mint attempt, end to end.
    ///
    /// Connects first if no session exists (mirroring a mint click before
    /// connect). Limits and price are re-read fresh for the attempt; on the
    /// ERC-20 path the allowance is ensured before the mint is submitted,
    /// strictly in series.
    pub async fn mint(
        &self,
        raw_quantity: &str,
        gateway: &dyn WalletGateway,
        reader: &dyn CollectionReader,
        writer: &dyn CollectionWriter,
        token: Option<(&dyn TokenReader, &dyn TokenApprover)>,
    ) -> Result<MintReceipt, MintError> {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(MintError::Busy)?;

        let session = match self.session() {
            Some(session) => session,
            None => self.connect(gateway).await?,
        };

        let limits = read_limits(
            reader,
            session.account,
            self.capabilities,
            &self.config.fallbacks,
        )
        .await;
        let unit_price = match reader.mint_price().await {
            Ok(price) => price,
            Err(e) => {
                debug!(error = %e, "price read failed, using fallback");
                self.config.fallbacks.price_wei
            }
        };

        let request = prepare_mint_request(raw_quantity, &limits, unit_price)?;
        info!(quantity = request.quantity, total_cost = %request.total_cost(), "mint prepared");

        let payment = self.payment();
        if let Payment::Erc20 { .. } = payment {
            let (token_reader, token_approver) = token.ok_or_else(|| {
                MintError::ApprovalFailed("payment token handles unavailable".into())
            })?;
            ensure_allowance(
                session.account,
                self.config.collection,
                request.total_cost(),
                token_reader,
                token_approver,
            )
            .await?;
        }

        let receipt = submit_mint(&request, payment, writer).await?;

        // Re-read the public stats so the supply counters reflect the mint.
        self.refresh(reader).await;
        Ok(receipt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
