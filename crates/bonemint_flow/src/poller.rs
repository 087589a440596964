//! Cancellable periodic stats refresh.
//!
//! Replaces a fire-and-forget interval timer: the poller task is tied to an
//! explicit start/stop lifetime so reconnects cannot leak timers, and
//! published snapshots carry a generation so a stale in-flight refresh can
//! never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use bonemint_chain::CollectionReader;
use bonemint_core::FallbackStats;

use crate::stats::{refresh_stats, CollectionStats};

/// A published stats snapshot with its refresh generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub generation: u64,
    pub stats: CollectionStats,
}

/// Last-write-wins cell for stats snapshots.
///
/// `begin()` hands out a generation at request start; `publish()` applies
/// the result only if no newer generation has landed in the meantime.
/// Refreshes only read chain state, so dropping a stale result is always
/// safe.
#[derive(Debug, Default, Clone)]
pub struct StatsCell {
    latest: Arc<RwLock<Option<StatsSnapshot>>>,
    next_generation: Arc<AtomicU64>,
}

impl StatsCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a generation for a refresh that is about to start.
    pub fn begin(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publish a refresh result. Returns `false` (and drops the result) if a
    /// newer generation was already published.
    pub fn publish(&self, generation: u64, stats: CollectionStats) -> bool {
        let mut latest = self.latest.write();
        if let Some(existing) = latest.as_ref() {
            if existing.generation > generation {
                debug!(
                    generation,
                    newest = existing.generation,
                    "dropping stale stats refresh"
                );
                return false;
            }
        }
        *latest = Some(StatsSnapshot { generation, stats });
        true
    }

    /// The most recently published snapshot, if any refresh completed yet.
    pub fn latest(&self) -> Option<StatsSnapshot> {
        self.latest.read().clone()
    }
}

/// Periodic background refresher writing into a [`StatsCell`].
pub struct StatsPoller {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl StatsPoller {
    /// Spawn the poll task. It refreshes immediately, then on every tick,
    /// until [`stop`](Self::stop) is called or the poller is dropped.
    pub fn start(
        reader: Arc<dyn CollectionReader>,
        fallbacks: FallbackStats,
        interval: Duration,
        cell: StatsCell,
    ) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let generation = cell.begin();
                        let stats = refresh_stats(reader.as_ref(), &fallbacks).await;
                        cell.publish(generation, stats);
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("stats poller shutting down");
                        break;
                    }
                }
            }
        });

        info!(interval_secs = interval.as_secs_f64(), "stats poller started");
        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Stop the poll task and wait for it to wind down.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        // Signal the task; it exits on its own even if nobody awaits it.
        let _ = self.shutdown.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    use bonemint_core::MintError;

    struct CountingReader {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CollectionReader for CountingReader {
        async fn total_supply(&self) -> Result<u64, MintError> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(n as u64)
        }
        async fn max_supply(&self) -> Result<u64, MintError> {
            Ok(10000)
        }
        async fn max_per_tx(&self) -> Result<u64, MintError> {
            Ok(30)
        }
        async fn max_per_wallet(&self) -> Result<u64, MintError> {
            Ok(5)
        }
        async fn minted_by(&self, _owner: Address) -> Result<u64, MintError> {
            Ok(0)
        }
        async fn mint_price(&self) -> Result<U256, MintError> {
            Ok(U256::from(1))
        }
        async fn sale_active(&self) -> Result<bool, MintError> {
            Ok(true)
        }
    }

    fn stats(total_supply: u64) -> CollectionStats {
        CollectionStats {
            total_supply,
            max_supply: 10000,
            remaining: 10000 - total_supply,
            minted_pct: 0,
            price_wei: U256::from(1),
            sale_active: true,
            degraded: false,
        }
    }

    #[test]
    fn cell_publishes_in_order() {
        let cell = StatsCell::new();
        let g1 = cell.begin();
        let g2 = cell.begin();
        assert!(g2 > g1);

        assert!(cell.publish(g1, stats(1)));
        assert!(cell.publish(g2, stats(2)));
        assert_eq!(cell.latest().unwrap().stats.total_supply, 2);
    }

    #[test]
    fn cell_drops_stale_publish() {
        let cell = StatsCell::new();
        let older = cell.begin();
        let newer = cell.begin();

        assert!(cell.publish(newer, stats(2)));
        assert!(!cell.publish(older, stats(1)));

        let latest = cell.latest().unwrap();
        assert_eq!(latest.generation, newer);
        assert_eq!(latest.stats.total_supply, 2);
    }

    #[test]
    fn cell_starts_empty() {
        assert!(StatsCell::new().latest().is_none());
    }

    #[tokio::test]
    async fn poller_publishes_and_stops() {
        let reader = Arc::new(CountingReader {
            reads: AtomicUsize::new(0),
        });
        let cell = StatsCell::new();

        let poller = StatsPoller::start(
            reader.clone(),
            FallbackStats::default(),
            Duration::from_millis(10),
            cell.clone(),
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        poller.stop().await;

        let snapshot = cell.latest().expect("at least one refresh completed");
        assert!(snapshot.generation >= 1);

        // No further refreshes after stop.
        let reads_after_stop = reader.reads.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(reader.reads.load(Ordering::SeqCst), reads_after_stop);
    }

    #[tokio::test]
    async fn dropping_poller_cancels_task() {
        let reader = Arc::new(CountingReader {
            reads: AtomicUsize::new(0),
        });
        let cell = StatsCell::new();

        let poller = StatsPoller::start(
            reader.clone(),
            FallbackStats::default(),
            Duration::from_millis(10),
            cell.clone(),
        );
        tokio::time::sleep(Duration::from_millis(25)).await;
        drop(poller);

        tokio::time::sleep(Duration::from_millis(25)).await;
        let reads_after_drop = reader.reads.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(reader.reads.load(Ordering::SeqCst), reads_after_drop);
    }
}
