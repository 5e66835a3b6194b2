//! Remote sync driver: fetch, merge, optional push.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::models::ChangeReport;
use crate::persistence::PersistenceGateway;
use crate::remote::RemoteSource;
use crate::services::QuoteBook;
use crate::state::SyncState;

/// Result of one sync attempt. Everything except `Applied` leaves the store
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote batch changed the store.
    Applied(ChangeReport),
    /// The remote batch matched the store.
    Unchanged,
    /// Another sync was still running.
    Skipped,
    /// Fetching or persisting failed; the error was logged.
    Failed(String),
}

impl SyncOutcome {
    #[must_use]
    pub const fn report(&self) -> Option<&ChangeReport> {
        match self {
            Self::Applied(report) => Some(report),
            _ => None,
        }
    }
}

/// Drives reconciliation between a shared [`QuoteBook`] and a remote source.
///
/// At most one sync runs at a time; overlapping calls return
/// [`SyncOutcome::Skipped`]. The book lock is only taken once the remote
/// batch has fully arrived.
pub struct SyncService<G: PersistenceGateway, R: RemoteSource> {
    book: Arc<Mutex<QuoteBook<G>>>,
    remote: R,
    push_local: bool,
    in_flight: AtomicBool,
    state: std::sync::Mutex<SyncState>,
}

impl<G: PersistenceGateway, R: RemoteSource> SyncService<G, R> {
    pub fn new(book: Arc<Mutex<QuoteBook<G>>>, remote: R) -> Self {
        Self {
            book,
            remote,
            push_local: false,
            in_flight: AtomicBool::new(false),
            state: std::sync::Mutex::new(SyncState::Idle),
        }
    }

    /// Push local quotes to the remote after each successful merge.
    #[must_use]
    pub const fn with_push_local(mut self, enabled: bool) -> Self {
        self.push_local = enabled;
        self
    }

    pub const fn book(&self) -> &Arc<Mutex<QuoteBook<G>>> {
        &self.book
    }

    pub fn state(&self) -> SyncState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one sync. Failures are logged and reported, never propagated.
    pub async fn sync_now(&self) -> SyncOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Sync already in flight; skipping");
            return SyncOutcome::Skipped;
        };
        self.set_state(SyncState::Syncing);

        let batch = match self.remote.fetch_batch().await {
            Ok(batch) => batch,
            Err(error) => return self.fail(format!("Remote fetch failed: {error}")),
        };

        let merged = {
            let mut book = self.book.lock().await;
            book.apply_remote_batch(&batch)
                .map(|report| (report, book.store().all().to_vec()))
        };
        let (report, snapshot) = match merged {
            Ok(merged) => merged,
            Err(error) => return self.fail(format!("Saving merged quotes failed: {error}")),
        };

        if self.push_local {
            if let Err(error) = self.remote.push_local(&snapshot).await {
                tracing::warn!("Pushing local quotes failed: {}", error);
            }
        }

        self.set_state(SyncState::Synced);
        if report.is_empty() {
            tracing::debug!("Remote batch of {} quotes matched local", batch.len());
            SyncOutcome::Unchanged
        } else {
            tracing::info!("Quotes updated from remote: {}", report.summary());
            SyncOutcome::Applied(report)
        }
    }

    /// Sync on every tick of `interval` until `shutdown` resolves. Ticks that
    /// fall due while a sync is running are dropped.
    pub async fn run_periodic<S, F>(&self, interval: Duration, shutdown: S, mut on_outcome: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&SyncOutcome),
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Periodic sync stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.sync_now().await;
                    on_outcome(&outcome);
                }
            }
        }
    }

    fn fail(&self, message: String) -> SyncOutcome {
        tracing::warn!("{}", message);
        self.set_state(SyncState::Error);
        SyncOutcome::Failed(message)
    }

    fn set_state(&self, state: SyncState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
