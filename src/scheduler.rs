//! Timer-driven batch fetching.
//!
//! Navigation only queues ids. A separate timer posts [`Event::FetchTick`] at
//! a fixed interval, and on each tick the scheduler drains the pending set
//! and spawns one task per id. Bursts of cursor movement therefore collapse
//! into a single batch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::event::Event;
use crate::source::ItemSource;
use crate::store::{ItemId, NodeStore};

/// Default interval between fetch ticks in milliseconds.
pub const DEFAULT_FETCH_INTERVAL_MS: u64 = 1000;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Periodic source of [`Event::FetchTick`], stopped when dropped.
pub struct FetchTimer {
    handle: JoinHandle<()>,
}

impl FetchTimer {
    /// Start ticking every `period` onto `tx`.
    pub fn start(period: Duration, tx: mpsc::UnboundedSender<Event>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::FetchTick).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for FetchTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Dispatches fetch tasks and routes each result back as one event.
pub struct FetchScheduler {
    source: Arc<dyn ItemSource>,
    tx: mpsc::UnboundedSender<Event>,
    timeout: Duration,
    dispatched: u64,
}

impl FetchScheduler {
    pub fn new(
        source: Arc<dyn ItemSource>,
        tx: mpsc::UnboundedSender<Event>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            tx,
            timeout,
            dispatched: 0,
        }
    }

    /// Spawn the one-time root collection fetch.
    pub fn bootstrap(&self) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = with_timeout(timeout, source.fetch_collection()).await;
            let _ = tx.send(Event::CollectionFetched(result));
        });
    }

    /// Drain the pending set and dispatch one task per id.
    ///
    /// Returns the number of tasks spawned. Completions arrive in any order.
    pub fn tick(&mut self, store: &mut NodeStore) -> usize {
        let ids = store.drain_pending();
        if ids.is_empty() {
            return 0;
        }
        tracing::debug!(count = ids.len(), first = ids[0], "dispatching fetch batch");
        for &id in &ids {
            self.dispatch(id);
        }
        self.dispatched += ids.len() as u64;
        ids.len()
    }

    fn dispatch(&self, id: ItemId) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = with_timeout(timeout, source.fetch_item(id)).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(Event::ItemFetched(id, result));
        });
    }

    /// Total fetch tasks spawned this session.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(limit)),
    }
}
