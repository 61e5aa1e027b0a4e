//! Store-availability channel.
//!
//! Keeps a locally cached [`StoreState`] in sync with an external source of
//! truth. The contract:
//!
//! - On spawn, subscribe to updates first, then perform one point-in-time
//!   fetch under a bounded timeout so consumers never sit in an indefinite
//!   "unknown" window.
//! - If the fetch fails or times out, fall back to the configured default
//!   (optimistic open unless overridden) and mark the channel degraded -
//!   a non-fatal status, never an error.
//! - Updates are applied in arrival order, last-received-wins. No
//!   debouncing, no coalescing beyond the watch cell's natural
//!   "latest value" semantics.
//! - Consumers read the cached value synchronously; nothing here blocks a
//!   request.
//! - Teardown (explicit [`AvailabilityHandle::shutdown`] or dropping the
//!   last handle) aborts the pump task. The pump is the only writer and
//!   writes only between its await points, so no write can land after
//!   teardown.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use mesa_core::StoreState;

use crate::config::AvailabilityConfig;

/// Capacity of each subscriber's update buffer. The source delivers
/// last-wins scalar state, so a small buffer is plenty.
const SUBSCRIBER_BUFFER: usize = 16;

/// External store-state source: one point-in-time read plus a subscription
/// delivering updates in commit order.
///
/// The storefront depends only on this shape, not on any transport.
pub trait StoreStateSource: Send + Sync + 'static {
    /// Fetch error type. Sources that cannot fail use `Infallible`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Point-in-time read of the current store state.
    fn fetch(&self) -> impl Future<Output = Result<StoreState, Self::Error>> + Send;

    /// Register for update notifications. Each receiver observes every
    /// update published after registration, in publish order.
    fn subscribe(&self) -> mpsc::Receiver<StoreState>;
}

/// Whether the cached value is tracking the source or running on the
/// unknown-state default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Initial fetch has not resolved yet; consumers see the default.
    Starting,
    /// The initial fetch succeeded; the cache tracks the source.
    Live,
    /// The initial fetch failed or timed out; the cache holds the
    /// configured default until the first pushed update arrives.
    Fallback,
}

/// Cloneable read handle over the cached store state.
///
/// All reads are synchronous and non-blocking. Clones share the cache but
/// carry independent change cursors for [`AvailabilityHandle::changed`].
#[derive(Debug, Clone)]
pub struct AvailabilityHandle {
    state_rx: watch::Receiver<StoreState>,
    status_rx: watch::Receiver<ChannelStatus>,
    pump: Arc<PumpGuard>,
}

impl AvailabilityHandle {
    /// The cached store state.
    #[must_use]
    pub fn current(&self) -> StoreState {
        *self.state_rx.borrow()
    }

    /// Shorthand for `current().is_open`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state_rx.borrow().is_open
    }

    /// Whether the channel is live or degraded.
    #[must_use]
    pub fn status(&self) -> ChannelStatus {
        *self.status_rx.borrow()
    }

    /// Wait for the cached value to change. Test and UI plumbing; request
    /// handlers use [`AvailabilityHandle::current`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error after teardown, when no further change can occur.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.state_rx.changed().await
    }

    /// Tear the channel down. Idempotent; after this returns no further
    /// update can reach the cached value.
    pub fn shutdown(&self) {
        self.pump.abort();
    }
}

/// Aborts the pump task when the last handle goes away.
#[derive(Debug)]
struct PumpGuard {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PumpGuard {
    fn abort(&self) {
        if let Ok(mut slot) = self.handle.lock()
            && let Some(handle) = slot.take()
        {
            handle.abort();
        }
    }
}

impl Drop for PumpGuard {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Spawn the availability channel over `source`.
///
/// Subscribes before the initial fetch so an update committed during the
/// fetch is still observed; it is applied after the initial value, which is
/// correct under last-received-wins.
pub fn spawn_channel<S: StoreStateSource>(
    source: S,
    config: &AvailabilityConfig,
) -> AvailabilityHandle {
    let fallback = if config.assume_open_when_unknown {
        StoreState::open()
    } else {
        StoreState::closed()
    };
    let initial_fetch_timeout = config.initial_fetch_timeout;

    let (state_tx, state_rx) = watch::channel(fallback);
    let (status_tx, status_rx) = watch::channel(ChannelStatus::Starting);

    let handle = tokio::spawn(async move {
        let mut updates = source.subscribe();

        match timeout(initial_fetch_timeout, source.fetch()).await {
            Ok(Ok(state)) => {
                state_tx.send_replace(state);
                status_tx.send_replace(ChannelStatus::Live);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "store-state fetch failed, using default");
                status_tx.send_replace(ChannelStatus::Fallback);
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = initial_fetch_timeout.as_millis(),
                    "store-state fetch timed out, using default"
                );
                status_tx.send_replace(ChannelStatus::Fallback);
            }
        }

        // Apply pushed updates in arrival order. Each write happens
        // synchronously between await points, so an abort can never land
        // mid-update.
        while let Some(state) = updates.recv().await {
            state_tx.send_replace(state);
            status_tx.send_replace(ChannelStatus::Live);
        }
    });

    AvailabilityHandle {
        state_rx,
        status_rx,
        pump: Arc::new(PumpGuard {
            handle: Mutex::new(Some(handle)),
        }),
    }
}

/// Process-local store-state source.
///
/// Stands in for the external source of truth (in production a database row
/// with change notifications). The storefront's admin-facing status route
/// writes through [`InMemoryStoreSource::publish`], and every channel
/// subscribed to the source observes the update.
#[derive(Debug, Clone)]
pub struct InMemoryStoreSource {
    inner: Arc<SourceInner>,
}

#[derive(Debug)]
struct SourceInner {
    state: Mutex<StoreState>,
    subscribers: Mutex<Vec<mpsc::Sender<StoreState>>>,
}

impl InMemoryStoreSource {
    /// Create a source with an initial state.
    #[must_use]
    pub fn new(initial: StoreState) -> Self {
        Self {
            inner: Arc::new(SourceInner {
                state: Mutex::new(initial),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Replace the store state and notify all subscribers, in order.
    ///
    /// Publishing never blocks. A subscriber whose buffer is full keeps its
    /// registration and merely misses this update; under last-received-wins
    /// the next publish supersedes it anyway. Only closed receivers are
    /// pruned.
    pub fn publish(&self, state: StoreState) {
        if let Ok(mut current) = self.inner.state.lock() {
            *current = state;
        }
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.retain(|tx| match tx.try_send(state) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!("store-state subscriber buffer full, update skipped");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
        }
    }

    /// The current state, without going through a channel.
    #[must_use]
    pub fn current(&self) -> StoreState {
        self.inner
            .state
            .lock()
            .map_or_else(|_| StoreState::open(), |state| *state)
    }
}

impl StoreStateSource for InMemoryStoreSource {
    type Error = std::convert::Infallible;

    async fn fetch(&self) -> Result<StoreState, Self::Error> {
        Ok(self.current())
    }

    fn subscribe(&self) -> mpsc::Receiver<StoreState> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}
