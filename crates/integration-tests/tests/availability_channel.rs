//! Integration tests for the store-availability channel contract.
//!
//! Covers the subscription lifecycle end to end: seed fetch, pushed
//! transitions, fallback policy, and the no-writes-after-teardown
//! guarantee.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use mesa_core::StoreState;
use mesa_storefront::config::AvailabilityConfig;
use mesa_storefront::services::{
    AvailabilityHandle, ChannelStatus, InMemoryStoreSource, StoreStateSource, spawn_channel,
};

fn optimistic_config() -> AvailabilityConfig {
    AvailabilityConfig {
        assume_open_when_unknown: true,
        initial_fetch_timeout: Duration::from_millis(200),
    }
}

/// Wait for the initial fetch to resolve. The pump subscribes before it
/// fetches, so once the status leaves `Starting` the subscription is
/// registered and a publish cannot be missed.
async fn wait_for_settled(handle: &AvailabilityHandle) {
    timeout(Duration::from_secs(1), async {
        while handle.status() == ChannelStatus::Starting {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("initial fetch resolves");
}

async fn wait_until(handle: &AvailabilityHandle, predicate: impl Fn(StoreState) -> bool) {
    let mut rx = handle.clone();
    timeout(Duration::from_secs(1), async {
        while !predicate(rx.current()) {
            rx.changed().await.expect("channel alive");
        }
    })
    .await
    .expect("state converges");
}

#[tokio::test]
async fn test_open_close_transition_reaches_readers() {
    let source = InMemoryStoreSource::new(StoreState::open());
    let handle = spawn_channel(source.clone(), &optimistic_config());
    wait_for_settled(&handle).await;
    assert!(handle.is_open());

    source.publish(StoreState::closed().with_wait_minutes(30));
    wait_until(&handle, |s| !s.is_open).await;

    let current = handle.current();
    assert_eq!(current.estimated_wait_minutes, Some(30));

    // A later reopen overrides it: last received wins.
    source.publish(StoreState::open());
    wait_until(&handle, |s| s.is_open).await;
}

#[tokio::test]
async fn test_clones_share_one_cached_value() {
    let source = InMemoryStoreSource::new(StoreState::open());
    let handle = spawn_channel(source.clone(), &optimistic_config());
    let reader = handle.clone();
    wait_for_settled(&handle).await;

    source.publish(StoreState::closed());
    wait_until(&handle, |s| !s.is_open).await;

    assert!(!reader.is_open(), "clone observes the same cache");
}

#[tokio::test]
async fn test_teardown_stops_all_updates() {
    let source = InMemoryStoreSource::new(StoreState::open());
    let handle = spawn_channel(source.clone(), &optimistic_config());
    wait_for_settled(&handle).await;

    handle.shutdown();
    source.publish(StoreState::closed());
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(handle.is_open(), "no callback fires after teardown");
    // Shutdown is idempotent.
    handle.shutdown();
    assert!(handle.is_open());
}

#[tokio::test]
async fn test_source_failure_is_non_fatal() {
    struct FlakySource;

    #[derive(Debug, thiserror::Error)]
    #[error("store-state row unreachable")]
    struct RowUnreachable;

    impl StoreStateSource for FlakySource {
        type Error = RowUnreachable;

        async fn fetch(&self) -> Result<StoreState, Self::Error> {
            Err(RowUnreachable)
        }

        fn subscribe(&self) -> mpsc::Receiver<StoreState> {
            mpsc::channel(1).1
        }
    }

    let handle = spawn_channel(FlakySource, &optimistic_config());
    wait_for_settled(&handle).await;

    // Degraded, not broken: readers still get the default synchronously.
    assert_eq!(handle.status(), ChannelStatus::Fallback);
    assert!(handle.is_open());
}

#[tokio::test]
async fn test_update_after_degraded_start_recovers() {
    struct FailingThenPushing {
        source: InMemoryStoreSource,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("initial read failed")]
    struct ReadFailed;

    impl StoreStateSource for FailingThenPushing {
        type Error = ReadFailed;

        async fn fetch(&self) -> Result<StoreState, Self::Error> {
            Err(ReadFailed)
        }

        fn subscribe(&self) -> mpsc::Receiver<StoreState> {
            self.source.subscribe()
        }
    }

    let pusher = InMemoryStoreSource::new(StoreState::open());
    let handle = spawn_channel(
        FailingThenPushing {
            source: pusher.clone(),
        },
        &optimistic_config(),
    );
    wait_for_settled(&handle).await;
    assert_eq!(handle.status(), ChannelStatus::Fallback);

    // The channel keeps operating on pushed updates after a failed fetch.
    pusher.publish(StoreState::closed());
    wait_until(&handle, |s| !s.is_open).await;
    assert_eq!(handle.status(), ChannelStatus::Live);
}
