//! Background refresher that keeps the feed current.

use super::{fetch_collections, ApiClient, Feed};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

/// Run one fetch batch and apply it to the feed.
///
/// Returns whether the outcome was applied (it is dropped when a newer batch
/// started in the meantime).
pub async fn refresh_once(feed: &Feed, client: &ApiClient) -> bool {
    let generation = feed.begin_refresh().await;
    tracing::debug!("Refresher: Starting batch {}", generation);

    let outcome = fetch_collections(client).await;
    feed.complete_refresh(generation, outcome).await
}

/// Periodically refreshes the feed until stopped.
pub struct Refresher {
    feed: Arc<Feed>,
    client: Arc<ApiClient>,
    interval: Option<Duration>,
    stop: Mutex<Option<broadcast::Sender<()>>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl Refresher {
    /// `interval` of `None` fetches once at start and then only on demand.
    pub fn new(feed: Arc<Feed>, client: Arc<ApiClient>, interval: Option<Duration>) -> Self {
        Self {
            feed,
            client,
            interval,
            stop: Mutex::new(None),
            in_flight: Mutex::new(None),
        }
    }

    /// Start the refresher background task.
    ///
    /// The stop channel is registered before the task is spawned, so a
    /// `stop()` issued right after `start()` always reaches it.
    pub async fn start(&self) {
        let (tx, mut rx) = broadcast::channel(1);
        {
            let mut stop_guard = self.stop.lock().await;
            *stop_guard = Some(tx);
        }

        let feed = self.feed.clone();
        let client = self.client.clone();
        let period = self.interval;

        tokio::spawn(async move {
            let Some(period) = period else {
                tokio::select! {
                    biased;
                    _ = rx.recv() => {}
                    _ = refresh_once(&feed, &client) => {}
                }
                return;
            };

            tracing::info!("Refresher: Refreshing every {:?}", period);
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = rx.recv() => break,
                    _ = interval.tick() => {
                        refresh_once(&feed, &client).await;
                    }
                }
            }

            tracing::info!("Refresher: Stopped");
        });
    }

    /// Kick off an immediate refresh without waiting for it.
    ///
    /// A manual refresh still in flight is aborted first, so repeated
    /// triggers never pile up batches.
    pub async fn trigger(&self) {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Refresher: Aborting superseded refresh");
                previous.abort();
            }
            let _ = previous.await;
        }

        let feed = self.feed.clone();
        let client = self.client.clone();
        *in_flight = Some(tokio::spawn(async move {
            refresh_once(&feed, &client).await;
        }));
    }

    /// Stop the refresher and abort any manual refresh in flight.
    pub async fn stop(&self) {
        {
            let stop = self.stop.lock().await;
            if let Some(tx) = stop.as_ref() {
                let _ = tx.send(());
            }
        }

        if let Some(handle) = self.in_flight.lock().await.take() {
            handle.abort();
        }
    }
}
