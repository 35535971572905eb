//! Feed module: fetches the raw status collections and holds the latest
//! snapshot for the web layer.

mod client;
mod refresher;

pub use client::*;
pub use refresher::*;

use crate::status::{DataState, Platform, StatusCheck, StatusMessage, StatusResult};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

const DEFAULT_ERROR_MESSAGE: &str = "Unable to load status data.";

/// The four raw collections the engine consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub platforms: Vec<Platform>,
    pub checks: Vec<StatusCheck>,
    pub results: Vec<StatusResult>,
    pub messages: Vec<StatusMessage>,
}

/// Fetch all four collections concurrently.
///
/// All-or-nothing: the first failure fails the whole batch.
pub async fn fetch_collections(client: &ApiClient) -> Result<Collections, ClientError> {
    let (platforms, checks, results, messages) = tokio::try_join!(
        client.list::<Platform>("/platforms"),
        client.list::<StatusCheck>("/status-checks"),
        client.list::<StatusResult>("/status-results"),
        client.list::<StatusMessage>("/status-messages"),
    )?;

    Ok(Collections {
        platforms,
        checks,
        results,
        messages,
    })
}

/// Point-in-time view of the feed.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub data_state: DataState,
    pub error: Option<String>,
    pub collections: Collections,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            data_state: DataState::Loading,
            error: None,
            collections: Collections::default(),
            refreshed_at: None,
        }
    }
}

struct FeedState {
    generation: u64,
    snapshot: Snapshot,
}

/// Latest fetched collections, guarded by a generation counter so that a
/// batch finishing after a newer one started is dropped.
pub struct Feed {
    state: RwLock<FeedState>,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FeedState {
                generation: 0,
                snapshot: Snapshot::default(),
            }),
        }
    }

    /// Start a new fetch batch and return its generation.
    ///
    /// Data that is already loaded stays visible while the batch runs;
    /// otherwise the feed reports `Loading` and clears any earlier error.
    pub async fn begin_refresh(&self) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;

        if state.snapshot.data_state != DataState::Ready {
            state.snapshot.data_state = DataState::Loading;
            state.snapshot.error = None;
        }

        state.generation
    }

    /// Apply the outcome of batch `generation`.
    ///
    /// Returns `false` when a newer batch has started since, in which case
    /// the outcome is discarded.
    pub async fn complete_refresh(
        &self,
        generation: u64,
        outcome: Result<Collections, ClientError>,
    ) -> bool {
        let mut state = self.state.write().await;

        if generation != state.generation {
            tracing::debug!(
                "Feed: Discarding batch {} (current is {})",
                generation,
                state.generation
            );
            return false;
        }

        let previous_refresh = state.snapshot.refreshed_at;
        state.snapshot = match outcome {
            Ok(collections) => {
                tracing::info!(
                    "Feed: Loaded {} platforms, {} checks, {} results, {} messages",
                    collections.platforms.len(),
                    collections.checks.len(),
                    collections.results.len(),
                    collections.messages.len()
                );
                Snapshot {
                    data_state: DataState::Ready,
                    error: None,
                    collections,
                    refreshed_at: Some(Utc::now()),
                }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!("Feed: Failed to load status data: {}", message);
                Snapshot {
                    data_state: DataState::Error,
                    error: Some(if message.is_empty() {
                        DEFAULT_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    }),
                    collections: Collections::default(),
                    refreshed_at: previous_refresh,
                }
            }
        };

        true
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.snapshot.clone()
    }
}
