//! Session cache for the loaded board payload.
//!
//! The payload is fetched once and held here; every grouping or sorting change
//! is derived from the cached copy without going back to the source. A refresh
//! replaces the cache wholesale. When loads overlap, the one started last wins
//! and earlier results are discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::board::{group_tickets, BoardData, BoardView, GroupKey, GroupedBuckets};
use crate::loader::{BoardSource, LoadError};
use crate::metrics::{BOARD_LOADS, BOARD_LOAD_DURATION, BOARD_VIEWS, TICKETS_CACHED, USERS_CACHED};
use crate::preferences::Preferences;

/// Errors returned when reading from or refreshing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No load has been attempted yet.
    #[error("Board has not been loaded yet")]
    NotLoaded,

    /// Every load so far has failed.
    #[error("Board failed to load: {0}")]
    LoadFailed(String),

    /// The load just attempted failed.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Summary of the session's load state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum BoardStatus {
    NotLoaded,
    Loaded {
        tickets: usize,
        users: usize,
        loaded_at: DateTime<Utc>,
    },
    /// The most recent load failed. `has_data` tells whether an earlier
    /// payload is still being served.
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
        has_data: bool,
    },
}

#[derive(Debug, Default)]
struct CacheState {
    data: Option<Arc<BoardData>>,
    loaded_at: Option<DateTime<Utc>>,
    last_error: Option<(String, DateTime<Utc>)>,
}

impl CacheState {
    fn status(&self) -> BoardStatus {
        if let Some((error, failed_at)) = &self.last_error {
            return BoardStatus::Failed {
                error: error.clone(),
                failed_at: *failed_at,
                has_data: self.data.is_some(),
            };
        }
        match (&self.data, self.loaded_at) {
            (Some(data), Some(loaded_at)) => BoardStatus::Loaded {
                tickets: data.tickets.len(),
                users: data.users.len(),
                loaded_at,
            },
            _ => BoardStatus::NotLoaded,
        }
    }
}

/// Holds the board payload for the lifetime of the process.
pub struct BoardSession {
    source: Arc<dyn BoardSource>,
    cache: RwLock<CacheState>,
    generation: AtomicU64,
}

impl BoardSession {
    pub fn new(source: Arc<dyn BoardSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(CacheState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the payload from the source and replace the cache.
    ///
    /// A failed load is recorded and returned; any previously cached payload
    /// stays available. A load overtaken by a newer one leaves the cache alone
    /// and returns the current status.
    pub async fn refresh(&self) -> Result<BoardStatus, SessionError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        let result = self.source.load().await;
        let elapsed = start.elapsed().as_secs_f64();

        let mut cache = self.cache.write().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            warn!(
                "Discarding board load #{} from {}: a newer load was started",
                generation,
                self.source.name()
            );
            BOARD_LOADS.with_label_values(&["stale"]).inc();
            return Ok(cache.status());
        }

        match result {
            Ok(data) => {
                info!(
                    "Loaded board from {}: {} tickets, {} users",
                    self.source.name(),
                    data.tickets.len(),
                    data.users.len()
                );
                BOARD_LOADS.with_label_values(&["success"]).inc();
                BOARD_LOAD_DURATION
                    .with_label_values(&["success"])
                    .observe(elapsed);
                TICKETS_CACHED.set(data.tickets.len() as i64);
                USERS_CACHED.set(data.users.len() as i64);

                cache.data = Some(Arc::new(data));
                cache.loaded_at = Some(Utc::now());
                cache.last_error = None;
                Ok(cache.status())
            }
            Err(e) => {
                warn!("Board load from {} failed: {}", self.source.name(), e);
                BOARD_LOADS.with_label_values(&["error"]).inc();
                BOARD_LOAD_DURATION
                    .with_label_values(&["error"])
                    .observe(elapsed);

                cache.last_error = Some((e.to_string(), Utc::now()));
                Err(SessionError::Load(e))
            }
        }
    }

    /// Current load state.
    pub async fn status(&self) -> BoardStatus {
        self.cache.read().await.status()
    }

    /// The cached payload.
    pub async fn data(&self) -> Result<Arc<BoardData>, SessionError> {
        let cache = self.cache.read().await;
        match (&cache.data, &cache.last_error) {
            (Some(data), _) => Ok(Arc::clone(data)),
            (None, Some((error, _))) => Err(SessionError::LoadFailed(error.clone())),
            (None, None) => Err(SessionError::NotLoaded),
        }
    }

    /// Group the cached tickets without sorting.
    pub async fn group(&self, key: GroupKey) -> Result<GroupedBuckets, SessionError> {
        let data = self.data().await?;
        Ok(group_tickets(&data.tickets, key, &data.users))
    }

    /// Build the board as the given preferences describe it.
    pub async fn view(&self, preferences: Preferences) -> Result<BoardView, SessionError> {
        let data = self.data().await?;
        BOARD_VIEWS
            .with_label_values(&[preferences.grouping.as_str(), preferences.sorting.as_str()])
            .inc();
        Ok(BoardView::build(
            &data,
            preferences.grouping,
            preferences.sorting,
        ))
    }
}
