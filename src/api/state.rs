use std::sync::Arc;
use std::time::Duration;

use crate::client::{RosterSource, StatFetcher};

#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn RosterSource>,
    pub stats: Arc<dyn StatFetcher>,
    pub fetch_timeout: Duration,
}

impl AppState {
    /// State backed by a single store that serves both rosters and stats.
    pub fn from_store<S>(store: Arc<S>, fetch_timeout: Duration) -> Self
    where
        S: RosterSource + StatFetcher + 'static,
    {
        Self {
            roster: store.clone(),
            stats: store,
            fetch_timeout,
        }
    }
}
