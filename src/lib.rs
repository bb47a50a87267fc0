//! # Club Stats
//!
//! Player statistics engine for a cricket club: derived career metrics,
//! leaderboards, milestone counts and stat editing.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, stat records, ranked rows)
//! - **calculate**: Derived metrics, ranking, milestones and summaries
//! - **session**: Edit sessions over a single player's stat record
//! - **aggregate**: Concurrent roster/stat join and leaderboard building
//! - **client**: HTTP client for the club data store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod calculate;
pub mod client;
pub mod config;
pub mod models;
pub mod session;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "15s", "2m", "500ms").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(n) = s.strip_suffix("ms") {
        return n.trim().parse().ok().map(Duration::from_millis);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.trim().parse().ok()?;
    Some(Duration::from_secs(num.checked_mul(multiplier)?))
}
