//! Roster aggregation.
//!
//! Joins the club roster with each player's stat record. Stat fetches are
//! issued concurrently and all awaited; a player whose fetch fails or times
//! out gets a zeroed record so one bad lookup never blocks the leaderboard.

use std::time::Duration;

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::calculate::{rank, LeaderboardKind};
use crate::client::{ClientError, RosterSource, StatFetcher};
use crate::models::{EnrichedRecord, PlayerIdentity, RankedEntry};

/// Default per-player fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that stop a leaderboard from being built at all.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Failed to load roster: {0}")]
    Roster(#[from] ClientError),
}

/// Players eligible for stats, in roster order.
pub fn approved_only(roster: Vec<PlayerIdentity>) -> Vec<PlayerIdentity> {
    roster.into_iter().filter(|p| p.is_approved()).collect()
}

/// Fetch and attach stats for every roster member.
///
/// Output has the same length and order as `roster`.
pub async fn aggregate<F>(
    roster: Vec<PlayerIdentity>,
    fetcher: &F,
    timeout: Duration,
) -> Vec<EnrichedRecord>
where
    F: StatFetcher + ?Sized,
{
    let fetches = roster.into_iter().map(|player| async move {
        let result = tokio::time::timeout(timeout, fetcher.fetch_stats(&player.username)).await;

        match result {
            Ok(Ok(mut stats)) => {
                stats.username = player.username.clone();
                EnrichedRecord::new(player, stats)
            }
            Ok(Err(e)) => {
                warn!(
                    "Stats for {} unavailable, using zeroed defaults: {}",
                    player.username, e
                );
                EnrichedRecord::unavailable(player)
            }
            Err(_) => {
                warn!(
                    "Stats for {} timed out after {:?}, using zeroed defaults",
                    player.username, timeout
                );
                EnrichedRecord::unavailable(player)
            }
        }
    });

    let records = join_all(fetches).await;

    let missing = records.iter().filter(|r| !r.stats_available).count();
    info!(
        "Aggregated {} players ({} without stats)",
        records.len(),
        missing
    );
    records
}

/// Load the approved roster and aggregate its stats.
pub async fn load_club_records<S, F>(
    source: &S,
    fetcher: &F,
    timeout: Duration,
) -> Result<Vec<EnrichedRecord>, AggregateError>
where
    S: RosterSource + ?Sized,
    F: StatFetcher + ?Sized,
{
    let roster = approved_only(source.fetch_roster().await?);
    Ok(aggregate(roster, fetcher, timeout).await)
}

/// Roster → approved → aggregate → rank.
pub async fn build_leaderboard<S, F>(
    source: &S,
    fetcher: &F,
    kind: LeaderboardKind,
    timeout: Duration,
) -> Result<Vec<RankedEntry>, AggregateError>
where
    S: RosterSource + ?Sized,
    F: StatFetcher + ?Sized,
{
    let records = load_club_records(source, fetcher, timeout).await?;
    Ok(rank(records, kind.selector()))
}
