//! Leaderboard ranking.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Badge, EnrichedRecord, RankedEntry};

/// Which leaderboard to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardKind {
    /// Ranked by runs
    Batting,
    /// Ranked by wickets
    Bowling,
}

impl LeaderboardKind {
    /// The metric this leaderboard sorts by.
    pub fn selector(&self) -> fn(&EnrichedRecord) -> f64 {
        match self {
            LeaderboardKind::Batting => |r: &EnrichedRecord| r.stats.runs() as f64,
            LeaderboardKind::Bowling => |r: &EnrichedRecord| r.stats.wickets() as f64,
        }
    }
}

impl FromStr for LeaderboardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batting" | "runs" => Ok(LeaderboardKind::Batting),
            "bowling" | "wickets" => Ok(LeaderboardKind::Bowling),
            other => Err(format!("unknown leaderboard: {}", other)),
        }
    }
}

impl std::fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardKind::Batting => write!(f, "batting"),
            LeaderboardKind::Bowling => write!(f, "bowling"),
        }
    }
}

/// Rank records by `selector`, highest first.
///
/// The sort is stable with no secondary key, so equal metrics keep their
/// input order.
pub fn rank<F>(records: Vec<EnrichedRecord>, selector: F) -> Vec<RankedEntry>
where
    F: Fn(&EnrichedRecord) -> f64,
{
    let mut keyed: Vec<(f64, EnrichedRecord)> =
        records.into_iter().map(|r| (selector(&r), r)).collect();

    keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    keyed
        .into_iter()
        .enumerate()
        .map(|(index, (_, record))| {
            let rank = index as u32 + 1;
            RankedEntry {
                rank,
                badge: Badge::for_rank(rank),
                record,
            }
        })
        .collect()
}
