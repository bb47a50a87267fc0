//! Enriched and ranked leaderboard rows.

use serde::{Deserialize, Serialize};

use super::{PlayerIdentity, StatRecord};

/// A stat record joined with the identity of the player it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub player: PlayerIdentity,
    pub stats: StatRecord,

    /// False when the stat fetch failed and zeroed defaults stand in
    pub stats_available: bool,
}

impl EnrichedRecord {
    pub fn new(player: PlayerIdentity, stats: StatRecord) -> Self {
        Self {
            player,
            stats,
            stats_available: true,
        }
    }

    /// Zeroed stand-in for a player whose stats couldn't be fetched.
    pub fn unavailable(player: PlayerIdentity) -> Self {
        let stats = StatRecord::zeroed(player.username.clone());
        Self {
            player,
            stats,
            stats_available: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.player.username
    }
}

/// Leaderboard badge for a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "tier", content = "rank")]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Numeric(u32),
}

impl Badge {
    /// Badge for a 1-based rank.
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => Badge::Gold,
            2 => Badge::Silver,
            3 => Badge::Bronze,
            n => Badge::Numeric(n),
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::Gold => write!(f, "gold"),
            Badge::Silver => write!(f, "silver"),
            Badge::Bronze => write!(f, "bronze"),
            Badge::Numeric(n) => write!(f, "#{}", n),
        }
    }
}

/// An enriched record with its leaderboard position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// 1-based
    pub rank: u32,
    pub badge: Badge,
    #[serde(flatten)]
    pub record: EnrichedRecord,
}
