//! Achievement milestone counts for summary cards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::EnrichedRecord;

/// A discrete achievement counted across the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Milestone {
    Centuries,
    HalfCenturies,
    FiveWicketHauls,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [
        Milestone::Centuries,
        Milestone::HalfCenturies,
        Milestone::FiveWicketHauls,
    ];

    /// Whether a player has reached this milestone at least once.
    pub fn reached_by(&self, record: &EnrichedRecord) -> bool {
        match self {
            Milestone::Centuries => record.stats.batting.centuries > 0,
            Milestone::HalfCenturies => record.stats.batting.half_centuries > 0,
            Milestone::FiveWicketHauls => record.stats.bowling.five_wickets > 0,
        }
    }
}

/// Number of players per milestone.
pub type MilestoneCounts = BTreeMap<Milestone, usize>;

/// Count players satisfying `predicate`.
pub fn count_qualifying<F>(records: &[EnrichedRecord], predicate: F) -> usize
where
    F: Fn(&EnrichedRecord) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

/// Count players for every milestone.
pub fn count_milestones(records: &[EnrichedRecord]) -> MilestoneCounts {
    Milestone::ALL
        .iter()
        .map(|m| (*m, count_qualifying(records, |r| m.reached_by(r))))
        .collect()
}
