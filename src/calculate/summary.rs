//! Club-wide dashboard summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::milestones::{count_milestones, MilestoneCounts};
use super::ranking::LeaderboardKind;
use crate::models::EnrichedRecord;

/// Leading player for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub username: String,
    pub name: String,
    pub image: Option<String>,
    pub value: u32,
}

/// Headline numbers for the club dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub computed_at: DateTime<Utc>,
    pub total_players: u32,

    /// Players whose stats couldn't be fetched
    pub players_missing_stats: u32,

    pub total_runs: u64,
    pub total_wickets: u64,
    pub top_run_scorer: Option<TopPerformer>,
    pub top_wicket_taker: Option<TopPerformer>,
    pub milestones: MilestoneCounts,
}

impl DashboardSummary {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let total_runs = records.iter().map(|r| r.stats.runs() as u64).sum();
        let total_wickets = records.iter().map(|r| r.stats.wickets() as u64).sum();

        Self {
            computed_at: Utc::now(),
            total_players: records.len() as u32,
            players_missing_stats: records.iter().filter(|r| !r.stats_available).count() as u32,
            total_runs,
            total_wickets,
            top_run_scorer: top_performer(records, LeaderboardKind::Batting),
            top_wicket_taker: top_performer(records, LeaderboardKind::Bowling),
            milestones: count_milestones(records),
        }
    }
}

/// Leader by the given metric; None when nobody has scored on it.
fn top_performer(records: &[EnrichedRecord], kind: LeaderboardKind) -> Option<TopPerformer> {
    let selector = kind.selector();
    // Strictly greater only, so the earliest of tied players stays in front
    let leader = records
        .iter()
        .reduce(|best, r| if selector(r) > selector(best) { r } else { best })?;
    let value = match kind {
        LeaderboardKind::Batting => leader.stats.runs(),
        LeaderboardKind::Bowling => leader.stats.wickets(),
    };
    if value == 0 {
        return None;
    }

    let player = &leader.player;
    Some(TopPerformer {
        username: player.username.clone(),
        name: player.name.clone(),
        image: player.image.clone(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::Milestone;
    use crate::models::{Category, PlayerIdentity, StatRecord};

    fn record(username: &str, runs: u32, wickets: u32) -> EnrichedRecord {
        let mut stats = StatRecord::zeroed(username);
        stats.batting.runs = runs;
        stats.bowling.wickets = wickets;
        EnrichedRecord::new(
            PlayerIdentity::new(username, username.to_uppercase(), Category::AllRounder),
            stats,
        )
    }

    #[test]
    fn test_summary_totals() {
        let unavailable =
            EnrichedRecord::unavailable(PlayerIdentity::new("gone", "Gone", Category::Bowler));

        let records = vec![record("a", 120, 4), record("b", 300, 1), unavailable];
        let summary = DashboardSummary::from_records(&records);

        assert_eq!(summary.total_players, 3);
        assert_eq!(summary.players_missing_stats, 1);
        assert_eq!(summary.total_runs, 420);
        assert_eq!(summary.total_wickets, 5);

        let top_bat = summary.top_run_scorer.unwrap();
        assert_eq!(top_bat.username, "b");
        assert_eq!(top_bat.name, "B");
        assert_eq!(top_bat.value, 300);

        let top_bowl = summary.top_wicket_taker.unwrap();
        assert_eq!(top_bowl.username, "a");
        assert_eq!(top_bowl.value, 4);

        assert_eq!(summary.milestones[&Milestone::Centuries], 0);
    }

    #[test]
    fn test_summary_no_leader_without_runs() {
        let records = vec![record("a", 0, 0), record("b", 0, 0)];
        let summary = DashboardSummary::from_records(&records);

        assert!(summary.top_run_scorer.is_none());
        assert!(summary.top_wicket_taker.is_none());
    }

    #[test]
    fn test_summary_tie_goes_to_first_listed() {
        let records = vec![record("first", 90, 0), record("second", 90, 0)];
        let summary = DashboardSummary::from_records(&records);

        assert_eq!(summary.top_run_scorer.unwrap().username, "first");
    }

    #[test]
    fn test_summary_leader_after_tie() {
        let records = vec![
            record("early", 40, 3),
            record("mid", 75, 3),
            record("late", 75, 2),
        ];
        let summary = DashboardSummary::from_records(&records);

        assert_eq!(summary.top_run_scorer.unwrap().username, "mid");
        assert_eq!(summary.top_wicket_taker.unwrap().username, "early");
    }
}
