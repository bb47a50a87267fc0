//! Statistics calculation engine.
//!
//! Computes derived metrics from raw stat counters:
//! - Batting average and display defaults for best figures
//! - Leaderboard ranking
//! - Milestone counts
//! - Dashboard summaries

pub mod milestones;
pub mod ranking;
pub mod summary;

use serde::Serialize;

use crate::models::StatRecord;

pub use milestones::{count_milestones, count_qualifying, Milestone, MilestoneCounts};
pub use ranking::{rank, LeaderboardKind};
pub use summary::DashboardSummary;

/// Shown when a player has no recorded best innings.
pub const DEFAULT_BEST_BATTING: &str = "0 (0)";

/// Shown when a player has no recorded best bowling figures.
pub const DEFAULT_BEST_BOWLING: &str = "0/0";

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate batting average from runs and matches, rounded to 2 places.
pub fn compute_average(runs: u32, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        round2(runs as f64 / matches as f64)
    }
}

/// Best batting figures for display.
pub fn format_best_batting(value: Option<&str>) -> String {
    present_or(value, DEFAULT_BEST_BATTING)
}

/// Best bowling figures for display.
pub fn format_best_bowling(value: Option<&str>) -> String {
    present_or(value, DEFAULT_BEST_BOWLING)
}

fn present_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Parse a hand-typed numeric field, coercing anything unusable to 0.
pub fn parse_numeric_or_zero(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Display-ready metrics for a single player's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub matches: u32,
    pub runs: u32,
    pub average: f64,
    pub strike_rate: f64,
    pub best_batting: String,
    pub wickets: u32,
    pub economy: f64,
    pub best_bowling: String,
}

impl DerivedMetrics {
    /// Build from a stored record.
    ///
    /// Average is the stored value, not recomputed: only counter
    /// increments refresh it.
    pub fn from_record(record: &StatRecord) -> Self {
        Self {
            matches: record.batting.matches,
            runs: record.batting.runs,
            average: record.batting.average,
            strike_rate: record.batting.strike_rate,
            best_batting: format_best_batting(record.batting.best_batting.as_deref()),
            wickets: record.bowling.wickets,
            economy: record.bowling.economy,
            best_bowling: format_best_bowling(record.bowling.best_bowling.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_average() {
        assert_eq!(compute_average(540, 12), 45.0);
        assert_eq!(compute_average(100, 3), 33.33);
        assert_eq!(compute_average(200, 3), 66.67);
    }

    #[test]
    fn test_compute_average_zero_matches() {
        for runs in [0, 1, 99, 10_000, u32::MAX] {
            assert_eq!(compute_average(runs, 0), 0.0);
        }
    }

    #[test]
    fn test_compute_average_zero_runs() {
        for matches in 1..=1000 {
            let avg = compute_average(0, matches);
            assert_eq!(avg, 0.0);
            assert!(avg.is_finite());
        }
    }

    #[test]
    fn test_compute_average_matches_rounded_division() {
        for matches in 1..=50u32 {
            for runs in [1u32, 7, 33, 101, 999] {
                let expected = ((runs as f64 / matches as f64) * 100.0).round() / 100.0;
                assert_eq!(compute_average(runs, matches), expected);
            }
        }
    }

    #[test]
    fn test_format_best_batting() {
        assert_eq!(format_best_batting(None), "0 (0)");
        assert_eq!(format_best_batting(None), "0 (0)");
        assert_eq!(format_best_batting(Some("105 (58)")), "105 (58)");
        assert_eq!(format_best_batting(Some("  ")), "0 (0)");
    }

    #[test]
    fn test_format_best_bowling() {
        assert_eq!(format_best_bowling(None), "0/0");
        assert_eq!(format_best_bowling(Some("5/32")), "5/32");
    }

    #[test]
    fn test_parse_numeric_or_zero() {
        assert_eq!(parse_numeric_or_zero("131.5"), 131.5);
        assert_eq!(parse_numeric_or_zero(" 7 "), 7.0);
        assert_eq!(parse_numeric_or_zero("abc"), 0.0);
        assert_eq!(parse_numeric_or_zero(""), 0.0);
        assert_eq!(parse_numeric_or_zero("NaN"), 0.0);
        assert_eq!(parse_numeric_or_zero("inf"), 0.0);
        assert_eq!(parse_numeric_or_zero("-4.2"), 0.0);
    }

    #[test]
    fn test_derived_metrics_defaults() {
        let record = StatRecord::zeroed("new");
        let metrics = DerivedMetrics::from_record(&record);

        assert_eq!(metrics.average, 0.0);
        assert_eq!(metrics.strike_rate, 0.0);
        assert_eq!(metrics.economy, 0.0);
        assert_eq!(metrics.best_batting, "0 (0)");
        assert_eq!(metrics.best_bowling, "0/0");
    }

    #[test]
    fn test_derived_metrics_keeps_stored_average() {
        let mut record = StatRecord::zeroed("bulk");
        record.batting.runs = 300;
        record.batting.matches = 10;
        record.batting.average = 12.5;

        let metrics = DerivedMetrics::from_record(&record);
        assert_eq!(metrics.average, 12.5);
    }
}
