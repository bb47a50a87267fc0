//! Per-player stat record models.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which half of a [`StatRecord`] an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Batting,
    Bowling,
}

impl Side {
    pub fn from_is_batting(is_batting: bool) -> Self {
        if is_batting {
            Side::Batting
        } else {
            Side::Bowling
        }
    }
}

/// Batting counters that can be bumped one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattingCounter {
    Matches,
    Runs,
    HalfCenturies,
    Centuries,
    Thirties,
}

impl BattingCounter {
    /// Look up a counter by its wire name (`"halfCenturies"` etc).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "matches" => Some(BattingCounter::Matches),
            "runs" => Some(BattingCounter::Runs),
            "halfCenturies" => Some(BattingCounter::HalfCenturies),
            "centuries" => Some(BattingCounter::Centuries),
            "thirties" => Some(BattingCounter::Thirties),
            _ => None,
        }
    }

    /// Whether bumping this counter changes the batting average.
    pub fn affects_average(&self) -> bool {
        matches!(self, BattingCounter::Matches | BattingCounter::Runs)
    }
}

/// Bowling counters that can be bumped one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BowlingCounter {
    Wickets,
    ThreeWickets,
    FiveWickets,
    Maidens,
}

impl BowlingCounter {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wickets" => Some(BowlingCounter::Wickets),
            "threeWickets" => Some(BowlingCounter::ThreeWickets),
            "fiveWickets" => Some(BowlingCounter::FiveWickets),
            "maidens" => Some(BowlingCounter::Maidens),
            _ => None,
        }
    }
}

/// Batting half of a stat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattingStats {
    pub matches: u32,
    pub runs: u32,

    /// Derived from runs/matches, only refreshed by counter increments
    pub average: f64,

    /// Entered by hand, never derived
    pub strike_rate: f64,

    /// Free-form score notation, e.g. "105 (58)"
    pub best_batting: Option<String>,

    pub half_centuries: u32,
    pub centuries: u32,
    pub thirties: u32,
}

impl BattingStats {
    pub fn counter_mut(&mut self, counter: BattingCounter) -> &mut u32 {
        match counter {
            BattingCounter::Matches => &mut self.matches,
            BattingCounter::Runs => &mut self.runs,
            BattingCounter::HalfCenturies => &mut self.half_centuries,
            BattingCounter::Centuries => &mut self.centuries,
            BattingCounter::Thirties => &mut self.thirties,
        }
    }
}

/// Bowling half of a stat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BowlingStats {
    pub wickets: u32,

    /// Entered by hand, never derived
    pub economy: f64,

    /// e.g. "5/32"
    pub best_bowling: Option<String>,

    pub maidens: u32,
    pub three_wickets: u32,
    pub five_wickets: u32,
}

impl BowlingStats {
    pub fn counter_mut(&mut self, counter: BowlingCounter) -> &mut u32 {
        match counter {
            BowlingCounter::Wickets => &mut self.wickets,
            BowlingCounter::ThreeWickets => &mut self.three_wickets,
            BowlingCounter::FiveWickets => &mut self.five_wickets,
            BowlingCounter::Maidens => &mut self.maidens,
        }
    }
}

/// One line of a player's recent form log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchEntry {
    pub opponent: String,
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
    /// e.g. "Won", "Lost by 12 runs"
    pub result: String,

    /// Kept as the store wrote it: either "2024-05-01" or a full timestamp
    pub date: Option<String>,
}

impl MatchEntry {
    /// Calendar day of the match, if `date` is readable.
    pub fn played_on(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
    }
}

/// Mutable per-player counters, addressed by username.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatRecord {
    pub username: String,
    pub batting: BattingStats,
    pub bowling: BowlingStats,

    /// Display-only, ignored by every aggregate
    pub recent_performance: Vec<MatchEntry>,

    /// Store fields this crate doesn't model, written back untouched on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatRecord {
    /// The all-zero record a newly approved player starts with.
    pub fn zeroed(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn runs(&self) -> u32 {
        self.batting.runs
    }

    pub fn wickets(&self) -> u32 {
        self.bowling.wickets
    }

    /// True when every counter and settable field is at its zero value.
    pub fn is_zeroed(&self) -> bool {
        self.batting == BattingStats::default()
            && self.bowling == BowlingStats::default()
            && self.recent_performance.is_empty()
    }
}
