//! Stat editing sessions.
//!
//! An [`EditSession`] holds the last-saved snapshot of one player's
//! [`StatRecord`] plus the working copy being edited. It moves through
//! open → mutate → commit | reset, and is owned by whoever is editing.
//!
//! There is no version check on commit: two sessions editing the same
//! player overwrite each other and the last commit wins.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::{compute_average, parse_numeric_or_zero};
use crate::client::{ClientError, StatPersister};
use crate::models::{BattingCounter, BowlingCounter, Side, StatRecord};

/// A commit that didn't stick. The session keeps its edits either way, so
/// every variant can be retried by calling `commit` again.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Save rejected: {message}")]
    Rejected { message: String },

    #[error("Save failed: {0}")]
    Transport(#[from] ClientError),
}

/// Caller-owned edit buffer for one player's stats.
#[derive(Debug, Clone)]
pub struct EditSession {
    saved: StatRecord,
    current: StatRecord,
}

impl EditSession {
    /// Start editing from the last persisted record.
    pub fn open(record: StatRecord) -> Self {
        Self {
            saved: record.clone(),
            current: record,
        }
    }

    pub fn username(&self) -> &str {
        &self.current.username
    }

    /// The working copy, including unsaved edits.
    pub fn current(&self) -> &StatRecord {
        &self.current
    }

    /// The last committed snapshot.
    pub fn saved(&self) -> &StatRecord {
        &self.saved
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.saved
    }

    /// Add one to the named counter.
    ///
    /// Bumping `matches` or `runs` also refreshes the batting average.
    /// Unknown names, or a name from the other side, change nothing.
    /// Returns whether the record changed.
    pub fn increment(&mut self, stat_name: &str, side: Side) -> bool {
        match side {
            Side::Batting => match BattingCounter::from_name(stat_name) {
                Some(counter) => {
                    self.increment_batting(counter);
                    true
                }
                None => {
                    debug!("Ignoring unknown batting stat {:?}", stat_name);
                    false
                }
            },
            Side::Bowling => match BowlingCounter::from_name(stat_name) {
                Some(counter) => {
                    self.increment_bowling(counter);
                    true
                }
                None => {
                    debug!("Ignoring unknown bowling stat {:?}", stat_name);
                    false
                }
            },
        }
    }

    pub fn increment_batting(&mut self, counter: BattingCounter) {
        let batting = &mut self.current.batting;
        let value = batting.counter_mut(counter);
        *value = value.saturating_add(1);

        if counter.affects_average() {
            batting.average = compute_average(batting.runs, batting.matches);
        }
    }

    pub fn increment_bowling(&mut self, counter: BowlingCounter) {
        let value = self.current.bowling.counter_mut(counter);
        *value = value.saturating_add(1);
    }

    /// Overwrite a hand-entered field.
    ///
    /// Batting accepts `strikeRate` and `bestBatting`, bowling accepts
    /// `economy` and `bestBowling`. Numeric input that doesn't parse is
    /// stored as 0. The average is left alone. Returns whether the field
    /// name was recognised.
    pub fn set_field(&mut self, field_name: &str, value: &str, side: Side) -> bool {
        match (side, field_name) {
            (Side::Batting, "strikeRate") => {
                self.current.batting.strike_rate = parse_numeric_or_zero(value);
            }
            (Side::Batting, "bestBatting") => {
                self.current.batting.best_batting = Some(value.to_string());
            }
            (Side::Bowling, "economy") => {
                self.current.bowling.economy = parse_numeric_or_zero(value);
            }
            (Side::Bowling, "bestBowling") => {
                self.current.bowling.best_bowling = Some(value.to_string());
            }
            _ => {
                debug!("Ignoring unknown {:?} field {:?}", side, field_name);
                return false;
            }
        }
        true
    }

    /// Drop pending edits and return the restored snapshot.
    pub fn reset(&mut self) -> &StatRecord {
        self.current = self.saved.clone();
        &self.current
    }

    /// Write the whole working copy through `persister`.
    ///
    /// On success the working copy becomes the new snapshot. On failure
    /// nothing is discarded, so the same session can retry.
    pub async fn commit<P>(&mut self, persister: &P) -> Result<&StatRecord, SaveError>
    where
        P: StatPersister + ?Sized,
    {
        let username = self.current.username.clone();

        let ack = match persister.save_stats(&username, &self.current).await {
            Ok(ack) => ack,
            Err(e) => {
                warn!("Saving stats for {} failed: {}", username, e);
                return Err(SaveError::Transport(e));
            }
        };

        if !ack.success {
            let message = ack
                .message
                .unwrap_or_else(|| "store reported failure".to_string());
            warn!("Store rejected stats for {}: {}", username, message);
            return Err(SaveError::Rejected { message });
        }

        info!("Saved stats for {}", username);
        self.saved = self.current.clone();
        Ok(&self.saved)
    }
}
