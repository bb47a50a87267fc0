//! Player identity model.

use serde::{Deserialize, Serialize};

/// Playing role of a club member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
    /// Anything the store holds that isn't one of the known roles.
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Batsman => "Batsman",
            Category::Bowler => "Bowler",
            Category::AllRounder => "All-rounder",
            Category::WicketKeeper => "Wicket-keeper",
            Category::Other(s) => s,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "batsman" | "batter" => Category::Batsman,
            "bowler" => Category::Bowler,
            "allrounder" => Category::AllRounder,
            "wicketkeeper" => Category::WicketKeeper,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration status of a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerStatus {
    Approved,
    #[default]
    Pending,
    Rejected,
    Other(String),
}

impl From<String> for PlayerStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "approved" => PlayerStatus::Approved,
            "pending" => PlayerStatus::Pending,
            "rejected" => PlayerStatus::Rejected,
            _ => PlayerStatus::Other(s),
        }
    }
}

impl From<PlayerStatus> for String {
    fn from(s: PlayerStatus) -> Self {
        match s {
            PlayerStatus::Approved => "approved".to_string(),
            PlayerStatus::Pending => "pending".to_string(),
            PlayerStatus::Rejected => "rejected".to_string(),
            PlayerStatus::Other(s) => s,
        }
    }
}

/// Reference data for a registered player.
///
/// Joined to its [`StatRecord`](super::StatRecord) by `username`, never by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    /// Store document id
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Unique, stable handle
    pub username: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: Category,

    /// Profile image URL
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub batting_style: Option<String>,

    #[serde(default)]
    pub bowling_style: Option<String>,

    #[serde(default)]
    pub status: PlayerStatus,
}

impl PlayerIdentity {
    /// Create an approved player with only the required fields set.
    pub fn new(username: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        let username = username.into();
        Self {
            id: username.clone(),
            username,
            name: name.into(),
            category,
            image: None,
            age: None,
            batting_style: None,
            bowling_style: None,
            status: PlayerStatus::Approved,
        }
    }

    pub fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == PlayerStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from("Batsman".to_string()), Category::Batsman);
        assert_eq!(Category::from("All-rounder".to_string()), Category::AllRounder);
        assert_eq!(Category::from("all rounder".to_string()), Category::AllRounder);
        assert_eq!(
            Category::from("Wicket-keeper".to_string()),
            Category::WicketKeeper
        );
        assert_eq!(
            Category::from("Coach".to_string()),
            Category::Other("Coach".to_string())
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::AllRounder.to_string(), "All-rounder");
        assert_eq!(Category::Other("Coach".into()).to_string(), "Coach");
    }

    #[test]
    fn test_player_deserialization() {
        let json = r#"{
            "_id": "64fa01",
            "username": "rsharma",
            "name": "Rohit Sharma",
            "category": "Batsman",
            "image": "https://img.example.com/rs.png",
            "status": "approved",
            "battingStyle": "Right-hand bat",
            "age": 36
        }"#;

        let player: PlayerIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, "64fa01");
        assert_eq!(player.username, "rsharma");
        assert_eq!(player.category, Category::Batsman);
        assert_eq!(player.batting_style.as_deref(), Some("Right-hand bat"));
        assert_eq!(player.bowling_style, None);
        assert_eq!(player.age, Some(36));
        assert!(player.is_approved());
    }

    #[test]
    fn test_player_missing_status_is_pending() {
        let json = r#"{"username": "newbie"}"#;
        let player: PlayerIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(player.status, PlayerStatus::Pending);
        assert!(!player.is_approved());
    }

    #[test]
    fn test_status_round_trip_keeps_unknown() {
        let status = PlayerStatus::from("Suspended".to_string());
        assert_eq!(status, PlayerStatus::Other("Suspended".to_string()));
        assert_eq!(String::from(status), "Suspended");
    }
}
