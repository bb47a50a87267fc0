pub mod leaderboard;
pub mod players;

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::client::{ClientError, RosterSource, StatFetcher};
    use crate::models::{Category, PlayerIdentity, PlayerStatus, StatRecord};

    struct MemoryStore {
        roster: Vec<PlayerIdentity>,
        records: HashMap<String, StatRecord>,
        roster_down: bool,
    }

    #[async_trait]
    impl RosterSource for MemoryStore {
        async fn fetch_roster(&self) -> Result<Vec<PlayerIdentity>, ClientError> {
            if self.roster_down {
                return Err(ClientError::HttpStatus {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                });
            }
            Ok(self.roster.clone())
        }
    }

    #[async_trait]
    impl StatFetcher for MemoryStore {
        async fn fetch_stats(&self, username: &str) -> Result<StatRecord, ClientError> {
            self.records
                .get(username)
                .cloned()
                .ok_or_else(|| ClientError::HttpStatus {
                    status: 404,
                    message: "Not Found".to_string(),
                })
        }
    }

    fn stats(username: &str, runs: u32, wickets: u32, centuries: u32) -> StatRecord {
        let mut record = StatRecord::zeroed(username);
        record.batting.runs = runs;
        record.batting.matches = 10;
        record.batting.average = runs as f64 / 10.0;
        record.batting.centuries = centuries;
        record.bowling.wickets = wickets;
        record
    }

    fn store(roster_down: bool) -> MemoryStore {
        let roster = vec![
            PlayerIdentity::new("asha", "Asha", Category::Batsman),
            PlayerIdentity::new("bilal", "Bilal", Category::Bowler),
            PlayerIdentity::new("chen", "Chen", Category::AllRounder),
            PlayerIdentity::new("dev", "Dev", Category::WicketKeeper)
                .with_status(PlayerStatus::Pending),
        ];
        let records = [
            stats("asha", 410, 0, 2),
            stats("bilal", 35, 22, 0),
            stats("dev", 900, 0, 5),
        ]
        .into_iter()
        .map(|r| (r.username.clone(), r))
        .collect();

        MemoryStore {
            roster,
            records,
            roster_down,
        }
    }

    async fn get_json(roster_down: bool, uri: &str) -> (StatusCode, Value) {
        let state = AppState::from_store(Arc::new(store(roster_down)), Duration::from_secs(5));
        let app = build_router(state, "*");

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(false, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_batting_leaderboard() {
        let (status, body) = get_json(false, "/api/leaderboard/batting").await;
        assert_eq!(status, StatusCode::OK);

        let entries = body["entries"].as_array().unwrap();
        let order: Vec<&str> = entries
            .iter()
            .map(|e| e["player"]["username"].as_str().unwrap())
            .collect();
        // dev is pending, chen has no stats and ranks last
        assert_eq!(order, vec!["asha", "bilal", "chen"]);
        assert_eq!(entries[0]["badge"]["tier"], "gold");
        assert_eq!(entries[2]["statsAvailable"], false);
        assert_eq!(body["pagination"]["total_items"], 3);
    }

    #[tokio::test]
    async fn test_bowling_leaderboard_paged() {
        let (status, body) =
            get_json(false, "/api/leaderboard/bowling?page=2&page_size=2").await;
        assert_eq!(status, StatusCode::OK);

        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["rank"], 3);
        assert_eq!(body["pagination"]["total_pages"], 2);
        assert_eq!(body["pagination"]["has_prev"], true);
    }

    #[tokio::test]
    async fn test_unknown_leaderboard() {
        let (status, body) = get_json(false, "/api/leaderboard/fielding").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_roster_down_is_bad_gateway() {
        let (status, body) = get_json(true, "/api/leaderboard/batting").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_milestones() {
        let (status, body) = get_json(false, "/api/milestones").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["centuries"], 1);
        assert_eq!(body["halfCenturies"], 0);
    }

    #[tokio::test]
    async fn test_summary() {
        let (status, body) = get_json(false, "/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPlayers"], 3);
        assert_eq!(body["playersMissingStats"], 1);
        assert_eq!(body["totalRuns"], 445);
        assert_eq!(body["topWicketTaker"]["username"], "bilal");
    }

    #[tokio::test]
    async fn test_player_stats() {
        let (status, body) = get_json(false, "/api/players/asha/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statsAvailable"], true);
        assert_eq!(body["metrics"]["runs"], 410);
        assert_eq!(body["metrics"]["average"], 41.0);
        assert_eq!(body["metrics"]["bestBatting"], "0 (0)");
    }

    #[tokio::test]
    async fn test_player_stats_missing_is_zeroed() {
        let (status, body) = get_json(false, "/api/players/chen/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statsAvailable"], false);
        assert_eq!(body["metrics"]["runs"], 0);
        assert_eq!(body["metrics"]["bestBowling"], "0/0");
    }
}
