use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::DerivedMetrics;
use crate::models::StatRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    pub username: String,
    pub stats_available: bool,
    pub metrics: DerivedMetrics,
    pub record: StatRecord,
}

/// Stats and display metrics for one player.
///
/// A failed lookup answers with zeroed stats rather than an error.
pub async fn player_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username is required".to_string()));
    }

    let fetched =
        tokio::time::timeout(state.fetch_timeout, state.stats.fetch_stats(&username)).await;

    let (record, stats_available) = match fetched {
        Ok(Ok(mut record)) => {
            record.username = username.clone();
            (record, true)
        }
        Ok(Err(e)) => {
            warn!("Stats for {} unavailable: {}", username, e);
            (StatRecord::zeroed(username.clone()), false)
        }
        Err(_) => {
            warn!("Stats for {} timed out", username);
            (StatRecord::zeroed(username.clone()), false)
        }
    };

    Ok(Json(PlayerStatsResponse {
        username,
        stats_available,
        metrics: DerivedMetrics::from_record(&record),
        record,
    }))
}
