use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::aggregate::load_club_records;
use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::{
    count_milestones, rank, DashboardSummary, LeaderboardKind, MilestoneCounts,
};
use crate::models::RankedEntry;

// ── Leaderboard Endpoint ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub kind: LeaderboardKind,
    pub entries: Vec<RankedEntry>,
    pub pagination: PaginationMeta,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let kind: LeaderboardKind = kind.parse().map_err(ApiError::BadRequest)?;
    let pagination = Pagination::new(params.page, params.page_size);

    let records = load_club_records(
        state.roster.as_ref(),
        state.stats.as_ref(),
        state.fetch_timeout,
    )
    .await?;

    let ranked = rank(records, kind.selector());
    let meta = PaginationMeta::new(&pagination, ranked.len() as u32);

    Ok(Json(LeaderboardResponse {
        kind,
        entries: pagination.apply(ranked),
        pagination: meta,
    }))
}

// ── Milestones Endpoint ─────────────────────────────────────────

pub async fn milestones(State(state): State<AppState>) -> Result<Json<MilestoneCounts>, ApiError> {
    let records = load_club_records(
        state.roster.as_ref(),
        state.stats.as_ref(),
        state.fetch_timeout,
    )
    .await?;

    Ok(Json(count_milestones(&records)))
}

// ── Summary Endpoint ────────────────────────────────────────────

pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    let records = load_club_records(
        state.roster.as_ref(),
        state.stats.as_ref(),
        state.fetch_timeout,
    )
    .await?;

    Ok(Json(DashboardSummary::from_records(&records)))
}
