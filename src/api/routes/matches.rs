use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::players::DeleteResponse;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MatchResult, PlayerId};

#[derive(Debug, Deserialize)]
pub struct ReportMatchRequest {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchResult>,
    pub count: usize,
}

pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let matches = state.tournament.matches()?;
    Ok(Json(MatchListResponse {
        count: matches.len(),
        matches,
    }))
}

pub async fn report_match(
    State(state): State<AppState>,
    Json(body): Json<ReportMatchRequest>,
) -> Result<(StatusCode, Json<MatchResult>), ApiError> {
    let result = state
        .tournament
        .report_match(body.winner_id, body.loser_id)?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn delete_matches(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.tournament.delete_matches()?;
    Ok(Json(DeleteResponse { removed }))
}
