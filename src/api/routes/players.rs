use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;

#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<Player>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub removed: usize,
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let players = state.tournament.players()?;
    Ok(Json(PlayerListResponse {
        count: players.len(),
        players,
    }))
}

pub async fn register_player(
    State(state): State<AppState>,
    Json(body): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = state.tournament.register_player(&body.name)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn delete_players(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.tournament.delete_players()?;
    Ok(Json(DeleteResponse { removed }))
}
