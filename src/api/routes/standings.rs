use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Pairing, StandingRecord};

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub standings: Vec<StandingRecord>,
}

#[derive(Debug, Serialize)]
pub struct PairingsResponse {
    pub pairings: Vec<Pairing>,
}

pub async fn get_standings(
    State(state): State<AppState>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let standings = state.tournament.player_standings()?;
    Ok(Json(StandingsResponse { standings }))
}

pub async fn get_pairings(
    State(state): State<AppState>,
) -> Result<Json<PairingsResponse>, ApiError> {
    let pairings = state.tournament.swiss_pairings()?;
    Ok(Json(PairingsResponse { pairings }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::testing::{send, setup_test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_standings_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        let a = state.tournament.register_player("A").unwrap();
        let b = state.tournament.register_player("B").unwrap();
        state.tournament.report_match(b.id, a.id).unwrap();

        let (status, json) = send(build_router(state), "GET", "/api/standings", None).await;

        assert_eq!(status, StatusCode::OK);
        let standings = json["standings"].as_array().unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0]["name"], "B");
        assert_eq!(standings[0]["wins"], 1);
        assert_eq!(standings[0]["matches"], 1);
        assert_eq!(standings[1]["name"], "A");
        assert_eq!(standings[1]["wins"], 0);
    }

    #[tokio::test]
    async fn test_pairings_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        for name in ["A", "B", "C", "D"] {
            state.tournament.register_player(name).unwrap();
        }

        let (status, json) = send(build_router(state), "GET", "/api/pairings", None).await;

        assert_eq!(status, StatusCode::OK);
        let pairings = json["pairings"].as_array().unwrap();
        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0]["player1_name"], "A");
        assert_eq!(pairings[0]["player2_name"], "B");
        assert_eq!(pairings[1]["player1_id"], 3);
        assert_eq!(pairings[1]["player2_id"], 4);
    }

    #[tokio::test]
    async fn test_pairings_odd_count_conflicts() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        for name in ["A", "B", "C"] {
            state.tournament.register_player(name).unwrap();
        }

        let (status, json) = send(build_router(state), "GET", "/api/pairings", None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let (status, json) = send(build_router(state), "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
