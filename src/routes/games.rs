use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    game::{GameSnapshot, ScoreState},
    AppState,
};

/// Create a game with a generated code
pub async fn create_game(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<GameSnapshot>), StatusCode> {
    let round = state.games.create_game(None).map_err(|e| {
        tracing::error!("Failed to create game: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(round.get_game_state(None))))
}

/// Snapshot of a game without personal guesses
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    let round = state.games.get(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(round.get_game_state(None)))
}

/// Snapshot of a game including one player's accepted guesses
pub async fn get_player_game(
    State(state): State<Arc<AppState>>,
    Path((game_id, player_id)): Path<(String, String)>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    let round = state.games.get(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(round.get_game_state(Some(&player_id))))
}

pub async fn get_player_score(
    State(state): State<Arc<AppState>>,
    Path((game_id, player_id)): Path<(String, String)>,
) -> Result<Json<ScoreState>, StatusCode> {
    let round = state.games.get(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(round.get_score_state(&player_id)))
}

#[cfg(test)]
mod tests {
    use crate::{build_router, test_support::test_state};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = build_router(Arc::new(test_state()));
        let (status, body) = call(&app, Method::GET, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["games"], 0);
        assert_eq!(body["dictionary_words"], 3);
    }

    #[tokio::test]
    async fn test_create_and_fetch_game() {
        let app = build_router(Arc::new(test_state()));

        let (status, created) = call(&app, Method::POST, "/api/games").await;
        assert_eq!(status, StatusCode::CREATED);
        let game_id = created["game_id"].as_str().unwrap().to_string();
        assert_eq!(created["tiles"].as_array().unwrap().len(), 25);
        assert_eq!(created["running"], true);

        let (status, fetched) = call(&app, Method::GET, &format!("/api/games/{}", game_id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["tiles"], created["tiles"]);
        assert_eq!(fetched["expire_time"], created["expire_time"]);
    }

    #[tokio::test]
    async fn test_player_state_and_score() {
        let state = Arc::new(test_state());
        let round = state.games.create_game(Some("den")).unwrap();
        round
            .reset(Some("setzzzzzzzzzzzzzzzzzzzzzz".chars().collect()))
            .unwrap();
        assert!(round.guess_word("alice", "set"));
        assert!(round.guess_word("bob", "set"));
        let app = build_router(state);

        let (status, game) = call(&app, Method::GET, "/api/games/den/players/alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(game["player_guesses"], serde_json::json!(["SET"]));

        let (status, score) = call(&app, Method::GET, "/api/games/den/players/alice/score").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(score["scored_words"], serde_json::json!([]));
        assert_eq!(score["unscored_words"], serde_json::json!(["SET"]));
    }

    #[tokio::test]
    async fn test_missing_game_is_not_found() {
        let app = build_router(Arc::new(test_state()));

        for uri in [
            "/api/games/NOPE",
            "/api/games/NOPE/players/alice",
            "/api/games/NOPE/players/alice/score",
        ] {
            let (status, _) = call(&app, Method::GET, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{} should be 404", uri);
        }
    }
}
