use std::future::Future;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

use common::{GameId, log};

use crate::api_error::ApiError;
use crate::game_service::GameService;
use crate::models::{API_NAME, GameResponse, MoveRequest, RootResponse};
use crate::server_config::ServerConfig;
use crate::session_store::SessionStore;

#[derive(Clone)]
pub struct WebServerState<S: SessionStore> {
    pub game_service: GameService<S>,
}

/// Wildcard origins cannot be combined with credentials, so the two cases
/// get different layers.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_router<S: SessionStore>(game_service: GameService<S>, config: &ServerConfig) -> Router {
    let state = WebServerState { game_service };

    Router::new()
        .route("/", get(root_handler))
        .route("/game/new", post(new_game_handler::<S>))
        .route("/game/{game_id}", get(get_game_handler::<S>))
        .route("/game/{game_id}/move", post(make_move_handler::<S>))
        .layer(build_cors_layer(config))
        .with_state(state)
}

pub async fn run_web_server<S: SessionStore>(
    game_service: GameService<S>,
    config: &ServerConfig,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(game_service, config);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log!("Web server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: API_NAME.to_string(),
    })
}

async fn new_game_handler<S: SessionStore>(
    State(state): State<WebServerState<S>>,
) -> Result<Json<GameResponse>, ApiError> {
    let response = state.game_service.new_game().await?;
    Ok(Json(response))
}

async fn get_game_handler<S: SessionStore>(
    State(state): State<WebServerState<S>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let response = state.game_service.get_game(&GameId::new(game_id)).await?;
    Ok(Json(response))
}

async fn make_move_handler<S: SessionStore>(
    State(state): State<WebServerState<S>>,
    Path(game_id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let response = state
        .game_service
        .make_move(&GameId::new(game_id), request)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use common::games::tictactoe::{Board, Mark, TicTacToeGameState};

    use crate::models::ErrorResponse;
    use crate::session_store::InMemorySessionStore;

    use Mark::{Empty as E, O, X};

    fn test_service() -> GameService<InMemorySessionStore> {
        GameService::new(InMemorySessionStore::new(Duration::from_secs(60), 100))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Router holding one game; returns the game's move URI.
    async fn seeded_router(user: Mark, board: Board) -> (Router, String) {
        let service = test_service();
        let mut state = TicTacToeGameState::new(user).unwrap();
        state.board = board;
        let created = service.start_game(state).await;
        let move_uri = format!("/game/{}/move", created.game_id);
        (build_router(service, &ServerConfig::default()), move_uri)
    }

    #[tokio::test]
    async fn test_root_message() {
        let app = build_router(test_service(), &ServerConfig::default());

        let (status, body) = send(app, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        let root: RootResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(root.message, "Tic-Tac-Toe API");
    }

    #[tokio::test]
    async fn test_new_game_then_fetch() {
        let service = test_service();
        let app = build_router(service.clone(), &ServerConfig::default());

        let (status, body) = send(app.clone(), post_json("/game/new", "")).await;
        assert_eq!(status, StatusCode::OK);
        let created: GameResponse = serde_json::from_slice(&body).unwrap();

        let (status, body) = send(app, get_request(&format!("/game/{}", created.game_id))).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: GameResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_move_roundtrip() {
        let (app, move_uri) = seeded_router(X, Board::new()).await;

        let (status, body) = send(app, post_json(&move_uri, r#"{"row": 1, "col": 1}"#)).await;

        assert_eq!(status, StatusCode::OK);
        let response: GameResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.board[1][1], "X");
        assert_eq!(response.board[0][0], "O");
        assert_eq!(response.user_player, "X");
        assert!(!response.game_over);
    }

    #[tokio::test]
    async fn test_unknown_game_returns_404() {
        let app = build_router(test_service(), &ServerConfig::default());

        let (status, body) = send(app, get_request("/game/000000")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.detail, "Game not found");
    }

    #[tokio::test]
    async fn test_out_of_range_move_returns_400() {
        let (app, move_uri) = seeded_router(X, Board::new()).await;

        let (status, body) = send(app, post_json(&move_uri, r#"{"row": -1, "col": 0}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.detail, "Invalid move coordinates");
    }

    #[tokio::test]
    async fn test_occupied_cell_returns_400() {
        let (app, move_uri) = seeded_router(X, Board::from_cells([[O, E, E], [E, E, E], [E, E, E]])).await;

        let (status, body) = send(app, post_json(&move_uri, r#"{"row": 0, "col": 0}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.detail, "Cell already occupied");
    }

    #[tokio::test]
    async fn test_finished_game_returns_400() {
        let (app, move_uri) = seeded_router(X, Board::from_cells([[O, O, O], [X, X, E], [X, E, E]])).await;

        let (status, body) = send(app, post_json(&move_uri, r#"{"row": 2, "col": 2}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.detail, "Game is over");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = build_router(test_service(), &ServerConfig::default());
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_unknown_origin() {
        let app = build_router(test_service(), &ServerConfig::default());
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_cors_wildcard() {
        let mut config = ServerConfig::default();
        config.apply_allowed_origins("*");
        let app = build_router(test_service(), &config);
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://anywhere.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
