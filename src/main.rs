mod config;
mod dictionary;
mod game;
mod routes;
mod utils;
mod websocket;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use config::Config;
use dashmap::DashMap;
use dictionary::Dictionary;
use game::GameRegistry;
use tokio::sync::mpsc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use websocket::messages::ServerMessage;

/// A WebSocket connection subscribed to a room
#[derive(Debug, Clone)]
pub struct RoomConnection {
    pub player_id: String,
    pub tx: mpsc::Sender<ServerMessage>,
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub games: GameRegistry,
    /// Connections per room, keyed by room name then connection id
    pub rooms: DashMap<String, DashMap<Uuid, RoomConnection>>,
}

impl AppState {
    pub fn new(config: Config, games: GameRegistry) -> Self {
        Self {
            config,
            games,
            rooms: DashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_grid_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word grid server...");

    // Load configuration
    let config = Config::from_env()?;
    let settings = config.round_settings()?;
    tracing::info!("Configuration loaded");

    // The server must not run without a dictionary
    let dictionary = Dictionary::load(&config.game.dictionary_path)
        .await
        .with_context(|| {
            format!(
                "Download a word list to {} or set DICTIONARY_PATH",
                config.game.dictionary_path
            )
        })?;

    let games = GameRegistry::new(Arc::new(dictionary), settings);
    let state = Arc::new(AppState::new(config.clone(), games));

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router: WebSocket, API routes, then static files as fallback
pub fn build_router(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend_service = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
