use crate::{
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, RoomConnection,
};
use anyhow::anyhow;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use dashmap::DashMap;
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Session identity chosen by the client. A fresh one is generated when
    /// missing, which scopes the player to this connection.
    pub player_id: Option<String>,
}

/// Identity of one WebSocket connection
#[derive(Debug, Clone)]
pub struct Session {
    pub connection_id: Uuid,
    pub player_id: String,
}

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let player_id = params
        .player_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let session = Session {
        connection_id: Uuid::new_v4(),
        player_id,
    };

    tracing::info!(
        "WebSocket upgrade for player {} (connection {})",
        session.player_id,
        session.connection_id
    );
    ws.on_upgrade(move |socket| handle_socket(socket, state, session))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session: Session) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let session_for_recv = session.clone();
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) = handle_client_message(
                            client_msg,
                            &state_for_recv,
                            &tx,
                            &session_for_recv,
                        )
                        .await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected: {}", session_for_recv.player_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    leave_all_rooms(&state.rooms, session.connection_id);

    tracing::info!(
        "WebSocket connection closed for player {} (connection {})",
        session.player_id,
        session.connection_id
    );
}

/// Handle individual client messages
pub async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    session: &Session,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::Join { room } => {
            let round = state.games.get_or_create(&room)?;
            state.rooms.entry(room.clone()).or_default().insert(
                session.connection_id,
                RoomConnection {
                    player_id: session.player_id.clone(),
                    tx: tx.clone(),
                },
            );
            tracing::info!("Player {} has joined room {}", session.player_id, room);

            let snapshot = round.get_game_state(Some(&session.player_id));
            tx.send(ServerMessage::GameState { state: snapshot }).await?;
        }
        ClientMessage::Guess { room, guess } => {
            let round = state
                .games
                .get(&room)
                .ok_or_else(|| anyhow!("Game {} not found", room))?;
            tracing::debug!("Received guess from {} in {}: {}", session.player_id, room, guess);

            let valid = round.guess_word(&session.player_id, &guess);
            tx.send(ServerMessage::GuessReply { valid, guess }).await?;
        }
        ClientMessage::NewGame { room } => {
            let round = state.games.create_game(Some(&room))?;
            tracing::info!("Player {} started a new round in {}", session.player_id, room);

            // Guesses belong to the old round, so nobody gets personal state
            let snapshot = round.get_game_state(None);
            broadcast_to_room(state, &room, ServerMessage::GameState { state: snapshot }).await;
        }
        ClientMessage::Score { room } => {
            let round = state
                .games
                .get(&room)
                .ok_or_else(|| anyhow!("Game {} not found", room))?;
            let score = round.get_score_state(&session.player_id);
            tx.send(ServerMessage::ScoreState { score }).await?;
        }
    }

    Ok(())
}

/// Send a message to every connection subscribed to a room
pub async fn broadcast_to_room(state: &AppState, room: &str, message: ServerMessage) {
    let members: Vec<RoomConnection> = state
        .rooms
        .get(room)
        .map(|members| members.iter().map(|entry| entry.value().clone()).collect())
        .unwrap_or_default();

    for member in members {
        if member.tx.send(message.clone()).await.is_err() {
            tracing::debug!("Player {} in {} is no longer listening", member.player_id, room);
        }
    }
}

fn leave_all_rooms(rooms: &DashMap<String, DashMap<Uuid, RoomConnection>>, connection_id: Uuid) {
    for room in rooms.iter() {
        room.value().remove(&connection_id);
    }
    rooms.retain(|_, members| !members.is_empty());
}
