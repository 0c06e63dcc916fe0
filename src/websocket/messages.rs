use serde::{Deserialize, Serialize};

use crate::game::{GameSnapshot, ScoreState};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to a room, creating its game if needed
    Join { room: String },
    Guess { room: String, guess: String },
    /// Start a new round for everyone in the room
    NewGame { room: String },
    Score { room: String },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState {
        #[serde(flatten)]
        state: GameSnapshot,
    },
    GuessReply {
        valid: bool,
        guess: String,
    },
    ScoreState {
        #[serde(flatten)]
        score: ScoreState,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_client_messages() {
        let guess: ClientMessage =
            serde_json::from_str(r#"{"type":"guess","room":"ABC123","guess":"stab"}"#).unwrap();
        assert_eq!(
            guess,
            ClientMessage::Guess {
                room: "ABC123".to_string(),
                guess: "stab".to_string()
            }
        );

        let new_game: ClientMessage =
            serde_json::from_str(r#"{"type":"new_game","room":"ABC123"}"#).unwrap();
        assert_eq!(
            new_game,
            ClientMessage::NewGame {
                room: "ABC123".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_client_message_fails() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"cheat","room":"x"}"#).is_err());
    }

    #[test]
    fn test_game_state_is_flattened() {
        let message = ServerMessage::GameState {
            state: GameSnapshot {
                game_id: "ABC123".to_string(),
                expire_time: 1_700_000_000_000,
                rows: 1,
                cols: 2,
                tiles: vec!['A', 'B'],
                running: true,
                player_guesses: vec![],
            },
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "game_state",
                "game_id": "ABC123",
                "expire_time": 1_700_000_000_000_i64,
                "rows": 1,
                "cols": 2,
                "tiles": ["A", "B"],
                "running": true,
                "player_guesses": [],
            })
        );
    }

    #[test]
    fn test_guess_reply_format() {
        let message = ServerMessage::GuessReply {
            valid: false,
            guess: "zzz".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"type": "guess_reply", "valid": false, "guess": "zzz"})
        );
    }
}
