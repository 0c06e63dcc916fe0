use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

use crate::game::{GridShape, RoundSettings};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub round_duration_secs: u64,
    pub board_rows: usize,
    pub board_cols: usize,
    pub max_word_len: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "./static".to_string()),
        };

        let game = GameConfig {
            dictionary_path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./words.txt".to_string()),
            round_duration_secs: env::var("ROUND_DURATION_SECS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .context("ROUND_DURATION_SECS must be a number")?,
            board_rows: env::var("BOARD_ROWS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("BOARD_ROWS must be a number")?,
            board_cols: env::var("BOARD_COLS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("BOARD_COLS must be a number")?,
            max_word_len: env::var("MAX_WORD_LENGTH")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .context("MAX_WORD_LENGTH must be a number")?,
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Round settings for the game registry
    pub fn round_settings(&self) -> Result<RoundSettings> {
        let shape = GridShape::new(self.game.board_rows, self.game.board_cols)
            .context("BOARD_ROWS and BOARD_COLS must be positive")?;

        Ok(RoundSettings {
            shape,
            duration: Duration::from_secs(self.game.round_duration_secs),
            max_word_len: self.game.max_word_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(rows: usize, cols: usize) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                static_dir: "./static".to_string(),
            },
            game: GameConfig {
                dictionary_path: "./words.txt".to_string(),
                round_duration_secs: 90,
                board_rows: rows,
                board_cols: cols,
                max_word_len: 12,
            },
        }
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(test_config(5, 5).server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_round_settings() {
        let settings = test_config(4, 6).round_settings().unwrap();
        assert_eq!(settings.shape, GridShape::new(4, 6).unwrap());
        assert_eq!(settings.duration, Duration::from_secs(90));
        assert_eq!(settings.max_word_len, 12);
    }

    #[test]
    fn test_round_settings_rejects_empty_board() {
        assert!(test_config(0, 5).round_settings().is_err());
    }
}
