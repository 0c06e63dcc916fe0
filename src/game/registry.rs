use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};
use rand::Rng;

use super::{GameError, Round, RoundSettings};
use crate::dictionary::Dictionary;

/// Allowed characters for game codes - excludes I, O, 0, 1 for readability
pub const GAME_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
/// Length of generated game codes
pub const GAME_CODE_LENGTH: usize = 6;

/// All games of the process, keyed by game id. Games are created on demand
/// and live until shutdown; a game is reset rather than removed.
pub struct GameRegistry {
    dictionary: Arc<Dictionary>,
    settings: RoundSettings,
    games: DashMap<String, Arc<Round>>,
}

impl GameRegistry {
    pub fn new(dictionary: Arc<Dictionary>, settings: RoundSettings) -> Self {
        Self {
            dictionary,
            settings,
            games: DashMap::new(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Create a game. Without a name a fresh code is generated. A name that
    /// is already registered starts a new round of that game instead.
    pub fn create_game(&self, name: Option<&str>) -> Result<Arc<Round>, GameError> {
        match name {
            Some(name) => {
                if let Some(round) = self.get(name) {
                    round.reset(None)?;
                    tracing::info!("Started a new round of game {}", name);
                    return Ok(round);
                }
                Ok(self.insert_new(name.to_string())?.0)
            }
            None => loop {
                let (round, created) = self.insert_new(generate_game_code())?;
                if created {
                    return Ok(round);
                }
            },
        }
    }

    /// Look up a game, or create it when it does not exist yet
    pub fn get_or_create(&self, game_id: &str) -> Result<Arc<Round>, GameError> {
        match self.get(game_id) {
            Some(round) => Ok(round),
            None => Ok(self.insert_new(game_id.to_string())?.0),
        }
    }

    pub fn get(&self, game_id: &str) -> Option<Arc<Round>> {
        self.games.get(game_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Insert a new round under `game_id` unless one already exists. Returns
    /// the registered round and whether it was created by this call.
    fn insert_new(&self, game_id: String) -> Result<(Arc<Round>, bool), GameError> {
        match self.games.entry(game_id) {
            Entry::Occupied(entry) => Ok((entry.get().clone(), false)),
            Entry::Vacant(entry) => {
                let round = Round::new(
                    entry.key().clone(),
                    self.dictionary.clone(),
                    self.settings,
                    None,
                )?;
                entry.insert(round.clone());
                tracing::info!("Created game {}", round.game_id());
                Ok((round, true))
            }
        }
    }
}

/// Generate a short, readable game code (6 alphanumeric characters)
fn generate_game_code() -> String {
    let mut rng = rand::rng();
    (0..GAME_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..GAME_CODE_CHARSET.len());
            GAME_CODE_CHARSET[idx] as char
        })
        .collect()
}
