use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::{Board, BoardGenerator, GameError, GridShape, WordValidator};
use crate::dictionary::Dictionary;

/// How long a round accepts guesses
pub const DEFAULT_ROUND_DURATION: Duration = Duration::from_secs(3 * 60);
/// Longest guess that is searched for on the board
pub const DEFAULT_MAX_WORD_LENGTH: usize = 16;

/// Settings shared by every round of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub shape: GridShape,
    pub duration: Duration,
    /// Guesses with more letters are rejected before the path search
    pub max_word_len: usize,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            shape: GridShape::default(),
            duration: DEFAULT_ROUND_DURATION,
            max_word_len: DEFAULT_MAX_WORD_LENGTH,
        }
    }
}

/// State sent to a client when it (re)synchronizes with a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub game_id: String,
    /// Milliseconds since the Unix epoch
    pub expire_time: i64,
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<char>,
    pub running: bool,
    pub player_guesses: Vec<String>,
}

/// A player's accepted words split by the uniqueness rule: only words no
/// other player found this round score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    pub scored_words: Vec<String>,
    pub unscored_words: Vec<String>,
}

#[derive(Debug, Error)]
enum GuessRejection {
    #[error("round is over")]
    RoundOver,
    #[error("guess is empty")]
    Empty,
    #[error("longer than {0} letters")]
    TooLong(usize),
    #[error("already guessed by this player")]
    AlreadyGuessed,
    #[error("not a recognized word")]
    UnknownWord,
    #[error("not on the board")]
    NotOnBoard,
}

struct RoundState {
    board: Board,
    running: bool,
    expires_at: DateTime<Utc>,
    /// Bumped on every reset so a timer from an older round is ignored
    generation: u64,
    expiry_task: Option<JoinHandle<()>>,
    accepted: HashMap<String, HashSet<String>>,
    word_counts: HashMap<String, usize>,
}

impl RoundState {
    fn sorted_guesses(&self, player_id: &str) -> Vec<String> {
        let mut guesses: Vec<String> = self
            .accepted
            .get(player_id)
            .map(|words| words.iter().cloned().collect())
            .unwrap_or_default();
        guesses.sort_unstable();
        guesses
    }
}

/// One timed round of a game: a board plus every player's accepted words.
///
/// All mutable state sits behind one mutex, so guesses from concurrent
/// players are applied one at a time. Rounds never share a lock.
pub struct Round {
    game_id: String,
    dictionary: Arc<Dictionary>,
    settings: RoundSettings,
    this: Weak<Round>,
    state: Mutex<RoundState>,
}

impl Round {
    /// Create a running round with a generated board, or with `tiles` when
    /// given.
    pub fn new(
        game_id: impl Into<String>,
        dictionary: Arc<Dictionary>,
        settings: RoundSettings,
        tiles: Option<Vec<char>>,
    ) -> Result<Arc<Self>, GameError> {
        let board = Self::make_board(settings.shape, tiles)?;

        let round = Arc::new_cyclic(|this| Self {
            game_id: game_id.into(),
            dictionary,
            settings,
            this: this.clone(),
            state: Mutex::new(RoundState {
                board,
                running: false,
                expires_at: Utc::now(),
                generation: 0,
                expiry_task: None,
                accepted: HashMap::new(),
                word_counts: HashMap::new(),
            }),
        });

        round.begin(&mut round.lock());
        Ok(round)
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Install a new board and start a fresh round. Callable whether or not
    /// the current round is still running.
    pub fn reset(&self, tiles: Option<Vec<char>>) -> Result<(), GameError> {
        let board = Self::make_board(self.settings.shape, tiles)?;

        let mut state = self.lock();
        state.board = board;
        self.begin(&mut state);
        Ok(())
    }

    /// End the round early. Has no effect on a round that already ended.
    pub fn expire(&self) {
        let mut state = self.lock();
        if let Some(task) = state.expiry_task.take() {
            task.abort();
        }
        self.end(&mut state);
    }

    /// Submit a guess for a player. Returns true when the word was accepted.
    pub fn guess_word(&self, player_id: &str, raw_word: &str) -> bool {
        let word = raw_word.trim().to_uppercase();
        let mut state = self.lock();

        match self.check_guess(&state, player_id, &word) {
            Ok(()) => {
                *state.word_counts.entry(word.clone()).or_default() += 1;
                state
                    .accepted
                    .entry(player_id.to_string())
                    .or_default()
                    .insert(word.clone());

                tracing::info!("[{}] {} guessed valid word '{}'", self.game_id, player_id, word);
                true
            }
            Err(reason) => {
                tracing::debug!(
                    "[{}] {} guess '{}' rejected: {}",
                    self.game_id,
                    player_id,
                    word,
                    reason
                );
                false
            }
        }
    }

    /// Words a player has had accepted this round, sorted
    pub fn player_guesses(&self, player_id: &str) -> Vec<String> {
        self.lock().sorted_guesses(player_id)
    }

    pub fn get_score_state(&self, player_id: &str) -> ScoreState {
        let state = self.lock();
        let mut score = ScoreState::default();

        if let Some(words) = state.accepted.get(player_id) {
            for word in words {
                if state.word_counts.get(word) == Some(&1) {
                    score.scored_words.push(word.clone());
                } else {
                    score.unscored_words.push(word.clone());
                }
            }
        }

        score.scored_words.sort_unstable();
        score.unscored_words.sort_unstable();
        score
    }

    /// Snapshot of the round. Without a player the guesses are left empty,
    /// which is what a broadcast after a reset needs.
    pub fn get_game_state(&self, player_id: Option<&str>) -> GameSnapshot {
        let state = self.lock();
        let player_guesses = player_id
            .map(|player_id| state.sorted_guesses(player_id))
            .unwrap_or_default();

        let shape = state.board.shape();
        GameSnapshot {
            game_id: self.game_id.clone(),
            expire_time: state.expires_at.timestamp_millis(),
            rows: shape.rows,
            cols: shape.cols,
            tiles: state.board.tiles().to_vec(),
            running: state.running,
            player_guesses,
        }
    }

    fn check_guess(
        &self,
        state: &RoundState,
        player_id: &str,
        word: &str,
    ) -> Result<(), GuessRejection> {
        if !state.running {
            return Err(GuessRejection::RoundOver);
        }
        if word.is_empty() {
            return Err(GuessRejection::Empty);
        }
        if word.chars().count() > self.settings.max_word_len {
            return Err(GuessRejection::TooLong(self.settings.max_word_len));
        }
        if state
            .accepted
            .get(player_id)
            .is_some_and(|words| words.contains(word))
        {
            return Err(GuessRejection::AlreadyGuessed);
        }
        if !self.dictionary.is_word(word) {
            return Err(GuessRejection::UnknownWord);
        }
        if !WordValidator::word_is_on_board(word, &state.board) {
            return Err(GuessRejection::NotOnBoard);
        }
        Ok(())
    }

    fn make_board(shape: GridShape, tiles: Option<Vec<char>>) -> Result<Board, GameError> {
        match tiles {
            Some(tiles) => Board::from_tiles(shape, tiles),
            None => Ok(BoardGenerator::generate(shape)),
        }
    }

    /// Clear guesses, restart the clock and replace the expiry timer
    fn begin(&self, state: &mut RoundState) {
        if let Some(task) = state.expiry_task.take() {
            task.abort();
        }

        state.accepted.clear();
        state.word_counts.clear();
        state.running = true;
        state.generation += 1;

        let duration = TimeDelta::from_std(self.settings.duration).unwrap_or(TimeDelta::MAX);
        state.expires_at = Utc::now()
            .checked_add_signed(duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        state.expiry_task = self.schedule_expiry(state.generation);

        tracing::info!(
            "[{}] Created new board, round ends at {}",
            self.game_id,
            state.expires_at
        );
    }

    fn end(&self, state: &mut RoundState) {
        if state.running {
            state.running = false;
            tracing::info!("[{}] Round ended", self.game_id);
        }
    }

    fn schedule_expiry(&self, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                "[{}] No async runtime available, round will only end when expired explicitly",
                self.game_id
            );
            return None;
        };

        let round = self.this.clone();
        let duration = self.settings.duration;
        Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(round) = round.upgrade() {
                round.expire_generation(generation);
            }
        }))
    }

    fn expire_generation(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("[{}] Ignoring timer from an earlier round", self.game_id);
            return;
        }
        state.expiry_task = None;
        self.end(&mut state);
    }

    fn lock(&self) -> MutexGuard<'_, RoundState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Round {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = state.expiry_task.take() {
            task.abort();
        }
    }
}
