use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position {position} is outside a board of {tiles} tiles")]
    InvalidPosition { position: usize, tiles: usize },

    #[error("board needs {expected} tiles, got {actual}")]
    WrongTileCount { expected: usize, actual: usize },

    #[error("tile {tile:?} at position {position} is not a letter")]
    InvalidTile { position: usize, tile: char },

    #[error("board must have at least one row and one column")]
    EmptyGrid,
}
