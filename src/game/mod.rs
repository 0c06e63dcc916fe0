// Game engine modules

pub mod board;
pub mod error;
pub mod grid;
pub mod registry;
pub mod round;
pub mod validator;

pub use board::{Board, BoardGenerator};
pub use error::GameError;
pub use grid::GridShape;
pub use registry::GameRegistry;
pub use round::{GameSnapshot, Round, RoundSettings, ScoreState};
pub use validator::WordValidator;
