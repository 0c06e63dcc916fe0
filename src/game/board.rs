use rand::Rng;

use super::{GameError, GridShape};
use crate::utils::letters::{letter_for_weight, total_weight};

/// Letter tiles of one round in row-major order. Tiles are upper-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    shape: GridShape,
    tiles: Vec<char>,
}

impl Board {
    /// Install an explicit tile sequence, bypassing random generation
    pub fn from_tiles(shape: GridShape, tiles: Vec<char>) -> Result<Self, GameError> {
        if tiles.len() != shape.len() {
            return Err(GameError::WrongTileCount {
                expected: shape.len(),
                actual: tiles.len(),
            });
        }

        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(position, tile)| {
                single_upper_letter(tile).ok_or(GameError::InvalidTile { position, tile })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { shape, tiles })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, position: usize) -> Option<char> {
        self.tiles.get(position).copied()
    }

    /// Positions holding the given letter, ascending
    pub fn positions_of(&self, letter: char) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == letter)
            .map(|(position, _)| position)
    }
}

/// Upper-case form of an alphabetic tile, when that form is a single letter
fn single_upper_letter(tile: char) -> Option<char> {
    if !tile.is_alphabetic() {
        return None;
    }
    let mut upper = tile.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(letter), None) => Some(letter),
        _ => None,
    }
}

pub struct BoardGenerator;

impl BoardGenerator {
    /// Generate a board with weighted letter distribution. Letters are drawn
    /// independently, so repeats are expected.
    pub fn generate(shape: GridShape) -> Board {
        Self::generate_with(shape, &mut rand::rng())
    }

    pub fn generate_with(shape: GridShape, rng: &mut impl Rng) -> Board {
        let total = total_weight();
        let tiles = (0..shape.len())
            .map(|_| Self::random_letter(total, rng))
            .collect();

        Board { shape, tiles }
    }

    fn random_letter(total: f32, rng: &mut impl Rng) -> char {
        letter_for_weight(rng.random::<f32>() * total)
    }
}
