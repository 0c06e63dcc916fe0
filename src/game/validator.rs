use std::collections::HashSet;

use super::Board;

/// Partial paths of equal length stored back to back in one buffer.
/// Path `i` occupies `positions[i * len..(i + 1) * len]`.
struct PathArena {
    len: usize,
    positions: Vec<usize>,
}

impl PathArena {
    fn seeded(starts: impl Iterator<Item = usize>) -> Self {
        Self {
            len: 1,
            positions: starts.collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn paths(&self) -> impl Iterator<Item = &[usize]> {
        self.positions.chunks_exact(self.len)
    }

    /// Extend every path with every candidate position that neighbors its
    /// last tile and is not already on it. Paths that cannot be extended
    /// are dropped.
    fn extend(&self, board: &Board, candidates: &[usize]) -> Self {
        let shape = board.shape();
        let mut next = Vec::new();

        for &candidate in candidates {
            for path in self.paths() {
                if path.contains(&candidate) {
                    continue;
                }
                let last = path[path.len() - 1];
                if shape.are_neighbors(last, candidate).unwrap_or(false) {
                    next.extend_from_slice(path);
                    next.push(candidate);
                }
            }
        }

        Self {
            len: self.len + 1,
            positions: next,
        }
    }
}

pub struct WordValidator;

impl WordValidator {
    /// Check if the word can be spelled by a path of adjacent, distinct
    /// tiles. Case is ignored. The empty word is never on the board.
    pub fn word_is_on_board(word: &str, board: &Board) -> bool {
        match Self::find_path(word, board) {
            Some(path) => {
                debug_assert!(Self::is_valid_path(board, &path));
                debug_assert_eq!(Self::extract_word(board, &path), word.trim().to_uppercase());
                true
            }
            None => false,
        }
    }

    /// Find one path spelling the word, breadth first over all partial
    /// paths that match the prefix read so far.
    pub fn find_path(word: &str, board: &Board) -> Option<Vec<usize>> {
        let letters: Vec<char> = word.trim().to_uppercase().chars().collect();

        if letters.is_empty() || letters.len() > board.len() {
            return None;
        }

        let mut arena = PathArena::seeded(board.positions_of(letters[0]));

        for &letter in &letters[1..] {
            if arena.is_empty() {
                return None;
            }
            let candidates: Vec<usize> = board.positions_of(letter).collect();
            arena = arena.extend(board, &candidates);
        }

        let path = arena.paths().next().map(<[usize]>::to_vec);
        path
    }

    /// Validate that positions form a valid path on the board
    pub fn is_valid_path(board: &Board, positions: &[usize]) -> bool {
        if positions.is_empty() {
            return false;
        }

        // Check that all positions are within bounds
        if positions.iter().any(|&pos| pos >= board.len()) {
            return false;
        }

        // Check that each position is adjacent to the previous one
        let shape = board.shape();
        for window in positions.windows(2) {
            if !shape.are_neighbors(window[0], window[1]).unwrap_or(false) {
                return false;
            }
        }

        // Check that no position is used twice
        let unique_positions: HashSet<_> = positions.iter().collect();
        unique_positions.len() == positions.len()
    }

    /// Extract word from board positions
    pub fn extract_word(board: &Board, positions: &[usize]) -> String {
        positions.iter().filter_map(|&pos| board.tile(pos)).collect()
    }
}
