//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, auto-player, rendering layer).
//!
//! # Board Dimensions
//!
//! The puzzle is played on a fixed square grid:
//!
//! - **Size**: 4 x 4 cells (indexed `[row][col]`, both 0-3)
//! - **Empty cell**: a tile with value 0
//!
//! # Tile Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TILES` | 2 | Tiles spawned on a fresh board |
//! | `TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `MAX_TILE_VALUE` | 2^30 | Largest value accepted when building a board |
//!
//! # Examples
//!
//! ```
//! use merge_2048_types::{Direction, GameAction, Tile, BOARD_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//!
//! // Parse a game action
//! let action = GameAction::from_str("up").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! // Tiles compare by value
//! assert!(Tile::EMPTY.is_empty());
//! assert_eq!(Tile::new(4), Tile::new(4));
//!
//! assert_eq!(BOARD_SIZE, 4);
//! ```

/// Board side length in cells (4)
pub const BOARD_SIZE: usize = 4;

/// Total number of cells on the board (16)
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of tiles spawned when the board is reset
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 2 rather than a 4
pub const TWO_PROBABILITY: f64 = 0.9;

/// Largest value a board can be built with (2^30); two of them merge into
/// 2^31, the largest power of two a `u32` holds
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// A single board cell.
///
/// A tile has no identity beyond its position on the board; two tiles with the
/// same value are interchangeable. Value 0 marks an empty cell, every other
/// value is a power of two >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    value: u32,
}

impl Tile {
    /// The empty cell
    pub const EMPTY: Tile = Tile { value: 0 };

    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Check if the cell holds no tile
    ///
    /// # Examples
    ///
    /// ```
    /// use merge_2048_types::Tile;
    ///
    /// assert!(Tile::new(0).is_empty());
    /// assert!(!Tile::new(2).is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Check that a board may start with this value: 0, or a power of two
    /// from 2 up to [`MAX_TILE_VALUE`]
    pub const fn is_valid_value(value: u32) -> bool {
        value == 0 || (value >= 2 && value <= MAX_TILE_VALUE && value.is_power_of_two())
    }
}

impl From<u32> for Tile {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// The four move directions
///
/// Tiles slide toward the named edge of the board:
/// - **Left**: toward column 0
/// - **Right**: toward column 3
/// - **Up**: toward row 0
/// - **Down**: toward row 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order the auto-player evaluates them.
    ///
    /// Ties between equally ranked directions resolve to the earliest entry.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use merge_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("Up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands a view layer (keyboard handler, auto-play timer) sends to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide the board in one direction
    Move(Direction),
    /// Restore the previous board and score
    Undo,
    /// Let the greedy evaluator pick and commit a move
    AutoMove,
    /// Commit a uniformly random direction
    RandomMove,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Direction names map to [`GameAction::Move`].
    ///
    /// # Examples
    ///
    /// ```
    /// use merge_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("undo"), Some(GameAction::Undo));
    /// assert_eq!(GameAction::from_str("autoMove"), Some(GameAction::AutoMove));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_str(s) {
            return Some(GameAction::Move(direction));
        }
        match s.to_lowercase().as_str() {
            "undo" => Some(GameAction::Undo),
            "automove" => Some(GameAction::AutoMove),
            "randommove" => Some(GameAction::RandomMove),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(direction) => direction.as_str(),
            GameAction::Undo => "undo",
            GameAction::AutoMove => "autoMove",
            GameAction::RandomMove => "randomMove",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants() {
        assert_eq!(BOARD_SIZE, 4);
        assert_eq!(CELL_COUNT, 16);
        assert_eq!(INITIAL_TILES, 2);
        assert!((TWO_PROBABILITY - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tile_valid_values() {
        assert!(Tile::is_valid_value(0));
        assert!(Tile::is_valid_value(2));
        assert!(Tile::is_valid_value(2048));
        assert!(!Tile::is_valid_value(1));
        assert!(!Tile::is_valid_value(3));
        assert!(!Tile::is_valid_value(6));
        assert!(Tile::is_valid_value(MAX_TILE_VALUE));
        assert!(!Tile::is_valid_value(1 << 31));
    }

    #[test]
    fn test_direction_roundtrip_names() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn test_action_roundtrip_names() {
        let actions = [
            GameAction::Move(Direction::Left),
            GameAction::Undo,
            GameAction::AutoMove,
            GameAction::RandomMove,
            GameAction::Restart,
        ];
        for action in actions {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
