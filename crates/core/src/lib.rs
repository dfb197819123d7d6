//! Core game logic module - rules engine, undo history and auto-player
//!
//! This module contains all the game rules, state management, and move selection.
//! It has **no dependencies** on UI, input handling, or I/O, making it:
//!
//! - **Deterministic**: every random draw goes through an injectable [`TileRng`]
//! - **Testable**: scripted randomness pins tile spawns and random moves
//! - **Portable**: any view layer drives it through the same small API
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid, row compress/merge primitives and geometric transforms
//! - [`history`]: snapshot stack used by undo and by speculative evaluation
//! - [`model`]: the engine: four directional moves, spawning, score, max tile
//! - [`evaluator`]: greedy one-ply move ranking, `auto_move`, `random_move`
//! - [`rng`]: randomness seam ([`TileRng`]) and a scripted source for tests
//! - [`snapshot`]: read-only, serializable frame for rendering
//!
//! # Game Rules
//!
//! - **Moves**: tiles slide toward one edge; equal neighbours merge once per move
//! - **Spawning**: a changed board gets one new tile, 2 (90%) or 4 (10%)
//! - **Scoring**: each merge adds the value of the new tile
//! - **Game over**: board full and no adjacent equal pair
//!
//! # Example
//!
//! ```
//! use merge_2048_core::Model;
//! use merge_2048_types::{Direction, GameAction};
//!
//! let mut game = Model::with_seed(12345);
//!
//! game.apply_action(GameAction::Move(Direction::Left));
//! let chosen = game.auto_move();
//! println!("auto-player chose {chosen}");
//!
//! // Undo the auto move
//! game.rollback();
//!
//! assert!(game.can_move());
//! ```

pub mod board;
pub mod evaluator;
pub mod history;
pub mod model;
pub mod rng;
pub mod snapshot;

pub use merge_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{compress_row, merge_row, Board, MergeOutcome};
pub use evaluator::MoveEfficiency;
pub use history::{History, Snapshot};
pub use model::Model;
pub use rng::{ScriptedRng, TileRng};
pub use snapshot::GameSnapshot;
