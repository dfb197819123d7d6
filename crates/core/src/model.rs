//! Model module - the rules engine
//!
//! [`Model`] owns the board, the score, the running maximum tile, the undo
//! history and the random source. All mutation of the board goes through the
//! operations defined here: the four directional moves, `reset_game_tiles`,
//! `restart` and `rollback`.
//!
//! # Moves
//!
//! Only [`Model::left`] contains compress/merge logic. The other directions
//! transform the board so that their target edge becomes the left edge, run
//! `left`, and transform back:
//!
//! | Move | Transform |
//! |------|-----------|
//! | right | horizontal mirror |
//! | up | main-diagonal reflection |
//! | down | anti-diagonal reflection |
//!
//! # Snapshots
//!
//! `right`, `up` and `down` snapshot unconditionally before moving. `left`
//! snapshots only while the save-needed flag is set, so repeated no-op `left`
//! calls do not grow the history. The flag is cleared by every snapshot and set
//! again by a `left` that modified the board.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::board::{compress_row, merge_row, Board};
use crate::history::{History, Snapshot};
use crate::rng::TileRng;
use crate::types::{Direction, GameAction, Tile, INITIAL_TILES, TWO_PROBABILITY};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Model<R = SmallRng> {
    pub(crate) board: Board,
    pub(crate) score: u32,
    pub(crate) max_tile: u32,
    pub(crate) save_needed: bool,
    pub(crate) history: History,
    rng: R,
}

impl Model<SmallRng> {
    /// Create a new game seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Create a new game with a fixed seed (replays produce identical games)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for Model<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TileRng> Model<R> {
    /// Create a new game drawing from `rng`, with the two starting tiles placed
    pub fn with_rng(rng: R) -> Self {
        let mut model = Self::from_board(Board::new(), rng);
        model.reset_game_tiles();
        model
    }

    /// Start from a prepared position without spawning anything.
    ///
    /// Score and max tile start at 0, history starts empty.
    pub fn from_board(board: Board, rng: R) -> Self {
        Self {
            board,
            score: 0,
            max_tile: 0,
            save_needed: true,
            history: History::new(),
            rng,
        }
    }

    /// Clear the board and spawn the starting tiles.
    ///
    /// Score, max tile and history are left as they are; see [`Model::restart`].
    pub fn reset_game_tiles(&mut self) {
        self.board.clear();
        for _ in 0..INITIAL_TILES {
            self.add_tile();
        }
        debug!(board = ?self.board.values(), "board reset");
    }

    /// Start a new game: empty history, zero score and max tile, fresh tiles
    pub fn restart(&mut self) {
        self.history.clear();
        self.score = 0;
        self.max_tile = 0;
        self.save_needed = true;
        self.reset_game_tiles();
    }

    /// Spawn a 2 (90%) or a 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Returns false (and changes nothing) on a full board.
    pub(crate) fn add_tile(&mut self) -> bool {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return false;
        }

        let (row, col) = empty[self.rng.pick_index(empty.len())];
        let value = if self.rng.chance(TWO_PROBABILITY) { 2 } else { 4 };
        self.board.set(row, col, Tile::new(value));
        true
    }

    /// Slide every row toward column 0, merging equal neighbours once.
    ///
    /// Returns true if the board changed (a tile was spawned in that case).
    pub fn left(&mut self) -> bool {
        if self.save_needed {
            self.save_state();
        }

        let mut modified = false;
        let mut points = 0;
        let mut max_merged = 0;

        for row in self.board.rows_mut().iter_mut() {
            let compressed = compress_row(row);
            let merged = merge_row(row);
            if compressed || merged.modified {
                modified = true;
                self.save_needed = true;
            }
            points += merged.points;
            max_merged = max_merged.max(merged.max_merged);
        }

        self.score = self.score.saturating_add(points);
        self.max_tile = self.max_tile.max(max_merged);

        if modified {
            self.add_tile();
        }
        modified
    }

    pub fn right(&mut self) -> bool {
        self.save_state();

        self.board.mirror();
        let modified = self.left();
        self.board.mirror();
        modified
    }

    pub fn up(&mut self) -> bool {
        self.save_state();

        self.board.transpose();
        let modified = self.left();
        self.board.transpose();
        modified
    }

    pub fn down(&mut self) -> bool {
        self.save_state();

        self.board.anti_transpose();
        let modified = self.left();
        self.board.anti_transpose();
        modified
    }

    /// Execute the move for `direction`
    pub fn make_move(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left(),
            Direction::Right => self.right(),
            Direction::Up => self.up(),
            Direction::Down => self.down(),
        }
    }

    /// Apply a view-layer command; returns true if the board changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.make_move(direction),
            GameAction::Undo => {
                let before = self.board;
                self.rollback() && self.board != before
            }
            GameAction::AutoMove => {
                let before = self.board;
                self.auto_move();
                self.board != before
            }
            GameAction::RandomMove => {
                let before = self.board;
                self.random_move();
                self.board != before
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// False exactly when the board is full and no adjacent pair can merge
    pub fn can_move(&self) -> bool {
        self.board.empty_count() > 0 || self.board.has_adjacent_pair()
    }

    /// Push a copy of the current board and score onto the history
    pub fn save_state(&mut self) {
        self.history.push(Snapshot::new(self.board, self.score));
        self.save_needed = false;
    }

    /// Restore the most recent snapshot.
    ///
    /// Returns false (and changes nothing) when the history is empty.
    pub fn rollback(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.board = *snapshot.board();
                self.score = snapshot.score();
                true
            }
            None => {
                trace!("rollback on empty history ignored");
                false
            }
        }
    }

    /// Compare the live board with the most recent snapshot.
    ///
    /// An empty history counts as unchanged.
    pub fn has_board_changed(&self) -> bool {
        self.history
            .peek()
            .is_some_and(|snapshot| *snapshot.board() != self.board)
    }

    /// Read-only view of the grid for rendering
    pub fn game_tiles(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    /// Number of snapshots available to [`Model::rollback`]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_save_needed(&self) -> bool {
        self.save_needed
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
