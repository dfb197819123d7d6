//! Evaluator module - greedy one-ply auto-player
//!
//! Each candidate direction is executed for real inside a [`Speculation`],
//! measured, and reverted. The best-ranked direction is then executed again,
//! non-speculatively, so the committed tile spawn is a fresh random draw.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::model::Model;
use crate::rng::TileRng;
use crate::types::Direction;

/// Ranking record for one candidate direction.
///
/// Ordering compares `empty_cells` first, then `score`; more is better for
/// both. A move that leaves the board unchanged has no `empty_cells` and ranks
/// below every move that does something. The direction does not take part in
/// comparisons.
#[derive(Debug, Clone, Copy)]
pub struct MoveEfficiency {
    direction: Direction,
    empty_cells: Option<usize>,
    score: u32,
}

impl MoveEfficiency {
    pub fn new(direction: Direction, empty_cells: usize, score: u32) -> Self {
        Self {
            direction,
            empty_cells: Some(empty_cells),
            score,
        }
    }

    /// Sentinel for a direction that does not change the board
    pub fn no_effect(direction: Direction) -> Self {
        Self {
            direction,
            empty_cells: None,
            score: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn empty_cells(&self) -> Option<usize> {
        self.empty_cells
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_effective(&self) -> bool {
        self.empty_cells.is_some()
    }
}

impl PartialEq for MoveEfficiency {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MoveEfficiency {}

impl PartialOrd for MoveEfficiency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MoveEfficiency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.empty_cells
            .cmp(&other.empty_cells)
            .then(self.score.cmp(&other.score))
    }
}

/// Scoped "try a move, then revert" section.
///
/// On entry the guard pushes its own baseline snapshot and remembers the
/// history depth, max tile and save-needed flag. Whatever the probed move does
/// in between, dropping the guard truncates the history back to the baseline,
/// rolls back to it and restores the remembered fields.
pub(crate) struct Speculation<'a, R: TileRng> {
    model: &'a mut Model<R>,
    depth: usize,
    max_tile: u32,
    save_needed: bool,
}

impl<'a, R: TileRng> Speculation<'a, R> {
    pub(crate) fn begin(model: &'a mut Model<R>) -> Self {
        let depth = model.history.len();
        let max_tile = model.max_tile;
        let save_needed = model.save_needed;
        model.save_state();

        Self {
            model,
            depth,
            max_tile,
            save_needed,
        }
    }

    pub(crate) fn model(&mut self) -> &mut Model<R> {
        self.model
    }
}

impl<R: TileRng> Drop for Speculation<'_, R> {
    fn drop(&mut self) {
        // Keep only the baseline on top, then pop it back into place.
        self.model.history.truncate(self.depth + 1);
        self.model.rollback();
        self.model.max_tile = self.max_tile;
        self.model.save_needed = self.save_needed;
    }
}

impl<R: TileRng> Model<R> {
    /// Measure `direction` without committing it.
    ///
    /// The board, score, max tile and history are identical before and after.
    pub fn move_efficiency(&mut self, direction: Direction) -> MoveEfficiency {
        let mut probe = Speculation::begin(self);
        let model = probe.model();

        model.make_move(direction);
        let efficiency = if model.has_board_changed() {
            MoveEfficiency::new(direction, model.board.empty_count(), model.score)
        } else {
            MoveEfficiency::no_effect(direction)
        };

        trace!(
            direction = direction.as_str(),
            empty_cells = ?efficiency.empty_cells(),
            score = efficiency.score(),
            "probed move"
        );
        efficiency
    }

    /// Measure every direction, in [`Direction::ALL`] order
    pub fn evaluate_moves(&mut self) -> [MoveEfficiency; 4] {
        Direction::ALL.map(|direction| self.move_efficiency(direction))
    }

    /// Commit the best-ranked direction and return it.
    ///
    /// Ties keep the earliest direction in [`Direction::ALL`]. On a terminal
    /// board every direction ranks as "no effect" and the first one is
    /// executed, which changes nothing.
    pub fn auto_move(&mut self) -> Direction {
        let candidates = self.evaluate_moves();
        let best = candidates
            .iter()
            .copied()
            .reduce(|best, next| if next > best { next } else { best })
            .unwrap_or(MoveEfficiency::no_effect(Direction::ALL[0]));

        let direction = best.direction();
        // Committed effective moves always snapshot the board the player saw.
        if best.is_effective() {
            self.save_needed = true;
        }
        debug!(
            direction = direction.as_str(),
            empty_cells = ?best.empty_cells(),
            score = best.score(),
            "auto move"
        );
        self.make_move(direction);
        direction
    }

    /// Commit a uniformly random direction and return it
    pub fn random_move(&mut self) -> Direction {
        let direction = Direction::ALL[self.rng_mut().pick_index(Direction::ALL.len())];
        debug!(direction = direction.as_str(), "random move");
        self.make_move(direction);
        direction
    }
}
