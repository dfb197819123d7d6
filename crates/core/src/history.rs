//! History module - snapshot stack backing undo and speculative evaluation
//!
//! A [`Snapshot`] pairs a board with the score it was taken at. The pair is
//! pushed and popped as one unit, so the two can never drift apart.
//! The stack is unbounded.

use crate::board::Board;

/// Immutable copy of (board, score) taken before a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    board: Board,
    score: u32,
}

impl Snapshot {
    pub fn new(board: Board, score: u32) -> Self {
        Self { board, score }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// LIFO stack of snapshots
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Remove the most recent snapshot; `None` on an empty stack
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// Most recent snapshot without removing it
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot above `depth`
    pub fn truncate(&mut self, depth: usize) {
        self.snapshots.truncate(depth);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
