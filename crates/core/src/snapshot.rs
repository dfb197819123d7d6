use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::rng::TileRng;
use crate::types::BOARD_SIZE;

/// Everything a view layer needs to draw one frame, copied out of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[u32; BOARD_SIZE]; BOARD_SIZE],
    pub score: u32,
    pub max_tile: u32,
    pub can_move: bool,
    pub undo_depth: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        !self.can_move
    }
}

impl<R: TileRng> Model<R> {
    /// Refresh `out` in place (no allocation)
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_values(&mut out.board);
        out.score = self.score;
        out.max_tile = self.max_tile;
        out.can_move = self.can_move();
        out.undo_depth = self.history.len();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rng::ScriptedRng;

    #[test]
    fn snapshot_copies_engine_state() {
        let board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut state = Model::from_board(board, ScriptedRng::new());
        state.left();

        let snap = state.snapshot();
        assert_eq!(snap.board[0], [4, 2, 0, 0]);
        assert_eq!(snap.score, 4);
        assert_eq!(snap.max_tile, 4);
        assert!(snap.can_move);
        assert!(!snap.game_over());
        assert_eq!(snap.undo_depth, 1);
    }

    #[test]
    fn snapshot_into_overwrites_previous_frame() {
        let mut state = Model::from_board(Board::new(), ScriptedRng::new());
        let mut snap = GameSnapshot {
            score: 99,
            undo_depth: 7,
            ..GameSnapshot::default()
        };
        state.snapshot_into(&mut snap);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.undo_depth, 0);

        state.reset_game_tiles();
        state.snapshot_into(&mut snap);
        assert_eq!(snap.board.iter().flatten().filter(|&&v| v != 0).count(), 2);

        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
            .unwrap();
        let state = Model::from_board(board, ScriptedRng::new());
        let json = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(json["can_move"], false);
        assert_eq!(json["board"][0][1], 4);
        let back: GameSnapshot = serde_json::from_value(json).unwrap();
        assert!(back.game_over());
    }
}
