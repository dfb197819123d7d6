//! Board module - manages the game grid
//!
//! The board is a 4x4 grid of tiles stored by value, so cloning a board is a
//! full deep copy (which is what history snapshots rely on).
//! Coordinates: `[row][col]`, row 0 is the top edge, col 0 is the left edge.
//!
//! Only the "left" move is implemented directly (`compress_row` / `merge_row`).
//! The other directions are expressed through the geometric transforms below,
//! which are all involutions: applying one twice restores the board.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Tile, BOARD_SIZE, CELL_COUNT};

/// One board line, read in the direction tiles slide toward
pub type Row = [Tile; BOARD_SIZE];

/// Result of merging one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Whether any pair merged
    pub modified: bool,
    /// Sum of the values of all freshly merged tiles
    pub points: u32,
    /// Largest freshly merged tile (0 if nothing merged)
    pub max_merged: u32,
}

/// Slide all nonzero tiles toward index 0, preserving their order.
///
/// Returns true if any tile moved.
pub fn compress_row(row: &mut Row) -> bool {
    let mut modified = false;
    let mut write = 0;

    for read in 0..BOARD_SIZE {
        if row[read].is_empty() {
            continue;
        }
        if read != write {
            row[write] = row[read];
            row[read] = Tile::EMPTY;
            modified = true;
        }
        write += 1;
    }

    modified
}

/// Merge equal neighbours in a single left-to-right sweep, then close the gaps.
///
/// A tile produced by a merge never merges again in the same sweep:
/// `[4, 4, 4, 4]` becomes `[8, 8, 0, 0]`, not `[16, 0, 0, 0]`.
pub fn merge_row(row: &mut Row) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    let mut i = 0;
    while i + 1 < BOARD_SIZE {
        if let Some(merged) = merged_value(row[i], row[i + 1]) {
            row[i] = Tile::new(merged);
            row[i + 1] = Tile::EMPTY;

            outcome.modified = true;
            outcome.points = outcome.points.saturating_add(merged);
            outcome.max_merged = outcome.max_merged.max(merged);

            // Both participants are consumed.
            i += 2;
        } else {
            i += 1;
        }
    }

    compress_row(row);
    outcome
}

/// Value of the tile two equal neighbours combine into.
///
/// `None` for empty cells, unequal values, and pairs whose sum no longer fits
/// in a `u32` (those stay put).
fn merged_value(first: Tile, second: Tile) -> Option<u32> {
    if first.is_empty() || first != second {
        return None;
    }
    first.value().checked_mul(2)
}

/// The game board - 4 rows x 4 columns of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    rows: [Row; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [[Tile::EMPTY; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from raw values.
    ///
    /// Returns `None` if any value is neither 0 nor a power of two between 2 and
    /// [`MAX_TILE_VALUE`](crate::types::MAX_TILE_VALUE).
    pub fn from_rows(values: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Option<Self> {
        let mut board = Self::new();
        for (row, line) in board.rows.iter_mut().zip(values.iter()) {
            for (cell, &value) in row.iter_mut().zip(line.iter()) {
                if !Tile::is_valid_value(value) {
                    return None;
                }
                *cell = Tile::new(value);
            }
        }
        Some(board)
    }

    /// Get side length of the board
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get tile at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[Row; BOARD_SIZE] {
        &self.rows
    }

    /// Copy the tile values into a plain grid (rendering / serialization)
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        let mut out = [[0u32; BOARD_SIZE]; BOARD_SIZE];
        self.write_values(&mut out);
        out
    }

    /// Write the tile values into an existing grid without allocating
    pub fn write_values(&self, out: &mut [[u32; BOARD_SIZE]; BOARD_SIZE]) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.value();
            }
        }
    }

    /// Count empty cells
    pub fn empty_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|tile| tile.is_empty())
            .count()
    }

    /// Positions of all empty cells in row-major order (stack-only)
    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), CELL_COUNT> {
        let mut cells = ArrayVec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, tile) in row.iter().enumerate() {
                if tile.is_empty() {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Check if any horizontally or vertically adjacent pair holds equal tiles
    pub fn has_adjacent_pair(&self) -> bool {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.rows[r][c];
                if c + 1 < BOARD_SIZE && merged_value(tile, self.rows[r][c + 1]).is_some() {
                    return true;
                }
                if r + 1 < BOARD_SIZE && merged_value(tile, self.rows[r + 1][c]).is_some() {
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.rows[row][col] = tile;
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row; BOARD_SIZE] {
        &mut self.rows
    }

    pub(crate) fn clear(&mut self) {
        self.rows = [[Tile::EMPTY; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Reverse every row (horizontal mirror)
    pub(crate) fn mirror(&mut self) {
        for row in &mut self.rows {
            row.reverse();
        }
    }

    /// Reflect across the main diagonal: `[r][c] <-> [c][r]`
    pub(crate) fn transpose(&mut self) {
        for r in 0..BOARD_SIZE {
            for c in (r + 1)..BOARD_SIZE {
                let tmp = self.rows[r][c];
                self.rows[r][c] = self.rows[c][r];
                self.rows[c][r] = tmp;
            }
        }
    }

    /// Reflect across the anti-diagonal: `[r][c] <-> [n-1-c][n-1-r]`
    pub(crate) fn anti_transpose(&mut self) {
        let max = BOARD_SIZE - 1;
        for r in 0..BOARD_SIZE {
            // Cells strictly above the anti-diagonal: r + c < max.
            for c in 0..(max - r) {
                let tmp = self.rows[r][c];
                self.rows[r][c] = self.rows[max - c][max - r];
                self.rows[max - c][max - r] = tmp;
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (c, tile) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                if tile.is_empty() {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", tile.value())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_TILE_VALUE;

    fn row(values: [u32; 4]) -> Row {
        values.map(Tile::new)
    }

    fn board(values: [[u32; 4]; 4]) -> Board {
        Board::from_rows(values).unwrap()
    }

    const SAMPLE: [[u32; 4]; 4] = [
        [2, 4, 8, 16],
        [32, 64, 128, 256],
        [512, 1024, 2048, 4096],
        [0, 2, 0, 4],
    ];

    #[test]
    fn test_compress_row_slides_left() {
        let mut r = row([0, 2, 0, 4]);
        assert!(compress_row(&mut r));
        assert_eq!(r, row([2, 4, 0, 0]));

        // Already packed: nothing moves
        assert!(!compress_row(&mut r));
    }

    #[test]
    fn test_merge_row_pairs() {
        let mut r = row([2, 2, 4, 4]);
        let outcome = merge_row(&mut r);
        assert_eq!(r, row([4, 8, 0, 0]));
        assert!(outcome.modified);
        assert_eq!(outcome.points, 12);
        assert_eq!(outcome.max_merged, 8);
    }

    #[test]
    fn test_merge_row_single_pass() {
        let mut r = row([4, 4, 4, 4]);
        let outcome = merge_row(&mut r);
        assert_eq!(r, row([8, 8, 0, 0]));
        assert_eq!(outcome.points, 16);
    }

    #[test]
    fn test_merge_row_leftmost_pair_wins() {
        let mut r = row([2, 2, 2, 0]);
        merge_row(&mut r);
        assert_eq!(r, row([4, 2, 0, 0]));
    }

    #[test]
    fn test_merge_row_no_equal_neighbours() {
        let mut r = row([2, 4, 2, 4]);
        let outcome = merge_row(&mut r);
        assert_eq!(r, row([2, 4, 2, 4]));
        assert_eq!(outcome, MergeOutcome::default());
    }

    #[test]
    fn test_from_rows_rejects_invalid_values() {
        assert!(Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_none());
        assert!(Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_none());
        assert!(Board::from_rows(SAMPLE).is_some());
        assert!(Board::from_rows([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]).is_none());
        assert!(Board::from_rows([[MAX_TILE_VALUE; 4], [0; 4], [0; 4], [0; 4]]).is_some());
    }

    #[test]
    fn test_merge_row_largest_values() {
        let mut r = row([MAX_TILE_VALUE; 4]);
        let outcome = merge_row(&mut r);
        assert_eq!(r, row([1 << 31, 1 << 31, 0, 0]));
        assert_eq!(outcome.points, u32::MAX);
        assert_eq!(outcome.max_merged, 1 << 31);

        // 2^31 pairs would overflow; they neither merge nor count as a move
        let outcome = merge_row(&mut r);
        assert!(!outcome.modified);
        assert_eq!(r, row([1 << 31, 1 << 31, 0, 0]));

        let mut full = [[0u32; 4]; 4];
        for (i, line) in full.iter_mut().enumerate() {
            for (j, cell) in line.iter_mut().enumerate() {
                *cell = 1 << (2 * ((i + j) % 2) + 1);
            }
        }
        let mut b = board(full);
        b.rows[0] = row([1 << 31, 1 << 31, 2, 8]);
        assert!(!b.has_adjacent_pair());
    }

    #[test]
    fn test_transforms_are_involutions() {
        let original = board(SAMPLE);

        let mut b = original;
        b.mirror();
        assert_ne!(b, original);
        b.mirror();
        assert_eq!(b, original);

        b.transpose();
        assert_ne!(b, original);
        b.transpose();
        assert_eq!(b, original);

        b.anti_transpose();
        assert_ne!(b, original);
        b.anti_transpose();
        assert_eq!(b, original);
    }

    #[test]
    fn test_anti_transpose_mapping() {
        let mut b = board(SAMPLE);
        b.anti_transpose();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(b.rows[r][c].value(), SAMPLE[3 - c][3 - r]);
            }
        }
    }

    #[test]
    fn test_transpose_mapping() {
        let mut b = board(SAMPLE);
        b.transpose();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(b.rows[r][c].value(), SAMPLE[c][r]);
            }
        }
    }

    #[test]
    fn test_empty_cells_row_major() {
        let b = board(SAMPLE);
        assert_eq!(b.empty_count(), 2);
        assert_eq!(b.empty_cells().as_slice(), &[(3, 0), (3, 2)]);
    }

    #[test]
    fn test_has_adjacent_pair() {
        assert!(!board(SAMPLE).has_adjacent_pair());
        // Vertical pair in column 1
        assert!(board([[2, 8, 2, 8], [8, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).has_adjacent_pair());
        // Empty cells never pair up
        assert!(!Board::new().has_adjacent_pair());
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let text = board(SAMPLE).to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().nth(3).unwrap().contains('.'));
        assert!(text.contains("4096"));
    }
}
