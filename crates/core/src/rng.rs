//! RNG module - injectable randomness for tile spawning and random moves
//!
//! Every random draw the engine makes goes through [`TileRng`]:
//! - which empty cell receives a spawned tile
//! - whether that tile is a 2 or a 4
//! - which direction `random_move` commits
//!
//! Production play uses `rand`'s [`SmallRng`] (entropy-seeded or seeded for
//! replays). Tests use [`ScriptedRng`] to pin every draw.

use std::collections::VecDeque;

use rand::rngs::{SmallRng, StdRng};
use rand::Rng;

/// Source of the engine's random decisions
pub trait TileRng {
    /// Uniform index in `[0, len)`. `len` is always > 0.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool;
}

impl TileRng for SmallRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen::<f64>() < p
    }
}

impl TileRng for StdRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen::<f64>() < p
    }
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

/// Deterministic source that replays scripted draws.
///
/// Index draws are reduced modulo `len`. Once a script runs dry the source
/// falls back to index 0 and "true" for every chance roll, so an unscripted
/// spawn is always a 2 in the first empty cell.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    indices: VecDeque<usize>,
    chances: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the index draws, consumed front to back
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Script the chance rolls, consumed front to back
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Number of scripted index draws not yet consumed
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }
}

impl TileRng for ScriptedRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SmallRng::seed_from_u64(12345);
        let mut rng2 = SmallRng::seed_from_u64(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.pick_index(16), rng2.pick_index(16));
        }
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 1..=16 {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    fn test_scripted_replays_then_defaults() {
        let mut rng = ScriptedRng::new()
            .with_indices([3, 9])
            .with_chances([false]);

        assert_eq!(rng.pick_index(4), 3);
        // Reduced modulo len
        assert_eq!(rng.pick_index(4), 1);
        assert_eq!(rng.remaining_indices(), 0);
        assert_eq!(rng.pick_index(4), 0);

        assert!(!rng.chance(0.9));
        assert!(rng.chance(0.9));
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut scripted = ScriptedRng::new().with_indices([2]);
        {
            let mut by_ref = &mut scripted;
            assert_eq!(TileRng::pick_index(&mut by_ref, 3), 2);
        }
        assert_eq!(scripted.remaining_indices(), 0);
    }
}
