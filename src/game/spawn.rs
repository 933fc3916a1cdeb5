//! Random tile placement.

// The xorshift state is deliberately split into 32-bit halves
#![allow(clippy::cast_possible_truncation)]

use crate::game::Grid;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;

/// Out of this many spawns, all but one are a 2.
const FOUR_ONE_IN: u32 = 10;

/// A tile placed by the spawn step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spawn {
    /// Row of the new tile.
    pub row: usize,
    /// Column of the new tile.
    pub col: usize,
    /// Value of the new tile (2 or 4).
    pub value: u32,
}

/// Pick an empty cell and a value for the next tile.
///
/// The cell is drawn uniformly from the empty cells in row-major order,
/// then the value: 2 with probability 0.9, 4 with probability 0.1.
/// Returns `None` (and draws nothing) when the grid is full.
pub fn choose_spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Spawn> {
    let empty: Vec<(usize, usize)> = grid.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_range(0..FOUR_ONE_IN) == 0 { 4 } else { 2 };
    Some(Spawn { row, col, value })
}

/// Place a random 2 or 4 on an empty cell; a full grid is returned as-is.
#[must_use]
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Grid {
    match choose_spawn(&grid, rng) {
        Some(spawn) => grid.with_cell(spawn.row, spawn.col, spawn.value),
        None => grid,
    }
}

/// Deterministic xorshift64 generator.
///
/// Recordings store only a seed, so the stream has to be identical on every
/// platform and every version of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed. A zero seed is remapped (xorshift
    /// would stay at zero forever).
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
