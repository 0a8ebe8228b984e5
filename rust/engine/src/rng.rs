//! Injectable randomness for dealing.
//!
//! The engine never reaches for a global generator: every random draw goes
//! through a [`RandomSource`] handed in by the caller. Any [`rand::Rng`]
//! qualifies, so a seeded [`ChaCha20Rng`] gives reproducible runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Uniform integer generation over `[0, n)`.
pub trait RandomSource {
    /// Returns a uniformly distributed index below `n`. `n` must be non-zero.
    fn next_below(&mut self, n: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_below(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

/// Stream for one batch: the shared seed with the batch index as ChaCha stream id.
pub fn batch_rng(seed: u64, batch: usize) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(batch as u64);
    rng
}
