//! Seeded randomness for game setup.
//!
//! The rules themselves never roll dice; only `initialize` consumes
//! randomness (deck shuffles, the starting player, random disabled tiles).
//! Each of those draws from its own named stream, so adding a disabled
//! tile never changes how a deck is shuffled.
//!
//! Stream seeds are derived with `FxHasher`, which is fixed across
//! platforms and compiler versions: a seed recorded with a game replays
//! the same setup anywhere.
//!
//! ```
//! use tile_duel::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("deck:1");
//! let mut b = GameRng::new(42).for_context("deck:1");
//! let mut x = vec![1, 2, 3, 4, 5];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use std::hash::Hasher;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// ChaCha8 stream tagged with the seed it was built from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream named `context`, derived from this stream's seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::new(hasher.finish())
    }

    /// True with probability `probability`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// `count` distinct elements of `items` (all of them if fewer).
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        items.choose_multiple(&mut self.inner, count).cloned().collect()
    }
}
