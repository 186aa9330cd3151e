//! Injectable randomness.
//!
//! Every random decision in the engine (archetype roll, stat variance,
//! heat gain, self-harm and critical rolls, opponent level) is drawn from a
//! [`RandomSource`]. Two implementations are provided:
//!
//! - [`GameRng`]: seeded ChaCha8 stream, forkable and checkpointable.
//! - [`ScriptedRng`]: replays a fixed list of unit values so tests can
//!   force exact outcomes.
//!
//! ## Usage
//!
//! ```
//! use rust_gacha::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for a battle branch
//! let mut battle_rng = rng.fork();
//!
//! // Forks are deterministic - same fork counter = same sequence
//! let mut rng2 = GameRng::new(42);
//! let mut battle_rng2 = rng2.fork();
//! assert_eq!(battle_rng.next_unit(), battle_rng2.next_unit());
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Source of every random decision the engine makes.
///
/// Implementors supply uniform unit values and fresh card identities.
/// The helper methods each consume exactly one unit value, which keeps
/// scripted sequences easy to line up with the decisions they drive.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Next fresh card identity.
    fn next_card_id(&mut self) -> CardId;

    /// Bernoulli trial: true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform float in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Uniform integer in `lo..=hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = f64::from(hi - lo) + 1.0;
        let offset = (self.next_unit() * span) as u32;
        (lo + offset).min(hi)
    }
}

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// Card ids are drawn from the same stream, so a seed fixes them too.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    /// Battles run on a fork so an abandoned battle leaves no trace in
    /// the parent stream beyond the fork counter.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_card_id(&mut self) -> CardId {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        CardId::from_random_bytes(bytes)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Replays a fixed sequence of unit values.
///
/// Values are clamped into `[0, 1)` and cycle once exhausted. Card ids
/// come from a counter starting at 2^64 and never consume script values.
///
/// ```
/// use rust_gacha::core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new([0.0, 0.99]);
/// assert!(rng.chance(0.5));
/// assert!(!rng.chance(0.5));
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
    next_id: u128,
}

impl ScriptedRng {
    /// Create a scripted source. An empty script behaves as all zeros.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            values,
            cursor: 0,
            next_id: 1 << 64,
        }
    }

    /// Number of unit values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn next_card_id(&mut self) -> CardId {
        let id = CardId::from_u128(self.next_id);
        self.next_id += 1;
        id
    }
}
