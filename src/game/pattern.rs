// Target pattern generation.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of digits in the target pattern for a level.
pub fn pattern_len(level: u32) -> usize {
    if level == 1 { 2 } else { 3 }
}

/// Draws random target patterns. Owns its RNG so a session seeded with a fixed
/// value replays the same sequence of targets.
#[derive(Clone, Debug)]
pub struct PatternGenerator {
    rng: StdRng,
}

impl PatternGenerator {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    pub fn generate(&mut self, level: u32) -> Vec<u8> {
        (0..pattern_len(level)).map(|_| self.rng.gen_range(0..=9)).collect()
    }
}
