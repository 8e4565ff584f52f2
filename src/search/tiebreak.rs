use crate::board::Move;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How the root picks among equally scored moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TieBreak {
    /// First move in search order. Reproducible.
    #[default]
    Canonical,
    /// Uniform among the tied moves, from a seeded generator.
    Random { seed: u64 },
}

impl TieBreak {
    pub fn rng(self) -> Option<SmallRng> {
        match self {
            TieBreak::Canonical => None,
            TieBreak::Random { seed } => Some(SmallRng::seed_from_u64(seed)),
        }
    }
}

/// Picks one of `tied`. Without a generator the first move wins.
pub fn choose_tied(tied: &[Move], rng: Option<&mut SmallRng>) -> Option<Move> {
    if tied.is_empty() { return None; }
    match rng {
        Some(rng) if tied.len() > 1 => Some(tied[rng.gen_range(0..tied.len())]),
        _ => Some(tied[0]),
    }
}
