//! Seedable randomness for rounds.
//!
//! All color draws go through a [`ChaCha8Rng`]; only the seed depends on the
//! environment, so any session can be replayed from its seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type GameRng = ChaCha8Rng;

/// Deterministic RNG for tests and replays.
pub fn seeded(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// RNG seeded from browser crypto.
#[cfg(feature = "rng")]
pub fn from_entropy() -> GameRng {
    let mut seed = [0u8; 32];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => ChaCha8Rng::from_seed(seed),
        Err(_) => seeded(clock_seed()),
    }
}

/// RNG seeded from the page clock (no `rng` feature).
#[cfg(not(feature = "rng"))]
pub fn from_entropy() -> GameRng {
    seeded(clock_seed())
}

// Not random in any strong sense; good enough to vary rounds between page loads.
fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    now.to_bits().wrapping_mul(1664525).wrapping_add(1013904223)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = seeded(1234);
        let mut b = seeded(1234);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }
}
