//! Randomness seam for combat rolls.
//!
//! The pipeline only ever asks for a unit float (dodge, crit, parry, resist,
//! turn skip) or an inclusive integer draw (base damage). Any [`rand::Rng`]
//! works; tests pass a seeded `ChaCha8Rng` so every roll is reproducible.

use rand::Rng;

/// Source of combat rolls.
pub trait CombatRng {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]` inclusive.
    ///
    /// A degenerate range (`lo >= hi`) returns `lo` without drawing.
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32;

    /// True with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

impl<R: Rng> CombatRng for R {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.gen_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn unit_draws_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn range_covers_both_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let draws: Vec<i32> = (0..500).map(|_| rng.range_inclusive(2, 3)).collect();
        assert!(draws.contains(&2));
        assert!(draws.contains(&3));
        assert!(draws.iter().all(|d| (2..=3).contains(d)));
    }

    proptest! {
        #[test]
        fn fixed_range_is_exact(n in -50i32..500, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            prop_assert_eq!(rng.range_inclusive(n, n), n);
        }
    }
}
