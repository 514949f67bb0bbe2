//! Deterministic random number generation.
//!
//! A seeded PCG-XSH-RR generator lives in the world state, so identical
//! seeds replay identical battles. All probabilistic mechanics (dodge and
//! block rolls, proc chances, damage scatter, mind jitter) draw from it;
//! nothing in the core reads entropy from the host.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output permuted from 64-bit LCG state. Small, fast,
/// and statistically solid for game mechanics.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // One warm-up step decorrelates near-identical seeds.
        let mut rng = Self { state: seed };
        rng.next_u32();
        rng
    }

    /// Advance the LCG state and permute it into 32 random bits.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let state = self.state;

        // XSH-RR output permutation: xorshift high bits, then rotate by
        // the top five bits.
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Random value in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }

    /// Percentage roll: true with probability `percent` in [0, 100].
    ///
    /// A zero chance consumes no randomness, so combatants without dodge
    /// or block do not disturb the draw sequence.
    pub fn chance(&mut self, percent: u32) -> bool {
        if percent == 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.next_u32() % 100 < percent
    }

    /// Uniformly chosen element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u32() as usize) % items.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        let diverged = (0..10).any(|_| a.next_u32() != b.next_u32());
        assert!(diverged);
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut rng = PcgRng::new(9);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..1000 {
            let v = rng.range(3, 6);
            assert!((3..=6).contains(&v));
            seen_min |= v == 3;
            seen_max |= v == 6;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn zero_chance_never_rolls() {
        let mut rng = PcgRng::new(5);
        let before = rng;
        assert!(!rng.chance(0));
        // The draw sequence is untouched.
        assert_eq!(rng, before);
    }

    #[test]
    fn full_chance_always_passes() {
        let mut rng = PcgRng::new(5);
        assert!(rng.chance(100));
    }
}
