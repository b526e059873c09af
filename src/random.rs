use rand::RngExt;
use rand::rngs::SmallRng;

/// Uniform integer draws, injectable so the ad decision, clip pick, skip
/// delay and load-time shuffle are deterministic under test.
pub trait RandomSource {
    /// Uniform draw in `[0, bound)`. `bound` must be non-zero.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Production source seeded from the operating system.
pub struct OsRandom {
    rng: SmallRng,
}

impl OsRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::make_rng(),
        }
    }
}

impl Default for OsRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandom {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_stays_in_range() {
        let mut rng = OsRandom::new();
        for bound in 1..64 {
            assert!(rng.pick(bound) < bound);
        }
    }
}
