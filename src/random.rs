use rand::{Rng, SeedableRng, distributions::Uniform, rngs::StdRng};

/// Source of the secret number for a round.
///
/// `pick` must return a value in the inclusive range `[low, high]`; callers
/// guarantee `low <= high`.
pub trait RandomSource: Send {
    fn pick(&mut self, low: i64, high: i64) -> i64;
}

/// Return a random integer in the inclusive range [min, max].
pub fn rand_in_range(min: i64, max: i64) -> i64 {
    let mut rng = rand::thread_rng();
    let distr = Uniform::new_inclusive(min, max);
    rng.sample(distr)
}

/// Uses the thread-local RNG on every draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, low: i64, high: i64) -> i64 {
        rand_in_range(low, high)
    }
}

/// Reproducible draws from a fixed seed (`GAME_SEED`).
#[derive(Clone, Debug)]
pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, low: i64, high: i64) -> i64 {
        self.inner.sample(Uniform::new_inclusive(low, high))
    }
}

/// Always draws the same number, clamped into the requested range.
/// Useful wherever a round needs a known secret.
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(pub i64);

impl RandomSource for FixedRandom {
    fn pick(&mut self, low: i64, high: i64) -> i64 {
        self.0.clamp(low, high)
    }
}
