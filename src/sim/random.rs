use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every random decision the simulation makes goes through this trait.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
    fn chance(&mut self, probability: f64) -> bool;
}

#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper.max(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Deterministic source for tests: replays `picks` cyclically and answers
/// every `chance` roll with `outcome`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
    outcome: bool,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>, outcome: bool) -> Self {
        Self {
            picks,
            cursor: 0,
            outcome,
        }
    }

    /// Always picks index 0 and never rolls a success.
    pub fn quiet() -> Self {
        Self::new(Vec::new(), false)
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, upper: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        value % upper.max(1)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.outcome
    }
}
