pub const DEFAULT_STEPS: usize = 10;

/// Parameters of a single environment check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Number of `step` calls in the rollout.
    pub steps: usize,
    /// Print construction and shape diagnostics.
    pub verbose: bool,
    /// Seeds space sampling and the first reset. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            verbose: false,
            seed: None,
        }
    }
}

impl CheckConfig {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
