//! Pure-Rust ports of the Gymnasium environments that need no simulator.

pub mod classic_control;
pub mod toy_text;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use classic_control::{AcrobotEnv, CartPoleEnv, MountainCarContinuousEnv, MountainCarEnv, PendulumEnv};
pub use toy_text::{BlackjackEnv, CliffWalkingEnv, FrozenLakeEnv, TaxiEnv};

/// Replaces `rng` with a freshly seeded generator when a seed is given.
pub(crate) fn reseed(rng: &mut StdRng, seed: Option<u64>) {
    if let Some(seed) = seed {
        *rng = StdRng::seed_from_u64(seed);
    }
}
