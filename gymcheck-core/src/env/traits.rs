use rand::RngCore;

use crate::env::errors::EnvError;
use crate::env::spaces::{Sample, Space};
use crate::env::types::{Info, Step};

/// Name of the sub-space sampled in goal-conditioned observation spaces.
pub const OBSERVATION_KEY: &str = "observation";

/// Samples the `observation` sub-space of a compound observation space, or
/// the space itself when it has no such sub-space.
pub fn sample_observation_space(space: &Space, rng: &mut dyn RngCore) -> Sample {
    match space.get(OBSERVATION_KEY) {
        Ok(sub) => sub.sample(rng),
        Err(_) => space.sample(rng),
    }
}

/// A simulated decision-making task.
///
/// Object safe so that factories can hand out `Box<dyn Env>` regardless of
/// whether the environment is native or lives in another runtime.
pub trait Env {
    fn observation_space(&self) -> &Space;
    fn action_space(&self) -> &Space;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError>;
    fn step(&mut self, action: &Sample) -> Result<Step, EnvError>;

    /// Draws one observation through the environment's own sampler, from
    /// the `observation` sub-space when there is one.
    fn sample_observation(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        Ok(sample_observation_space(self.observation_space(), rng))
    }

    /// Draws one action through the environment's own sampler.
    fn sample_action(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        Ok(self.action_space().sample(rng))
    }

    /// Releases resources held by the environment.
    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn observation_space(&self) -> &Space {
        (**self).observation_space()
    }

    fn action_space(&self) -> &Space {
        (**self).action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        (**self).reset(seed)
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        (**self).step(action)
    }

    fn sample_observation(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        (**self).sample_observation(rng)
    }

    fn sample_action(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        (**self).sample_action(rng)
    }

    fn close(&mut self) -> Result<(), EnvError> {
        (**self).close()
    }
}

/// Rejects `action` with [`EnvError::InvalidAction`] unless `space` contains it.
pub fn check_action(space: &Space, action: &Sample) -> Result<(), EnvError> {
    if space.contains(action) {
        Ok(())
    } else {
        Err(EnvError::InvalidAction {
            action: action.to_string(),
            space: space.to_string(),
        })
    }
}
