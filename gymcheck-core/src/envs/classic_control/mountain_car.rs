use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const MIN_POSITION: f64 = -1.2;
const MAX_POSITION: f64 = 0.6;
const MAX_SPEED: f64 = 0.07;
const GOAL_POSITION: f64 = 0.5;
const GOAL_VELOCITY: f64 = 0.0;
const FORCE: f64 = 0.001;
const GRAVITY: f64 = 0.0025;

/// An underpowered car in a valley that must build momentum to reach the
/// flag on the right hill. Actions: 0 push left, 1 no push, 2 push right.
pub struct MountainCarEnv {
    observation_space: Space,
    action_space: Space,
    position: f64,
    velocity: f64,
    rng: StdRng,
}

impl Default for MountainCarEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MountainCarEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::bounded(vec![MIN_POSITION, -MAX_SPEED], vec![MAX_POSITION, MAX_SPEED]),
            action_space: Space::discrete(3),
            position: 0.0,
            velocity: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Sample {
        Sample::vector(vec![self.position, self.velocity])
    }
}

impl Env for MountainCarEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        self.position = self.rng.gen_range(-0.6..-0.4);
        self.velocity = 0.0;
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let push = action.as_discrete().unwrap_or(1) - 1;

        self.velocity += push as f64 * FORCE + (3.0 * self.position).cos() * -GRAVITY;
        self.velocity = self.velocity.clamp(-MAX_SPEED, MAX_SPEED);
        self.position = (self.position + self.velocity).clamp(MIN_POSITION, MAX_POSITION);
        if self.position == MIN_POSITION && self.velocity < 0.0 {
            self.velocity = 0.0;
        }

        let terminated = self.position >= GOAL_POSITION && self.velocity >= GOAL_VELOCITY;
        Ok(Step::new(self.observation(), -1.0, terminated, false))
    }
}
