use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const MIN_ACTION: f64 = -1.0;
const MAX_ACTION: f64 = 1.0;
const MIN_POSITION: f64 = -1.2;
const MAX_POSITION: f64 = 0.6;
const MAX_SPEED: f64 = 0.07;
const GOAL_POSITION: f64 = 0.45;
const GOAL_VELOCITY: f64 = 0.0;
const POWER: f64 = 0.0015;

/// Mountain car with a continuous engine force in `[-1, 1]`.
pub struct MountainCarContinuousEnv {
    observation_space: Space,
    action_space: Space,
    position: f64,
    velocity: f64,
    rng: StdRng,
}

impl Default for MountainCarContinuousEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MountainCarContinuousEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::bounded(vec![MIN_POSITION, -MAX_SPEED], vec![MAX_POSITION, MAX_SPEED]),
            action_space: Space::bounded(vec![MIN_ACTION], vec![MAX_ACTION]),
            position: 0.0,
            velocity: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Sample {
        Sample::vector(vec![self.position, self.velocity])
    }
}

impl Env for MountainCarContinuousEnv {
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
        let push = action.as_array().map_or(0.0, |a| a[0]);
        let force = push.clamp(MIN_ACTION, MAX_ACTION);

        self.velocity += force * POWER - 0.0025 * (3.0 * self.position).cos();
        self.velocity = self.velocity.clamp(-MAX_SPEED, MAX_SPEED);
        self.position = (self.position + self.velocity).clamp(MIN_POSITION, MAX_POSITION);
        if self.position == MIN_POSITION && self.velocity < 0.0 {
            self.velocity = 0.0;
        }

        let terminated = self.position >= GOAL_POSITION && self.velocity >= GOAL_VELOCITY;
        let mut reward = if terminated { 100.0 } else { 0.0 };
        reward -= push * push * 0.1;
        Ok(Step::new(self.observation(), reward, terminated, false))
    }
}
