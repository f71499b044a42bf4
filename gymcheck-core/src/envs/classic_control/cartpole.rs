use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
// half the pole's length
const LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * LENGTH;
const FORCE_MAG: f64 = 10.0;
const TAU: f64 = 0.02;
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * std::f64::consts::PI / 360.0;
const X_THRESHOLD: f64 = 2.4;

/// A pole balanced on a cart moving along a frictionless track.
pub struct CartPoleEnv {
    observation_space: Space,
    action_space: Space,
    state: [f64; 4],
    steps_beyond_terminated: Option<u32>,
    rng: StdRng,
}

impl Default for CartPoleEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl CartPoleEnv {
    pub fn new() -> Self {
        let high = vec![X_THRESHOLD * 2.0, f64::INFINITY, THETA_THRESHOLD * 2.0, f64::INFINITY];
        let low = high.iter().map(|h| -h).collect();
        Self {
            observation_space: Space::bounded(low, high),
            action_space: Space::discrete(2),
            state: [0.0; 4],
            steps_beyond_terminated: None,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Sample {
        Sample::vector(self.state.to_vec())
    }
}

impl Env for CartPoleEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        for v in &mut self.state {
            *v = self.rng.gen_range(-0.05..0.05);
        }
        self.steps_beyond_terminated = None;
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let [x, x_dot, theta, theta_dot] = self.state;
        let force = if action.as_discrete() == Some(1) { FORCE_MAG } else { -FORCE_MAG };
        let (sin_theta, cos_theta) = theta.sin_cos();

        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        // euler integration
        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];

        let [x, _, theta, _] = self.state;
        let terminated = !(-X_THRESHOLD..=X_THRESHOLD).contains(&x)
            || !(-THETA_THRESHOLD..=THETA_THRESHOLD).contains(&theta);

        let reward = match (terminated, self.steps_beyond_terminated) {
            (false, _) => 1.0,
            (true, None) => {
                self.steps_beyond_terminated = Some(0);
                1.0
            }
            (true, Some(n)) => {
                if n == 0 {
                    warn!("step called after the episode terminated; call reset first");
                }
                self.steps_beyond_terminated = Some(n + 1);
                0.0
            }
        };

        Ok(Step::new(self.observation(), reward, terminated, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushing_one_way_eventually_terminates() {
        let mut env = CartPoleEnv::new();
        env.reset(Some(0)).unwrap();
        let mut total = 0.0;
        let mut terminated = false;
        for _ in 0..200 {
            let step = env.step(&Sample::Discrete(1)).unwrap();
            total += step.reward;
            if step.terminated {
                terminated = true;
                break;
            }
        }
        assert!(terminated);
        assert!(total >= 1.0);
    }

    #[test]
    fn reset_is_reproducible_with_a_seed() {
        let mut a = CartPoleEnv::new();
        let mut b = CartPoleEnv::new();
        assert_eq!(a.reset(Some(42)).unwrap().0, b.reset(Some(42)).unwrap().0);
    }

    #[test]
    fn rejects_actions_outside_the_space() {
        let mut env = CartPoleEnv::new();
        env.reset(Some(0)).unwrap();
        assert!(matches!(
            env.step(&Sample::Discrete(2)),
            Err(EnvError::InvalidAction { .. })
        ));
    }
}
