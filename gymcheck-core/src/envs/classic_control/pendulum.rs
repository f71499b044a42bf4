use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const MAX_SPEED: f64 = 8.0;
const MAX_TORQUE: f64 = 2.0;
const DT: f64 = 0.05;
const G: f64 = 10.0;
const M: f64 = 1.0;
const L: f64 = 1.0;

/// Inverted pendulum swing-up. Never terminates; episodes end by time limit.
pub struct PendulumEnv {
    observation_space: Space,
    action_space: Space,
    theta: f64,
    theta_dot: f64,
    rng: StdRng,
}

impl Default for PendulumEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl PendulumEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::bounded(vec![-1.0, -1.0, -MAX_SPEED], vec![1.0, 1.0, MAX_SPEED]),
            action_space: Space::bounded(vec![-MAX_TORQUE], vec![MAX_TORQUE]),
            theta: 0.0,
            theta_dot: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Sample {
        Sample::vector(vec![self.theta.cos(), self.theta.sin(), self.theta_dot])
    }
}

fn angle_normalize(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

impl Env for PendulumEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        self.theta = self.rng.gen_range(-PI..PI);
        self.theta_dot = self.rng.gen_range(-1.0..1.0);
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let u = action.as_array().map_or(0.0, |a| a[0]).clamp(-MAX_TORQUE, MAX_TORQUE);
        let (th, thdot) = (self.theta, self.theta_dot);

        let cost = angle_normalize(th).powi(2) + 0.1 * thdot.powi(2) + 0.001 * u.powi(2);

        let new_thdot = (thdot + (3.0 * G / (2.0 * L) * th.sin() + 3.0 / (M * L * L) * u) * DT)
            .clamp(-MAX_SPEED, MAX_SPEED);
        self.theta = th + new_thdot * DT;
        self.theta_dot = new_thdot;

        Ok(Step::new(self.observation(), -cost, false, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_and_still_costs_nothing() {
        let mut env = PendulumEnv::new();
        env.reset(Some(0)).unwrap();
        env.theta = 0.0;
        env.theta_dot = 0.0;
        let step = env.step(&Sample::vector(vec![0.0])).unwrap();
        assert_eq!(step.reward, 0.0);
        assert!(!step.terminated);
    }

    #[test]
    fn angle_normalize_wraps_into_pi_range() {
        assert!((angle_normalize(3.0 * PI) - -PI).abs() < 1e-9);
        assert!((angle_normalize(0.5) - 0.5).abs() < 1e-12);
        assert!((angle_normalize(-0.5 - 2.0 * PI) - -0.5).abs() < 1e-9);
    }
}
