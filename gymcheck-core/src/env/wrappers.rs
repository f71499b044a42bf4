use rand::RngCore;

use crate::env::errors::EnvError;
use crate::env::spaces::{Sample, Space};
use crate::env::traits::Env;
use crate::env::types::{Info, Step};

/// Truncates episodes after a fixed number of steps.
pub struct TimeLimit<E> {
    inner: E,
    max_episode_steps: u32,
    elapsed: u32,
}

impl<E: Env> TimeLimit<E> {
    pub fn new(inner: E, max_episode_steps: u32) -> Self {
        Self {
            inner,
            max_episode_steps,
            elapsed: 0,
        }
    }
}

impl<E: Env> Env for TimeLimit<E> {
    fn observation_space(&self) -> &Space {
        self.inner.observation_space()
    }

    fn action_space(&self) -> &Space {
        self.inner.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        self.elapsed = 0;
        self.inner.reset(seed)
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        let mut step = self.inner.step(action)?;
        self.elapsed += 1;
        if self.elapsed >= self.max_episode_steps {
            step.truncated = true;
        }
        Ok(step)
    }

    fn sample_observation(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        self.inner.sample_observation(rng)
    }

    fn sample_action(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        self.inner.sample_action(rng)
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.inner.close()
    }
}

/// Enforces `reset` before `step`, and nothing after `close`.
pub struct OrderEnforcing<E> {
    inner: E,
    has_reset: bool,
    closed: bool,
}

impl<E: Env> OrderEnforcing<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            has_reset: false,
            closed: false,
        }
    }
}

impl<E: Env> Env for OrderEnforcing<E> {
    fn observation_space(&self) -> &Space {
        self.inner.observation_space()
    }

    fn action_space(&self) -> &Space {
        self.inner.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        let reset = self.inner.reset(seed)?;
        self.has_reset = true;
        Ok(reset)
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        if !self.has_reset {
            return Err(EnvError::ResetNeeded);
        }
        self.inner.step(action)
    }

    fn sample_observation(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        self.inner.sample_observation(rng)
    }

    fn sample_action(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        self.inner.sample_action(rng)
    }

    fn close(&mut self) -> Result<(), EnvError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        obs: Space,
        act: Space,
        state: i64,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                obs: Space::discrete(100),
                act: Space::discrete(2),
                state: 0,
            }
        }
    }

    impl Env for Counter {
        fn observation_space(&self) -> &Space {
            &self.obs
        }

        fn action_space(&self) -> &Space {
            &self.act
        }

        fn reset(&mut self, _seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
            self.state = 0;
            Ok((Sample::Discrete(0), Info::new()))
        }

        fn step(&mut self, _action: &Sample) -> Result<Step, EnvError> {
            self.state += 1;
            Ok(Step::new(Sample::Discrete(self.state), 1.0, false, false))
        }
    }

    #[test]
    fn time_limit_truncates_and_resets_its_counter() {
        let mut env = TimeLimit::new(Counter::new(), 3);
        env.reset(None).unwrap();
        assert!(!env.step(&Sample::Discrete(0)).unwrap().truncated);
        assert!(!env.step(&Sample::Discrete(0)).unwrap().truncated);
        assert!(env.step(&Sample::Discrete(0)).unwrap().truncated);

        env.reset(None).unwrap();
        assert!(!env.step(&Sample::Discrete(0)).unwrap().truncated);
    }

    #[test]
    fn order_enforcing_requires_reset_before_step() {
        let mut env = OrderEnforcing::new(Counter::new());
        assert!(matches!(
            env.step(&Sample::Discrete(0)),
            Err(EnvError::ResetNeeded)
        ));
        env.reset(None).unwrap();
        assert_eq!(env.step(&Sample::Discrete(1)).unwrap().observation, Sample::Discrete(1));
    }

    #[test]
    fn order_enforcing_rejects_use_after_close() {
        let mut env = OrderEnforcing::new(Counter::new());
        env.reset(None).unwrap();
        env.close().unwrap();
        env.close().unwrap();
        assert!(matches!(env.step(&Sample::Discrete(0)), Err(EnvError::Closed)));
        assert!(matches!(env.reset(None), Err(EnvError::Closed)));
    }
}
