use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};

const NROW: i64 = 4;
const NCOL: i64 = 12;
const START: i64 = 3 * NCOL;
const GOAL: i64 = 3 * NCOL + NCOL - 1;

// Actions: 0 up, 1 right, 2 down, 3 left.
const MOVES: [(i64, i64); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Gridworld along the edge of a cliff. Stepping off the cliff costs 100
/// and sends the agent back to the start; reaching the goal terminates.
pub struct CliffWalkingEnv {
    observation_space: Space,
    action_space: Space,
    state: i64,
}

impl Default for CliffWalkingEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl CliffWalkingEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::discrete((NROW * NCOL) as u64),
            action_space: Space::discrete(4),
            state: START,
        }
    }
}

fn is_cliff(state: i64) -> bool {
    state / NCOL == NROW - 1 && (1..NCOL - 1).contains(&(state % NCOL))
}

impl Env for CliffWalkingEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, _seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        self.state = START;
        Ok((Sample::Discrete(self.state), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let (dr, dc) = MOVES[action.as_discrete().unwrap_or(0) as usize];
        let row = (self.state / NCOL + dr).clamp(0, NROW - 1);
        let col = (self.state % NCOL + dc).clamp(0, NCOL - 1);
        let next = row * NCOL + col;

        if is_cliff(next) {
            self.state = START;
            return Ok(Step::new(Sample::Discrete(self.state), -100.0, false, false));
        }
        self.state = next;
        Ok(Step::new(Sample::Discrete(self.state), -1.0, next == GOAL, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_off_the_cliff_returns_to_start() {
        let mut env = CliffWalkingEnv::new();
        env.reset(None).unwrap();
        let step = env.step(&Sample::Discrete(1)).unwrap();
        assert_eq!(step.observation, Sample::Discrete(START));
        assert_eq!(step.reward, -100.0);
        assert!(!step.terminated);
    }

    #[test]
    fn going_around_the_cliff_reaches_the_goal() {
        let mut env = CliffWalkingEnv::new();
        env.reset(None).unwrap();
        env.step(&Sample::Discrete(0)).unwrap();
        for _ in 0..11 {
            env.step(&Sample::Discrete(1)).unwrap();
        }
        let step = env.step(&Sample::Discrete(2)).unwrap();
        assert_eq!(step.observation, Sample::Discrete(GOAL));
        assert!(step.terminated);
    }
}
