use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

// Actions: 0 left, 1 down, 2 right, 3 up.
const MOVES: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Crossing a frozen lake from start (S) to goal (G) without falling into
/// holes (H). On slippery ice the agent moves in the intended direction or
/// either perpendicular one with equal probability.
pub struct FrozenLakeEnv {
    observation_space: Space,
    action_space: Space,
    desc: Vec<Vec<u8>>,
    slippery: bool,
    state: i64,
    rng: StdRng,
}

impl Default for FrozenLakeEnv {
    fn default() -> Self {
        Self::new(&MAP_4X4, true)
    }
}

impl FrozenLakeEnv {
    pub fn new(map: &[&str], slippery: bool) -> Self {
        let desc: Vec<Vec<u8>> = map.iter().map(|row| row.as_bytes().to_vec()).collect();
        let cells = desc.iter().map(Vec::len).sum::<usize>() as u64;
        Self {
            observation_space: Space::discrete(cells),
            action_space: Space::discrete(4),
            desc,
            slippery,
            state: 0,
            rng: StdRng::from_entropy(),
        }
    }

    fn ncol(&self) -> i64 {
        self.desc.first().map_or(0, Vec::len) as i64
    }

    fn nrow(&self) -> i64 {
        self.desc.len() as i64
    }

    fn tile(&self, state: i64) -> u8 {
        let ncol = self.ncol();
        self.desc[(state / ncol) as usize][(state % ncol) as usize]
    }

    fn start(&self) -> i64 {
        let ncol = self.ncol();
        self.desc
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.iter().position(|&c| c == b'S').map(|c| r as i64 * ncol + c as i64))
            .unwrap_or(0)
    }

    fn moved(&self, state: i64, action: usize) -> i64 {
        let ncol = self.ncol();
        let (dr, dc) = MOVES[action];
        let row = (state / ncol + dr).clamp(0, self.nrow() - 1);
        let col = (state % ncol + dc).clamp(0, ncol - 1);
        row * ncol + col
    }
}

impl Env for FrozenLakeEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        self.state = self.start();
        let mut info = Info::new();
        info.insert("prob".into(), 1.0.into());
        Ok((Sample::Discrete(self.state), info))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let intended = action.as_discrete().unwrap_or(0) as usize;
        let (direction, prob) = if self.slippery {
            let offset = self.rng.gen_range(0..3);
            ((intended + 3 + offset) % 4, 1.0 / 3.0)
        } else {
            (intended, 1.0)
        };

        self.state = self.moved(self.state, direction);
        let tile = self.tile(self.state);
        let terminated = tile == b'G' || tile == b'H';
        let reward = if tile == b'G' { 1.0 } else { 0.0 };

        let mut step = Step::new(Sample::Discrete(self.state), reward, terminated, false);
        step.info.insert("prob".into(), prob.into());
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_the_safe_path_reaches_the_goal() {
        let mut env = FrozenLakeEnv::new(&MAP_4X4, false);
        env.reset(None).unwrap();
        // down, down, right, right, down, right
        let mut last = None;
        for action in [1, 1, 2, 2, 1, 2] {
            last = Some(env.step(&Sample::Discrete(action)).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.observation, Sample::Discrete(15));
        assert_eq!(last.reward, 1.0);
        assert!(last.terminated);
    }

    #[test]
    fn falling_into_a_hole_terminates_without_reward() {
        let mut env = FrozenLakeEnv::new(&MAP_4X4, false);
        env.reset(None).unwrap();
        env.step(&Sample::Discrete(2)).unwrap();
        let step = env.step(&Sample::Discrete(1)).unwrap();
        assert_eq!(step.observation, Sample::Discrete(5));
        assert!(step.terminated);
        assert_eq!(step.reward, 0.0);
    }

    #[test]
    fn walls_keep_the_agent_on_the_map() {
        let mut env = FrozenLakeEnv::new(&MAP_4X4, false);
        env.reset(None).unwrap();
        assert_eq!(env.step(&Sample::Discrete(0)).unwrap().observation, Sample::Discrete(0));
        assert_eq!(env.step(&Sample::Discrete(3)).unwrap().observation, Sample::Discrete(0));
    }
}
