use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

const MAP: [&str; 7] = [
    "+---------+",
    "|R: | : :G|",
    "| : | : : |",
    "| : : : : |",
    "| | : | : |",
    "|Y| : |B: |",
    "+---------+",
];

// Pick-up/drop-off locations: R, G, Y, B.
const LOCS: [(usize, usize); 4] = [(0, 0), (0, 4), (4, 0), (4, 3)];
const SIZE: usize = 5;
const IN_TAXI: usize = 4;

/// Drive a taxi around a 5x5 grid, pick up a passenger at one of four
/// locations and drop them off at another.
///
/// Actions: 0 south, 1 north, 2 east, 3 west, 4 pickup, 5 drop off.
/// State encodes (row, col, passenger location, destination) in 500 values.
pub struct TaxiEnv {
    observation_space: Space,
    action_space: Space,
    row: usize,
    col: usize,
    passenger: usize,
    destination: usize,
    rng: StdRng,
}

impl Default for TaxiEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxiEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::discrete(500),
            action_space: Space::discrete(6),
            row: 0,
            col: 0,
            passenger: 0,
            destination: 1,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn encode(row: usize, col: usize, passenger: usize, destination: usize) -> i64 {
        (((row * SIZE + col) * 5 + passenger) * 4 + destination) as i64
    }

    fn observation(&self) -> Sample {
        Sample::Discrete(Self::encode(self.row, self.col, self.passenger, self.destination))
    }

    fn wall(&self, offset: usize) -> bool {
        MAP[1 + self.row].as_bytes()[2 * self.col + offset] == b'|'
    }
}

impl Env for TaxiEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        self.row = self.rng.gen_range(0..SIZE);
        self.col = self.rng.gen_range(0..SIZE);
        self.passenger = self.rng.gen_range(0..LOCS.len());
        // destination differs from the passenger's starting location
        self.destination = (self.passenger + self.rng.gen_range(1..LOCS.len())) % LOCS.len();
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let taxi = (self.row, self.col);
        let mut reward = -1.0;
        let mut terminated = false;

        match action.as_discrete().unwrap_or(0) {
            0 => self.row = (self.row + 1).min(SIZE - 1),
            1 => self.row = self.row.saturating_sub(1),
            2 if !self.wall(2) => self.col = (self.col + 1).min(SIZE - 1),
            3 if !self.wall(0) => self.col = self.col.saturating_sub(1),
            4 => {
                if self.passenger < IN_TAXI && taxi == LOCS[self.passenger] {
                    self.passenger = IN_TAXI;
                } else {
                    reward = -10.0;
                }
            }
            5 => {
                if taxi == LOCS[self.destination] && self.passenger == IN_TAXI {
                    self.passenger = self.destination;
                    terminated = true;
                    reward = 20.0;
                } else if let Some(loc) = LOCS.iter().position(|&l| l == taxi).filter(|_| self.passenger == IN_TAXI) {
                    self.passenger = loc;
                } else {
                    reward = -10.0;
                }
            }
            _ => {}
        }

        Ok(Step::new(self.observation(), reward, terminated, false))
    }
}
