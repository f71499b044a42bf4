use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Env, EnvError, Info, Sample, Space, Step, check_action};
use crate::envs::reseed;

// 1 = Ace, 2-10 = number cards, Jack/Queen/King = 10.
const DECK: [u32; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// Blackjack against a dealer who hits until reaching 17, drawing from an
/// infinite deck. Observation: (player sum, dealer showing card, usable ace).
/// Actions: 0 stick, 1 hit.
pub struct BlackjackEnv {
    observation_space: Space,
    action_space: Space,
    player: Vec<u32>,
    dealer: Vec<u32>,
    rng: StdRng,
}

impl Default for BlackjackEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn usable_ace(hand: &[u32]) -> bool {
    hand.contains(&1) && hand.iter().sum::<u32>() + 10 <= 21
}

fn sum_hand(hand: &[u32]) -> u32 {
    let sum = hand.iter().sum::<u32>();
    if usable_ace(hand) { sum + 10 } else { sum }
}

fn is_bust(hand: &[u32]) -> bool {
    sum_hand(hand) > 21
}

fn score(hand: &[u32]) -> u32 {
    if is_bust(hand) { 0 } else { sum_hand(hand) }
}

impl BlackjackEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::tuple(vec![Space::discrete(32), Space::discrete(11), Space::discrete(2)]),
            action_space: Space::discrete(2),
            player: Vec::new(),
            dealer: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    fn draw_card(&mut self) -> u32 {
        DECK[self.rng.gen_range(0..DECK.len())]
    }

    fn observation(&self) -> Sample {
        Sample::Tuple(vec![
            Sample::Discrete(sum_hand(&self.player) as i64),
            Sample::Discrete(self.dealer.first().copied().unwrap_or(0) as i64),
            Sample::Discrete(usable_ace(&self.player) as i64),
        ])
    }
}

impl Env for BlackjackEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        reseed(&mut self.rng, seed);
        self.dealer = vec![self.draw_card(), self.draw_card()];
        self.player = vec![self.draw_card(), self.draw_card()];
        Ok((self.observation(), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        check_action(&self.action_space, action)?;
        let (terminated, reward) = if action.as_discrete() == Some(1) {
            let card = self.draw_card();
            self.player.push(card);
            if is_bust(&self.player) { (true, -1.0) } else { (false, 0.0) }
        } else {
            while sum_hand(&self.dealer) < 17 {
                let card = self.draw_card();
                self.dealer.push(card);
            }
            let reward = match score(&self.player).cmp(&score(&self.dealer)) {
                Ordering::Greater => 1.0,
                Ordering::Equal => 0.0,
                Ordering::Less => -1.0,
            };
            (true, reward)
        };
        Ok(Step::new(self.observation(), reward, terminated, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aces_count_high_only_when_it_does_not_bust() {
        assert_eq!(sum_hand(&[1, 6]), 17);
        assert_eq!(sum_hand(&[1, 6, 10]), 17);
        assert_eq!(sum_hand(&[1, 1]), 12);
        assert!(is_bust(&[10, 10, 5]));
        assert_eq!(score(&[10, 10, 5]), 0);
    }

    #[test]
    fn sticking_ends_the_hand() {
        let mut env = BlackjackEnv::new();
        let (obs, _) = env.reset(Some(11)).unwrap();
        assert!(env.observation_space().contains(&obs));
        let step = env.step(&Sample::Discrete(0)).unwrap();
        assert!(step.terminated);
        assert!([-1.0, 0.0, 1.0].contains(&step.reward));
        assert!(sum_hand(&env.dealer) >= 17);
    }
}
