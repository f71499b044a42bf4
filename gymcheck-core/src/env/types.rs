use serde::Serialize;

use crate::env::spaces::Sample;

/// Auxiliary diagnostic data returned by `reset` and `step`.
pub type Info = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub observation: Sample,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

impl Step {
    pub fn new(observation: Sample, reward: f64, terminated: bool, truncated: bool) -> Self {
        Self {
            observation,
            reward,
            terminated,
            truncated,
            info: Info::new(),
        }
    }

    /// The episode is over and the environment must be reset.
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
