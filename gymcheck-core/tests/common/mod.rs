#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use gymcheck_core::env::{DType, Env, EnvError, Info, Sample, Space, Step};
use gymcheck_core::registry::{EnvFactory, Extension, RegistryError};
use rand::RngCore;

/// Every call a scripted factory or environment received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(Extension),
    Make(String),
    Reset(Option<u64>),
    Step,
    Close,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// How a scripted environment behaves.
#[derive(Debug, Clone)]
pub struct Script {
    pub observation_space: Space,
    pub action_space: Space,
    /// Report `terminated` on every n-th step after a reset.
    pub done_every: Option<usize>,
    /// Report `truncated` on every n-th step after a reset.
    pub truncate_every: Option<usize>,
    /// The action sampler raises instead of returning a value.
    pub broken_action_sampler: bool,
    /// Fail the n-th step (1-based, counted over the whole rollout).
    pub fail_on_step: Option<usize>,
}

impl Script {
    pub fn simple() -> Self {
        Self {
            observation_space: Space::bounded(vec![-1.0; 4], vec![1.0; 4]),
            action_space: Space::discrete(2),
            done_every: None,
            truncate_every: None,
            broken_action_sampler: false,
            fail_on_step: None,
        }
    }

    pub fn goal_conditioned() -> Self {
        Self {
            observation_space: Space::dict([
                ("achieved_goal", Space::uniform(f64::NEG_INFINITY, f64::INFINITY, vec![3], DType::Float)),
                ("desired_goal", Space::uniform(f64::NEG_INFINITY, f64::INFINITY, vec![3], DType::Float)),
                ("observation", Space::uniform(f64::NEG_INFINITY, f64::INFINITY, vec![10], DType::Float)),
            ]),
            action_space: Space::uniform(-1.0, 1.0, vec![4], DType::Float),
            done_every: None,
            truncate_every: None,
            broken_action_sampler: false,
            fail_on_step: None,
        }
    }

    pub fn done_every(mut self, n: usize) -> Self {
        self.done_every = Some(n);
        self
    }

    pub fn truncate_every(mut self, n: usize) -> Self {
        self.truncate_every = Some(n);
        self
    }

    pub fn broken_action_sampler(mut self) -> Self {
        self.broken_action_sampler = true;
        self
    }

    pub fn fail_on_step(mut self, n: usize) -> Self {
        self.fail_on_step = Some(n);
        self
    }
}

pub struct ScriptedEnv {
    script: Script,
    log: CallLog,
    since_reset: usize,
    total_steps: usize,
}

impl Env for ScriptedEnv {
    fn observation_space(&self) -> &Space {
        &self.script.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.script.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        self.log.borrow_mut().push(Call::Reset(seed));
        self.since_reset = 0;
        Ok((Sample::Discrete(0), Info::new()))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        self.log.borrow_mut().push(Call::Step);
        assert!(self.script.action_space.contains(action), "sampled action outside the space");
        self.since_reset += 1;
        self.total_steps += 1;
        if self.script.fail_on_step == Some(self.total_steps) {
            return Err(EnvError::Backend("physics exploded".to_string()));
        }
        let terminated = self.script.done_every.is_some_and(|n| self.since_reset % n == 0);
        let truncated = self.script.truncate_every.is_some_and(|n| self.since_reset % n == 0);
        Ok(Step::new(Sample::Discrete(0), 0.0, terminated, truncated))
    }

    fn sample_action(&mut self, rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        if self.script.broken_action_sampler {
            return Err(EnvError::Backend("action sampler is broken".to_string()));
        }
        Ok(self.script.action_space.sample(rng))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.log.borrow_mut().push(Call::Close);
        Ok(())
    }
}

/// Factory serving scripted environments and recording every call.
#[derive(Default)]
pub struct ScriptedFactory {
    pub log: CallLog,
    scripts: HashMap<String, Script>,
    available: HashSet<Extension>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, id: &str, script: Script) -> Self {
        self.scripts.insert(id.to_string(), script);
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.available.insert(extension);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.log.borrow().iter().filter(|c| *c == call).count()
    }
}

impl EnvFactory for ScriptedFactory {
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError> {
        self.log.borrow_mut().push(Call::Register(extension));
        if self.available.contains(&extension) {
            Ok(())
        } else {
            Err(RegistryError::ExtensionUnavailable(extension))
        }
    }

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError> {
        self.log.borrow_mut().push(Call::Make(id.to_string()));
        let script = self.scripts.get(id).cloned().ok_or_else(|| RegistryError::NotFound {
            id: id.to_string(),
            hint: None,
        })?;
        Ok(Box::new(ScriptedEnv {
            script,
            log: Rc::clone(&self.log),
            since_reset: 0,
            total_steps: 0,
        }))
    }
}

pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("report is utf-8")
}
