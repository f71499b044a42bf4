use std::collections::BTreeMap;

use tracing::debug;

use crate::env::{Env, OrderEnforcing, TimeLimit};
use crate::envs::{
    AcrobotEnv, BlackjackEnv, CartPoleEnv, CliffWalkingEnv, FrozenLakeEnv, MountainCarContinuousEnv,
    MountainCarEnv, PendulumEnv, TaxiEnv,
};
use crate::registry::errors::RegistryError;
use crate::registry::extension::Extension;
use crate::registry::id::EnvId;
use crate::registry::traits::EnvFactory;

pub type EntryPoint = fn() -> Box<dyn Env>;

/// How to build one registered environment.
#[derive(Debug, Clone)]
pub struct EnvSpec {
    pub id: &'static str,
    pub max_episode_steps: Option<u32>,
    pub entry_point: EntryPoint,
}

impl EnvSpec {
    pub const fn new(id: &'static str, max_episode_steps: Option<u32>, entry_point: EntryPoint) -> Self {
        Self {
            id,
            max_episode_steps,
            entry_point,
        }
    }
}

/// Factory for environments implemented in this crate.
///
/// Neither optional extension has a native implementation, so
/// `register_extension` always fails.
#[derive(Debug, Clone, Default)]
pub struct NativeRegistry {
    specs: BTreeMap<&'static str, EnvSpec>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every native classic-control and toy-text environment.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for spec in [
            EnvSpec::new("CartPole-v1", Some(500), || Box::new(CartPoleEnv::new())),
            EnvSpec::new("MountainCar-v0", Some(200), || Box::new(MountainCarEnv::new())),
            EnvSpec::new("MountainCarContinuous-v0", Some(999), || {
                Box::new(MountainCarContinuousEnv::new())
            }),
            EnvSpec::new("Pendulum-v1", Some(200), || Box::new(PendulumEnv::new())),
            EnvSpec::new("Acrobot-v1", Some(500), || Box::new(AcrobotEnv::new())),
            EnvSpec::new("Blackjack-v1", None, || Box::new(BlackjackEnv::new())),
            EnvSpec::new("Taxi-v3", Some(200), || Box::new(TaxiEnv::new())),
            EnvSpec::new("CliffWalking-v0", None, || Box::new(CliffWalkingEnv::new())),
            EnvSpec::new("FrozenLake-v1", Some(100), || Box::new(FrozenLakeEnv::default())),
        ] {
            registry.register(spec);
        }
        registry
    }

    /// Adds or replaces a spec.
    pub fn register(&mut self, spec: EnvSpec) {
        self.specs.insert(spec.id, spec);
    }

    pub fn spec(&self, id: &str) -> Option<&EnvSpec> {
        self.specs.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    fn not_found(&self, id: &str) -> RegistryError {
        let wanted = EnvId::parse(id);
        let versions: Vec<&str> = self
            .ids()
            .filter(|other| EnvId::parse(other).same_family(&wanted))
            .collect();
        let hint = (!versions.is_empty()).then(|| format!("registered versions: {}", versions.join(", ")));
        RegistryError::NotFound {
            id: id.to_string(),
            hint,
        }
    }
}

impl EnvFactory for NativeRegistry {
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError> {
        debug!(%extension, "no native implementation for extension");
        Err(RegistryError::ExtensionUnavailable(extension))
    }

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError> {
        let spec = self.spec(id).ok_or_else(|| self.not_found(id))?;
        debug!(id, max_episode_steps = ?spec.max_episode_steps, "making native environment");
        let env = (spec.entry_point)();
        let env: Box<dyn Env> = match spec.max_episode_steps {
            Some(limit) => Box::new(TimeLimit::new(env, limit)),
            None => env,
        };
        Ok(Box::new(OrderEnforcing::new(env)))
    }
}
