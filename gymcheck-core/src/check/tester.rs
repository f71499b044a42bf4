use std::collections::HashSet;
use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, debug, debug_span, trace};

use crate::catalogue::Catalogue;
use crate::check::config::CheckConfig;
use crate::check::errors::CheckError;
use crate::env::shape_repr;
use crate::registry::{EnvFactory, Extension};

/// Runs smoke checks of catalogue environments against one factory.
pub struct EnvChecker<'c, F> {
    factory: F,
    catalogue: &'c Catalogue,
    config: CheckConfig,
    registered: HashSet<Extension>,
    rng: StdRng,
}

impl<'c, F: EnvFactory> EnvChecker<'c, F> {
    pub fn new(factory: F, catalogue: &'c Catalogue, config: CheckConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            factory,
            catalogue,
            config,
            registered: HashSet::new(),
            rng,
        }
    }

    pub fn catalogue(&self) -> &'c Catalogue {
        self.catalogue
    }

    fn register_extensions(&mut self, id: &str) -> Result<(), CheckError> {
        for extension in self.catalogue.extensions_for(id) {
            if self.registered.contains(&extension) {
                continue;
            }
            debug!(%extension, "registering extension");
            self.factory.register_extension(extension)?;
            self.registered.insert(extension);
        }
        Ok(())
    }

    /// Makes `id`, samples both spaces, rolls out `config.steps` random
    /// actions (resetting whenever an episode ends) and closes it.
    ///
    /// Any failure is returned as is; nothing is retried.
    pub fn check_env<W: Write + ?Sized>(&mut self, id: &str, out: &mut W) -> Result<(), CheckError> {
        let span = debug_span!("check", env_id = id);
        let _enter = span.enter();

        self.register_extensions(id)?;

        let mut env = self.factory.make(id)?;
        if self.config.verbose {
            writeln!(out, "initialize environment {id} successfully")?;
        }

        let observation = env.sample_observation(&mut self.rng)?;
        let action = env.sample_action(&mut self.rng)?;
        if self.config.verbose {
            writeln!(out, "observation: {}", shape_repr(&observation.shape()))?;
            writeln!(out, "action: {}", shape_repr(&action.shape()))?;
        }

        env.reset(self.config.seed)?;
        for _ in 0..self.config.steps {
            let action = env.sample_action(&mut self.rng)?;
            let step = env.step(&action)?;
            if tracing::enabled!(Level::TRACE) {
                trace!(step = %serde_json::to_string(&step).unwrap_or_default());
            }
            if step.is_done() {
                debug!(terminated = step.terminated, truncated = step.truncated, "episode ended, resetting");
                env.reset(None)?;
            }
        }

        env.close()?;
        Ok(())
    }
}
