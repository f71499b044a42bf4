use std::io;

use thiserror::Error;

use crate::env::EnvError;
use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl CheckError {
    /// The environment could not be resolved at all (unknown id or missing
    /// extension), rather than resolving and then misbehaving.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CheckError::Registry(e) if e.is_unavailable())
    }
}
