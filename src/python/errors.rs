use gymcheck_core::env::{EnvError, SpaceError};
use gymcheck_core::registry::RegistryError;
use pyo3::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Python(#[from] PyErr),

    #[error(transparent)]
    Space(#[from] SpaceError),
}

impl BridgeError {
    pub fn into_env_error(self, py: Python<'_>) -> EnvError {
        match self {
            BridgeError::Python(err) => EnvError::Backend(describe(py, &err)),
            BridgeError::Space(err) => EnvError::Space(err),
        }
    }

    pub fn into_registry_error(self, py: Python<'_>) -> RegistryError {
        match self {
            BridgeError::Python(err) => RegistryError::Backend(describe(py, &err)),
            BridgeError::Space(err) => RegistryError::Env(EnvError::Space(err)),
        }
    }
}

/// Renders a Python exception the way the interpreter would print it,
/// traceback first.
pub fn describe(py: Python<'_>, err: &PyErr) -> String {
    let summary = err.to_string();
    match err.traceback(py).map(|tb| tb.format()) {
        Some(Ok(traceback)) => format!("{traceback}{summary}"),
        _ => summary,
    }
}
