use std::collections::HashSet;

use gymcheck_core::env::Env;
use gymcheck_core::registry::{EnvFactory, Extension, RegistryError};
use pyo3::exceptions::PyImportError;
use pyo3::prelude::*;
use tracing::debug;

use crate::python::env::PyEnv;
use crate::python::errors::describe;

/// [`EnvFactory`] backed by `gymnasium.make`.
#[derive(Default)]
pub struct GymnasiumFactory {
    gymnasium: Option<Py<PyModule>>,
    registered: HashSet<Extension>,
}

impl GymnasiumFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn gymnasium<'py>(&mut self, py: Python<'py>) -> Result<Bound<'py, PyModule>, RegistryError> {
        if let Some(module) = &self.gymnasium {
            return Ok(module.bind(py).clone());
        }
        let module = py
            .import("gymnasium")
            .map_err(|err| RegistryError::MissingDependency(describe(py, &err)))?;
        if let Ok(version) = module.getattr("__version__") {
            debug!(version = %version, "imported gymnasium");
        }
        self.gymnasium = Some(module.clone().unbind());
        Ok(module)
    }

    fn make_env(&mut self, py: Python<'_>, id: &str) -> Result<PyEnv, RegistryError> {
        let gymnasium = self.gymnasium(py)?;
        let env = gymnasium
            .call_method1("make", (id,))
            .map_err(|err| classify_make_error(py, id, err))?;
        PyEnv::new(id, env.clone()).map_err(|e| {
            // The space conversion failed, so nobody else will close it.
            let _ = env.call_method0("close");
            e.into_registry_error(py)
        })
    }
}

impl EnvFactory for GymnasiumFactory {
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError> {
        if self.registered.contains(&extension) {
            return Ok(());
        }
        Python::with_gil(|py| {
            let gymnasium = self.gymnasium(py)?;
            py.import(extension.module())
                .and_then(|module| gymnasium.call_method1("register_envs", (module,)))
                .map(drop)
                .map_err(|err| RegistryError::Registration {
                    extension,
                    reason: describe(py, &err),
                })
        })?;
        debug!(%extension, "registered extension");
        self.registered.insert(extension);
        Ok(())
    }

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError> {
        let env = Python::with_gil(|py| self.make_env(py, id))?;
        Ok(Box::new(env))
    }
}

fn classify_make_error(py: Python<'_>, id: &str, err: PyErr) -> RegistryError {
    let errors = py.import("gymnasium.error").ok();
    let is = |name: &str| {
        errors
            .as_ref()
            .and_then(|m| m.getattr(name).ok())
            .is_some_and(|cls| err.is_instance(py, &cls))
    };

    if is("UnregisteredEnv") || is("DeprecatedEnv") {
        RegistryError::NotFound {
            id: id.to_string(),
            hint: Some(err.value(py).to_string()),
        }
    } else if is("DependencyNotInstalled") || err.is_instance_of::<PyImportError>(py) {
        RegistryError::MissingDependency(err.value(py).to_string())
    } else {
        RegistryError::Backend(describe(py, &err))
    }
}
