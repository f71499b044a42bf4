use gymcheck_core::env::{Env, EnvError, Info, OBSERVATION_KEY, Sample, Space, Step};
use pyo3::exceptions::{PyKeyError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::RngCore;
use tracing::warn;

use crate::python::convert::{info_from_py, sample_from_py, sample_to_py, space_from_py};
use crate::python::errors::{BridgeError, describe};

/// A Gymnasium environment object as returned by `gymnasium.make`.
///
/// Spaces are described once at construction, but sampling goes through
/// the Python spaces. Returned observations and infos are converted on a
/// best-effort basis and never rejected. The wrapped object is closed on
/// drop if `close` was never called.
pub struct PyEnv {
    id: String,
    env: Py<PyAny>,
    py_observation_space: Py<PyAny>,
    py_action_space: Py<PyAny>,
    observation_space: Space,
    action_space: Space,
    // Last action handed out by `sample_action`, passed back to Python as is.
    sampled_action: Option<(Sample, Py<PyAny>)>,
    closed: bool,
}

impl PyEnv {
    pub fn new(id: &str, env: Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let py_observation_space = env.getattr("observation_space")?;
        let py_action_space = env.getattr("action_space")?;
        let observation_space = space_from_py(&py_observation_space)?;
        let action_space = space_from_py(&py_action_space)?;
        Ok(Self {
            id: id.to_string(),
            env: env.unbind(),
            py_observation_space: py_observation_space.unbind(),
            py_action_space: py_action_space.unbind(),
            observation_space,
            action_space,
            sampled_action: None,
            closed: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn try_reset(&self, py: Python<'_>, seed: Option<u64>) -> Result<(Sample, Info), BridgeError> {
        let kwargs = PyDict::new(py);
        kwargs.set_item("seed", seed)?;
        let result = self.env.bind(py).call_method("reset", (), Some(&kwargs))?;
        let (observation, info): (Bound<'_, PyAny>, Bound<'_, PyAny>) = result.extract()?;
        Ok((sample_from_py(&observation), info_from_py(&info)))
    }

    fn try_step(&mut self, py: Python<'_>, action: &Sample) -> Result<Step, BridgeError> {
        let action = match self.sampled_action.take() {
            Some((sampled, raw)) if &sampled == action => raw.into_bound(py),
            _ => sample_to_py(self.py_action_space.bind(py), action)?,
        };
        let result = self.env.bind(py).call_method1("step", (action,))?;
        let (observation, reward, terminated, truncated, info): (
            Bound<'_, PyAny>,
            f64,
            bool,
            bool,
            Bound<'_, PyAny>,
        ) = result.extract()?;
        Ok(Step {
            observation: sample_from_py(&observation),
            reward,
            terminated,
            truncated,
            info: info_from_py(&info),
        })
    }

    /// `observation_space["observation"].sample()`, or the whole space when
    /// it cannot be indexed by that key.
    fn try_sample_observation(&self, py: Python<'_>) -> Result<Sample, BridgeError> {
        let space = self.py_observation_space.bind(py);
        let value = match space.get_item(OBSERVATION_KEY) {
            Ok(sub) => sub.call_method0("sample")?,
            Err(err)
                if err.is_instance_of::<PyTypeError>(py) || err.is_instance_of::<PyKeyError>(py) =>
            {
                space.call_method0("sample")?
            }
            Err(err) => return Err(err.into()),
        };
        Ok(sample_from_py(&value))
    }

    fn try_sample_action(&mut self, py: Python<'_>) -> Result<Sample, BridgeError> {
        let raw = self.py_action_space.bind(py).call_method0("sample")?;
        let sample = sample_from_py(&raw);
        self.sampled_action = Some((sample.clone(), raw.unbind()));
        Ok(sample)
    }
}

impl Env for PyEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(Sample, Info), EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        Python::with_gil(|py| self.try_reset(py, seed).map_err(|e| e.into_env_error(py)))
    }

    fn step(&mut self, action: &Sample) -> Result<Step, EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        Python::with_gil(|py| self.try_step(py, action).map_err(|e| e.into_env_error(py)))
    }

    // Python spaces carry their own RNG; `_rng` is unused.
    fn sample_observation(&mut self, _rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        Python::with_gil(|py| {
            self.try_sample_observation(py)
                .map_err(|e| e.into_env_error(py))
        })
    }

    fn sample_action(&mut self, _rng: &mut dyn RngCore) -> Result<Sample, EnvError> {
        Python::with_gil(|py| self.try_sample_action(py).map_err(|e| e.into_env_error(py)))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        Python::with_gil(|py| {
            self.env
                .bind(py)
                .call_method0("close")
                .map(drop)
                .map_err(|err| EnvError::Backend(describe(py, &err)))
        })
    }
}

impl Drop for PyEnv {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(env_id = %self.id, error = %e, "failed to close environment");
        }
    }
}
