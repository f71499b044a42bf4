//! Real Gymnasium environments, driven through an embedded CPython.
//!
//! Requires `gymnasium` (and `numpy`) to be importable by the interpreter
//! pyo3 links against. Nothing is imported until the first environment is
//! requested, so a missing installation shows up as per-environment
//! failures rather than a startup error.

mod convert;
mod env;
mod errors;
mod factory;

pub use convert::{info_from_py, json_from_py, sample_from_py, sample_to_py, space_from_py};
pub use env::PyEnv;
pub use errors::{BridgeError, describe};
pub use factory::GymnasiumFactory;
