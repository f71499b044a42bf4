pub mod catalogue;
pub mod check;
pub mod env;
pub mod envs;
pub mod registry;

pub use catalogue::Catalogue;
pub use check::{CheckConfig, CheckError, EnvChecker, Target};
pub use env::{Env, EnvError, Sample, Space, Step};
pub use registry::{EnvFactory, Extension, NativeRegistry, RegistryError};
