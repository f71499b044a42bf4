mod errors;
mod spaces;
mod traits;
mod types;
mod wrappers;

pub use errors::{EnvError, SpaceError};
pub use spaces::{DType, Sample, Space, shape_repr};
pub use traits::{Env, OBSERVATION_KEY, check_action, sample_observation_space};
pub use types::{Info, Step};
pub use wrappers::{OrderEnforcing, TimeLimit};
