mod errors;
mod extension;
mod id;
mod native;
mod traits;

pub use errors::RegistryError;
pub use extension::Extension;
pub use id::EnvId;
pub use native::{EntryPoint, EnvSpec, NativeRegistry};
pub use traits::EnvFactory;
