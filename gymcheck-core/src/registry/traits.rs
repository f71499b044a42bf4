use crate::env::Env;
use crate::registry::errors::RegistryError;
use crate::registry::extension::Extension;

/// Constructs environments by id, like `gymnasium.make`.
pub trait EnvFactory {
    /// Makes the ids of `extension` resolvable. Registering an extension
    /// that is already registered is a no-op.
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError>;

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError>;
}

impl<F: EnvFactory + ?Sized> EnvFactory for &mut F {
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError> {
        (**self).register_extension(extension)
    }

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError> {
        (**self).make(id)
    }
}

impl<F: EnvFactory + ?Sized> EnvFactory for Box<F> {
    fn register_extension(&mut self, extension: Extension) -> Result<(), RegistryError> {
        (**self).register_extension(extension)
    }

    fn make(&mut self, id: &str) -> Result<Box<dyn Env>, RegistryError> {
        (**self).make(id)
    }
}
