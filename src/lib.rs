pub mod logging;
#[cfg(feature = "python")]
pub mod python;

use gymcheck_core::registry::EnvFactory;

/// Name of the environment backend compiled into this build.
pub fn backend_name() -> &'static str {
    if cfg!(feature = "python") {
        "gymnasium"
    } else {
        "native"
    }
}

/// The factory the binary checks against: Python Gymnasium when built with
/// the `python` feature, the native registry otherwise.
pub fn default_factory() -> Box<dyn EnvFactory> {
    #[cfg(feature = "python")]
    {
        Box::new(python::GymnasiumFactory::new())
    }
    #[cfg(not(feature = "python"))]
    {
        Box::new(gymcheck_core::NativeRegistry::standard())
    }
}
