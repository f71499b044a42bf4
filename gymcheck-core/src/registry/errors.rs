use thiserror::Error;

use crate::env::EnvError;
use crate::registry::extension::Extension;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("environment `{id}` doesn't exist{}", fmt_hint(.hint))]
    NotFound { id: String, hint: Option<String> },

    #[error("extension `{0}` is not available in this build")]
    ExtensionUnavailable(Extension),

    #[error("failed to register extension `{extension}`: {reason}")]
    Registration { extension: Extension, reason: String },

    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("environment construction failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Env(#[from] EnvError),
}

fn fmt_hint(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!("; {h}")).unwrap_or_default()
}

impl RegistryError {
    /// The id cannot be resolved in this process, as opposed to resolving
    /// and then failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RegistryError::NotFound { .. }
                | RegistryError::ExtensionUnavailable(_)
                | RegistryError::Registration { .. }
                | RegistryError::MissingDependency(_)
        )
    }
}
