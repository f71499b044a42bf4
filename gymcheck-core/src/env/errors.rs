use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpaceError {
    #[error("space is not compound and has no sub-space `{0}`")]
    NotCompound(String),

    #[error("compound space has no sub-space `{0}`")]
    MissingKey(String),

    #[error("unsupported space: {0}")]
    Unsupported(String),
}

impl SpaceError {
    /// True when the lookup failed because the sub-space does not exist,
    /// as opposed to the space itself being unusable.
    pub fn is_absent(&self) -> bool {
        matches!(self, SpaceError::NotCompound(_) | SpaceError::MissingKey(_))
    }
}

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("cannot call `step` before `reset`")]
    ResetNeeded,

    #[error("environment is closed")]
    Closed,

    #[error("invalid action {action} for action space {space}")]
    InvalidAction { action: String, space: String },

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error("environment backend error: {0}")]
    Backend(String),
}
