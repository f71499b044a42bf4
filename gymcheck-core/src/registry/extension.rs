use std::fmt;

use serde::Serialize;

/// Separately distributed environment packages that must be registered with
/// the factory before their ids resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Extension {
    /// Arcade Learning Environment (Atari 2600 games, `ALE/` namespace).
    Arcade,
    /// Gymnasium-Robotics (Fetch, Shadow Hand, Maze, Adroit, Franka Kitchen).
    Robotics,
}

impl Extension {
    pub const ALL: [Extension; 2] = [Extension::Arcade, Extension::Robotics];

    /// Distribution name of the package providing the extension.
    pub fn package(&self) -> &'static str {
        match self {
            Extension::Arcade => "ale-py",
            Extension::Robotics => "gymnasium-robotics",
        }
    }

    /// Python module to import for registration.
    pub fn module(&self) -> &'static str {
        match self {
            Extension::Arcade => "ale_py",
            Extension::Robotics => "gymnasium_robotics",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}
