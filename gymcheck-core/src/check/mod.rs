mod config;
mod dispatch;
mod errors;
mod runner;
mod tester;

pub use config::{CheckConfig, DEFAULT_STEPS};
pub use dispatch::{ALL, Target, run};
pub use errors::CheckError;
pub use runner::{EnvReport, FailureKind, Outcome, run_all, section_header};
pub use tester::EnvChecker;
