use std::convert::Infallible;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::info;

use crate::catalogue::Catalogue;
use crate::check::config::CheckConfig;
use crate::check::errors::CheckError;
use crate::check::runner::run_all;
use crate::check::tester::EnvChecker;
use crate::registry::EnvFactory;

/// Sentinel selecting the whole catalogue.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    Single(String),
}

impl Target {
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            Target::All
        } else {
            Target::Single(s.to_string())
        }
    }
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Target::parse(s))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All => f.write_str(ALL),
            Target::Single(id) => f.write_str(id),
        }
    }
}

/// Checks `target`.
///
/// `Target::All` sweeps the catalogue and only fails if `out` cannot be
/// written. `Target::Single` returns the check's error unchanged so the
/// caller sees the real cause.
pub fn run<F, W>(
    target: &Target,
    factory: F,
    catalogue: &Catalogue,
    config: CheckConfig,
    out: &mut W,
) -> Result<(), CheckError>
where
    F: EnvFactory,
    W: Write + ?Sized,
{
    let mut checker = EnvChecker::new(factory, catalogue, config);
    match target {
        Target::All => {
            info!(entries = catalogue.len(), "checking the whole catalogue");
            run_all(&mut checker, out)?;
        }
        Target::Single(id) => {
            checker.check_env(id, out)?;
            writeln!(out, "SUCCESS: {id}")?;
        }
    }
    out.flush()?;
    Ok(())
}
