//! `gymcheck`: smoke-test every catalogued environment, or one of them.
//!
//! With the default `--env-id all` every environment is checked and the run
//! succeeds no matter how many fail; each gets a `SUCCESS:` or `FAIL:` line.
//! With a specific id the first error aborts the run with its full cause.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use gymcheck::{backend_name, default_factory, logging};
use gymcheck_core::Catalogue;
use gymcheck_core::check::{self, ALL, CheckConfig, Target};
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "gymcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Test Gymnasium environments.", long_about = None)]
struct Cli {
    /// Specify the environment ID to test. Default is 'all' to test all environments.
    #[arg(long = "env-id", default_value = ALL)]
    env_id: Target,
}

fn main() -> Result<()> {
    logging::init_tracing(Level::WARN);
    let cli = Cli::parse();

    let catalogue = Catalogue::standard();
    debug!(backend = backend_name(), target = %cli.env_id, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    check::run(
        &cli.env_id,
        default_factory(),
        &catalogue,
        CheckConfig::default(),
        &mut out,
    )
    .with_context(|| format!("checking `{}` failed", cli.env_id))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_id_defaults_to_everything() {
        let cli = Cli::try_parse_from(["gymcheck"]).unwrap();
        assert_eq!(cli.env_id, Target::All);
    }

    #[test]
    fn env_id_selects_one_environment() {
        let cli = Cli::try_parse_from(["gymcheck", "--env-id", "FetchReach-v3"]).unwrap();
        assert_eq!(cli.env_id, Target::Single("FetchReach-v3".to_string()));
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["gymcheck", "CartPole-v1"]).is_err());
    }
}
