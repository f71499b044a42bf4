use std::io::{self, Write};

use tracing::debug;

use crate::check::errors::CheckError;
use crate::check::tester::EnvChecker;
use crate::registry::EnvFactory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Unknown id or missing extension.
    Unavailable,
    /// Construction, sampling or rollout raised.
    Broken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { kind: FailureKind, message: String },
}

impl Outcome {
    fn from_result(result: Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(err) => Outcome::Failure {
                kind: if err.is_unavailable() {
                    FailureKind::Unavailable
                } else {
                    FailureKind::Broken
                },
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Result of checking one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvReport {
    pub domain: String,
    pub subdomain: String,
    pub env_id: String,
    pub outcome: Outcome,
}

pub fn section_header(domain: &str, subdomain: &str) -> String {
    format!("========== {domain}: {subdomain} ==========")
}

/// Checks every catalogue entry in order, writing a section per subdomain.
///
/// A failing environment never stops the batch: whatever the check returns
/// is reported as a `FAIL` line and the next entry runs. Only a failure to
/// write to `out` aborts, including one raised while the check itself was
/// writing verbose diagnostics.
pub fn run_all<F, W>(checker: &mut EnvChecker<'_, F>, out: &mut W) -> io::Result<Vec<EnvReport>>
where
    F: EnvFactory,
    W: Write + ?Sized,
{
    let catalogue = checker.catalogue();
    let mut reports = Vec::with_capacity(catalogue.len());

    for (domain, subdomains) in catalogue.domains() {
        for (subdomain, ids) in subdomains {
            writeln!(out, "{}", section_header(domain, subdomain))?;

            for id in ids {
                let outcome = match checker.check_env(id, out) {
                    Err(CheckError::Io(err)) => return Err(err),
                    result => Outcome::from_result(result),
                };
                match &outcome {
                    Outcome::Success => writeln!(out, "SUCCESS: {id}")?,
                    Outcome::Failure { kind, message } => {
                        debug!(env_id = %id, ?kind, error = %message, "check failed");
                        writeln!(out, "FAIL: {id}")?;
                    }
                }
                reports.push(EnvReport {
                    domain: domain.clone(),
                    subdomain: subdomain.clone(),
                    env_id: id.clone(),
                    outcome,
                });
            }
            writeln!(out)?;
        }
    }

    Ok(reports)
}
