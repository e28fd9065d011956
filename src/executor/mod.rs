//! On-chain score submission.
//!
//! Submission is delegated to an external signing/broadcast tool. Each `Submitter`
//! returns a `SubmissionOutcome` instead of an error so a failed deploy never stops
//! the agent loop.

pub mod casper_client;
pub mod dry_run;

use async_trait::async_trait;

use crate::error::{SubmitError, SubmitErrorKind};
use crate::utils::error::compact_error_message;

pub use casper_client::CasperClientSubmitter;
pub use dry_run::DryRunSubmitter;

const MAX_OUTCOME_MESSAGE_LEN: usize = 240;

#[async_trait]
pub trait Submitter: Send + Sync {
    fn name(&self) -> &str;
    /// `score` is passed to the contract as a `u8`.
    async fn submit(&self, target: &str, score: u8) -> SubmissionOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub deploy_hash: Option<String>,
    pub error: Option<SubmitError>,
}

impl SubmissionOutcome {
    pub fn accepted(deploy_hash: Option<String>) -> Self {
        Self {
            success: true,
            deploy_hash,
            error: None,
        }
    }

    pub fn failed(error: SubmitError) -> Self {
        Self {
            success: false,
            deploy_hash: None,
            error: Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<SubmitErrorKind> {
        self.error.as_ref().map(SubmitError::kind)
    }
}

/// Classifies a finished deploy-tool run.
///
/// A zero exit is success even when no deploy hash can be recovered from stdout.
pub fn classify_deploy_output(
    exit_success: bool,
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> SubmissionOutcome {
    if exit_success {
        return SubmissionOutcome::accepted(extract_deploy_hash(stdout));
    }

    let combined = format!("{stderr}\n{stdout}");
    let first_line = combined
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| compact_error_message(line, MAX_OUTCOME_MESSAGE_LEN))
        .unwrap_or_else(|| match exit_code {
            Some(code) => format!("deploy tool exited with status {code}"),
            None => "deploy tool terminated by signal".to_string(),
        });

    if combined
        .to_ascii_lowercase()
        .contains("insufficient balance")
    {
        SubmissionOutcome::failed(SubmitError::InsufficientBalance {
            message: first_line,
        })
    } else {
        SubmissionOutcome::failed(SubmitError::Rejected {
            message: first_line,
        })
    }
}

/// Last `deploy_hash` line whose fourth `"`-delimited field is non-empty, e.g.
/// `"deploy_hash": "abc123"` yields `abc123`.
pub fn extract_deploy_hash(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .filter(|line| line.contains("deploy_hash"))
        .filter_map(|line| {
            line.split('"')
                .nth(3)
                .map(str::trim)
                .filter(|hash| !hash.is_empty())
                .map(str::to_string)
        })
        .last()
}
