use async_trait::async_trait;

use super::{SubmissionOutcome, Submitter};

/// Logs the deploy it would make and reports success without a deploy hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSubmitter;

#[async_trait]
impl Submitter for DryRunSubmitter {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn submit(&self, target: &str, score: u8) -> SubmissionOutcome {
        tracing::info!(
            "[DEPLOY] Dry run: would submit score {} for {}",
            score,
            target
        );
        SubmissionOutcome::accepted(None)
    }
}
