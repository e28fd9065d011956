use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

use super::{classify_deploy_output, SubmissionOutcome, Submitter};
use crate::error::SubmitError;
use crate::utils::config::OracleConfig;

/// Submits scores with `casper-client put-deploy`.
///
/// The contract entry point takes `validator: String` and `score: u8`. Signing,
/// payment and broadcast all happen inside the tool.
#[derive(Debug, Clone)]
pub struct CasperClientSubmitter {
    binary: String,
    node_address: String,
    chain_name: String,
    secret_key_path: PathBuf,
    payment_amount: u64,
    contract_hash: String,
    entry_point: String,
}

impl CasperClientSubmitter {
    pub fn from_config(config: &OracleConfig) -> Self {
        Self {
            binary: config.client_binary.clone(),
            node_address: config.node_address.clone(),
            chain_name: config.chain_name.clone(),
            secret_key_path: config.secret_key_path.clone(),
            payment_amount: config.payment_amount_motes,
            contract_hash: config.contract_hash.clone(),
            entry_point: config.entry_point.clone(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn deploy_args(&self, target: &str, score: u8) -> Vec<String> {
        vec![
            "put-deploy".to_string(),
            "--node-address".to_string(),
            self.node_address.clone(),
            "--chain-name".to_string(),
            self.chain_name.clone(),
            "--secret-key".to_string(),
            self.secret_key_path.display().to_string(),
            "--payment-amount".to_string(),
            self.payment_amount.to_string(),
            "--session-hash".to_string(),
            format!("hash-{}", self.contract_hash),
            "--session-entry-point".to_string(),
            self.entry_point.clone(),
            "--session-arg".to_string(),
            format!("validator:string='{target}'"),
            "--session-arg".to_string(),
            format!("score:u8='{score}'"),
        ]
    }
}

#[async_trait]
impl Submitter for CasperClientSubmitter {
    fn name(&self) -> &str {
        "casper-client"
    }

    async fn submit(&self, target: &str, score: u8) -> SubmissionOutcome {
        let output = match Command::new(&self.binary)
            .args(self.deploy_args(target, score))
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                return SubmissionOutcome::failed(SubmitError::Spawn {
                    message: format!("{}: {}", self.binary, err),
                })
            }
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        classify_deploy_output(
            output.status.success(),
            output.status.code(),
            &stdout,
            &stderr,
        )
    }
}
