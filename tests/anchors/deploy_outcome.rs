use risk_oracle::error::SubmitErrorKind;
use risk_oracle::executor::{classify_deploy_output, extract_deploy_hash};

const PUT_DEPLOY_STDOUT: &str = r#"{
  "jsonrpc": "2.0",
  "id": -1,
  "result": {
    "api_version": "1.5.6",
    "deploy_hash": "5a8f2e7b8d0c4b1a9e3f6d2c1b0a9f8e7d6c5b4a3f2e1d0c9b8a7f6e5d4c3b2a"
  }
}"#;

#[test]
fn zero_exit_with_hash_is_accepted() {
    let outcome = classify_deploy_output(true, Some(0), PUT_DEPLOY_STDOUT, "");
    assert!(outcome.success);
    assert_eq!(
        outcome.deploy_hash.as_deref(),
        Some("5a8f2e7b8d0c4b1a9e3f6d2c1b0a9f8e7d6c5b4a3f2e1d0c9b8a7f6e5d4c3b2a")
    );
    assert_eq!(outcome.error, None);
}

#[test]
fn zero_exit_without_hash_is_still_accepted() {
    let outcome = classify_deploy_output(true, Some(0), "sent", "");
    assert!(outcome.success);
    assert_eq!(outcome.deploy_hash, None);
}

#[test]
fn insufficient_balance_is_classified_case_insensitively() {
    let outcome = classify_deploy_output(
        false,
        Some(1),
        "",
        "Error: Insufficient Balance to pay for deploy\n",
    );
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind(), Some(SubmitErrorKind::InsufficientBalance));
    let hint = outcome.error.as_ref().and_then(|e| e.hint());
    assert!(hint.is_some_and(|h| h.contains("faucet")));
}

#[test]
fn other_failures_are_rejections_without_hint() {
    let outcome = classify_deploy_output(false, Some(101), "", "connection refused\n");
    assert_eq!(outcome.error_kind(), Some(SubmitErrorKind::Rejected));
    let error = outcome.error.expect("rejection carries an error");
    assert!(error.to_string().contains("connection refused"));
    assert_eq!(error.hint(), None);
}

#[test]
fn silent_failure_reports_exit_status() {
    let outcome = classify_deploy_output(false, Some(3), "", "");
    let error = outcome.error.expect("failure carries an error");
    assert!(error.to_string().contains("exited with status 3"));
}

#[test]
fn last_parseable_hash_line_wins() {
    let stdout = "\"deploy_hash\": \"aaa\"\n\"deploy_hash\": \"bbb\"\ndeploy_hash pending\n";
    assert_eq!(extract_deploy_hash(stdout).as_deref(), Some("bbb"));
}
