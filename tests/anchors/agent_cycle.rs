use std::time::Duration;

use risk_oracle::agent::{CycleBudget, CycleKind};
use risk_oracle::operator::BridgeDetails;

use crate::anchor_utils::{
    build_agent, validator, FakeDataSource, FixedSignals, MemoryChannel, RecordingSubmitter,
};

fn two_validator_source() -> FakeDataSource {
    FakeDataSource::new(
        7,
        vec![validator("01aa", 150), validator("01bb", 850)],
    )
    .with_rewards("01aa", vec![5.0, 5.0, 5.0, 5.0])
    .with_rewards("01bb", vec![2.0, 2.0])
}

#[tokio::test(flavor = "current_thread")]
async fn override_short_circuits_data_and_scoring() {
    let source = two_validator_source();
    let submitter = RecordingSubmitter::default();
    let channel = MemoryChannel::default();
    channel.set_directive("validator_1", 90);
    let mut agent = build_agent(
        source.clone(),
        FixedSignals::default(),
        submitter.clone(),
        channel.clone(),
    );

    let report = agent.run_cycle().await;

    assert_eq!(report.pause, Duration::from_secs(10));
    assert!(matches!(report.kind, CycleKind::Override { success: true, .. }));
    assert!(source.calls().is_empty(), "override cycle must not fetch");
    assert_eq!(submitter.submissions(), vec![("validator_1".to_string(), 90)]);
    assert!(agent.gate().is_empty(), "override bypasses the change gate");

    let writes = channel.bridge_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].validator, "validator_1");
    assert_eq!(writes[0].score, 90);
    assert_eq!(writes[0].details, BridgeDetails::manual());
}

#[tokio::test(flavor = "current_thread")]
async fn override_is_resubmitted_every_cycle_while_present() {
    let submitter = RecordingSubmitter::default();
    let channel = MemoryChannel::default();
    channel.set_directive("01aa", 12);
    let mut agent = build_agent(
        two_validator_source(),
        FixedSignals::default(),
        submitter.clone(),
        channel.clone(),
    );

    agent.run_cycle().await;
    agent.run_cycle().await;
    assert_eq!(submitter.submissions().len(), 2);

    channel.clear_directive();
    let report = agent.run_cycle().await;
    assert!(matches!(report.kind, CycleKind::Completed { era: 7, .. }));
}

#[tokio::test(flavor = "current_thread")]
async fn missing_era_retries_quickly_without_submitting() {
    let source = FakeDataSource::default();
    let submitter = RecordingSubmitter::default();
    let mut agent = build_agent(
        source.clone(),
        FixedSignals::default(),
        submitter.clone(),
        MemoryChannel::default(),
    );

    let report = agent.run_cycle().await;

    assert_eq!(report.kind, CycleKind::EraUnavailable);
    assert_eq!(report.pause, Duration::from_secs(5));
    assert_eq!(source.calls(), vec!["latest_era".to_string()]);
    assert!(submitter.submissions().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn validator_fetch_failure_completes_an_empty_cycle() {
    let source = FakeDataSource {
        era: Some(9),
        ..FakeDataSource::default()
    };
    let submitter = RecordingSubmitter::default();
    let mut agent = build_agent(
        source,
        FixedSignals::default(),
        submitter.clone(),
        MemoryChannel::default(),
    );

    let report = agent.run_cycle().await;

    assert_eq!(
        report.kind,
        CycleKind::Completed {
            era: 9,
            observed: 0,
            submitted: 0,
            failed: 0
        }
    );
    assert_eq!(report.pause, Duration::from_secs(30));
    assert!(submitter.submissions().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn unchanged_scores_are_not_resubmitted() {
    let submitter = RecordingSubmitter::default();
    let channel = MemoryChannel::default();
    let mut agent = build_agent(
        two_validator_source(),
        FixedSignals::default(),
        submitter.clone(),
        channel.clone(),
    );

    let first = agent.run_cycle().await;
    assert_eq!(
        first.kind,
        CycleKind::Completed {
            era: 7,
            observed: 2,
            submitted: 2,
            failed: 0
        }
    );
    // Highest stake first.
    assert_eq!(
        submitter.submissions(),
        vec![("01bb".to_string(), 40), ("01aa".to_string(), 40)]
    );

    let second = agent.run_cycle().await;
    assert_eq!(
        second.kind,
        CycleKind::Completed {
            era: 7,
            observed: 2,
            submitted: 0,
            failed: 0
        }
    );
    assert_eq!(submitter.submissions().len(), 2);
    assert_eq!(channel.bridge_writes().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_does_not_stop_the_cycle() {
    let submitter = RecordingSubmitter::failing_for(&["01bb"]);
    let channel = MemoryChannel::default();
    let mut agent = build_agent(
        two_validator_source(),
        FixedSignals::default(),
        submitter.clone(),
        channel.clone(),
    );

    let report = agent.run_cycle().await;

    assert_eq!(
        report.kind,
        CycleKind::Completed {
            era: 7,
            observed: 2,
            submitted: 1,
            failed: 1
        }
    );
    assert_eq!(submitter.submissions().len(), 2);
    let writes = channel.bridge_writes();
    assert_eq!(writes.len(), 1, "bridge only reflects accepted deploys");
    assert_eq!(writes[0].validator, "01aa");
    // The gate remembers the decision even though the deploy failed.
    assert_eq!(agent.gate().last_submitted("01bb"), Some(40));
}

#[tokio::test(flavor = "current_thread")]
async fn run_stops_when_scheduler_says_so() {
    let mut agent = build_agent(
        two_validator_source(),
        FixedSignals::default(),
        RecordingSubmitter::default(),
        MemoryChannel::default(),
    );
    let mut budget = CycleBudget::new(3);

    let cycles = agent.run(&mut budget).await;

    assert_eq!(cycles, 3);
    assert_eq!(budget.requested(), &[Duration::from_secs(30); 3]);
}
