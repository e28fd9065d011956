//! One validator with 15% of observed stake and a perfectly flat reward history.

use risk_oracle::agent::CycleKind;
use risk_oracle::risk::{assess, RiskInputs};

use crate::anchor_utils::{
    build_agent, validator, FakeDataSource, FixedSignals, MemoryChannel, RecordingSubmitter,
};

#[test]
fn concentrated_flat_reward_validator_scores_forty() {
    let assessment = assess(
        RiskInputs {
            stake: 150,
            total_stake: 1_000,
            rewards: &[5.0, 5.0, 5.0, 5.0],
        },
        0.0,
        0.0,
    );
    assert_eq!(assessment.concentration, 1.0);
    assert_eq!(assessment.volatility, 0.0);
    assert_eq!(assessment.score, 40);
}

#[tokio::test(flavor = "current_thread")]
async fn concentrated_validator_is_submitted_on_first_sight() {
    let source = FakeDataSource::new(
        4_242,
        vec![
            validator("01small", 50),
            validator("01target", 150),
            validator("01big", 800),
        ],
    )
    .with_rewards("01target", vec![5.0, 5.0, 5.0, 5.0]);
    let submitter = RecordingSubmitter::default();
    let channel = MemoryChannel::default();
    let mut agent = build_agent(
        source.clone(),
        FixedSignals::default(),
        submitter.clone(),
        channel.clone(),
    );

    let report = agent.run_cycle().await;

    assert!(matches!(
        report.kind,
        CycleKind::Completed {
            era: 4_242,
            observed: 3,
            ..
        }
    ));
    assert!(source
        .calls()
        .contains(&"top_validators:4242:100".to_string()));
    assert!(submitter
        .submissions()
        .contains(&("01target".to_string(), 40)));
    assert_eq!(agent.gate().last_submitted("01target"), Some(40));

    let bridge = channel
        .bridge_writes()
        .into_iter()
        .find(|state| state.validator == "01target")
        .expect("accepted deploy is mirrored to the bridge");
    assert_eq!(bridge.score, 40);
    assert_eq!(bridge.details.concentration, 1.0);
    assert_eq!(bridge.details.volatility, 0.0);
}
