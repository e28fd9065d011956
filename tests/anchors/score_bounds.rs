use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, TestCaseError, TestRunner};
use risk_oracle::risk::engine::{composite_score, volatility_risk, MAX_SCORE};
use risk_oracle::risk::{assess, RiskInputs};

#[test]
fn composite_score_stays_within_zero_and_hundred() {
    let mut runner = TestRunner::new(ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    });
    let component = -5.0f64..5.0f64;
    let strategy = (
        component.clone(),
        component.clone(),
        component,
        -1.0f64..1.0f64,
    );

    let result = runner.run(&strategy, |(concentration, volatility, instability, noise)| {
        let score = composite_score(concentration, volatility, instability, noise);
        if score > MAX_SCORE {
            return Err(TestCaseError::fail(format!("score {score} above {MAX_SCORE}")));
        }
        Ok(())
    });
    if let Err(err) = result {
        panic!("composite score bound proptest failed: {err}");
    }
}

#[test]
fn assessment_components_are_normalized_for_any_observation() {
    let mut runner = TestRunner::new(ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    });
    let strategy = (
        any::<u64>(),
        any::<u64>(),
        prop::collection::vec(-1.0e9f64..1.0e9f64, 0..12),
        0.0f64..=0.2f64,
        -0.02f64..=0.02f64,
    );

    let result = runner.run(&strategy, |(stake, extra, rewards, instability, noise)| {
        let stake = u128::from(stake);
        let total_stake = stake + u128::from(extra);
        let assessment = assess(
            RiskInputs {
                stake,
                total_stake,
                rewards: &rewards,
            },
            instability,
            noise,
        );
        prop_assert!((0.0..=1.0).contains(&assessment.concentration));
        prop_assert!((0.0..=1.0).contains(&assessment.volatility));
        prop_assert!(assessment.score <= MAX_SCORE);
        Ok(())
    });
    if let Err(err) = result {
        panic!("assessment normalization proptest failed: {err}");
    }
}

#[test]
fn short_reward_history_uses_default_volatility() {
    assert_eq!(volatility_risk(&[]), 0.1);
    assert_eq!(volatility_risk(&[42.0]), 0.1);
}

#[test]
fn zero_mean_rewards_have_no_volatility() {
    assert_eq!(volatility_risk(&[0.0, 0.0, 0.0]), 0.0);
}
