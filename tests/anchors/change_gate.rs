use risk_oracle::gate::{ChangeGate, SIGNIFICANT_SCORE_DELTA};

#[test]
fn first_observation_is_always_submitted() {
    let mut gate = ChangeGate::new();
    assert!(gate.should_submit("01aa", 0));
    assert_eq!(gate.last_submitted("01aa"), Some(0));
}

#[test]
fn delta_of_exactly_five_is_not_significant() {
    let mut gate = ChangeGate::new();
    assert!(gate.should_submit("01aa", 40));
    assert!(!gate.should_submit("01aa", 40 + SIGNIFICANT_SCORE_DELTA));
    assert!(!gate.should_submit("01aa", 40 - SIGNIFICANT_SCORE_DELTA));
    assert_eq!(gate.last_submitted("01aa"), Some(40));
    assert!(gate.should_submit("01aa", 46));
    assert_eq!(gate.last_submitted("01aa"), Some(46));
    assert!(gate.should_submit("01aa", 40));
}

#[test]
fn small_drifts_do_not_move_the_reference_score() {
    let mut gate = ChangeGate::new();
    assert!(gate.should_submit("01aa", 50));
    // Each step is within the threshold of the last *submitted* score.
    for score in [52, 54, 55] {
        assert!(!gate.should_submit("01aa", score));
    }
    assert!(gate.should_submit("01aa", 56));
}

#[test]
fn validators_are_tracked_independently() {
    let mut gate = ChangeGate::new();
    assert!(gate.should_submit("01aa", 30));
    assert!(gate.should_submit("01bb", 30));
    assert!(!gate.should_submit("01aa", 33));
    assert!(gate.should_submit("01bb", 90));
    assert_eq!(gate.len(), 2);
}
