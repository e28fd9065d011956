use risk_oracle::operator::{parse_directive, OverrideDirective};

fn directive(target: &str, score: u8) -> Option<OverrideDirective> {
    Some(OverrideDirective {
        target: target.to_string(),
        score,
    })
}

#[test]
fn bare_score_uses_default_target() {
    assert_eq!(parse_directive("90", "validator_1"), directive("validator_1", 90));
    assert_eq!(parse_directive("  7\n", "validator_1"), directive("validator_1", 7));
}

#[test]
fn target_and_score_are_trimmed() {
    assert_eq!(
        parse_directive(" 01abc : 75 \n", "validator_1"),
        directive("01abc", 75)
    );
}

#[test]
fn malformed_content_yields_no_directive() {
    for raw in ["", "   \n", "abc", "01abc:", ":50", "01abc:high", "-3", "256", "1:2:3"] {
        assert_eq!(parse_directive(raw, "validator_1"), None, "raw {raw:?}");
    }
}

#[test]
fn scores_above_hundred_are_rejected() {
    assert_eq!(parse_directive("100", "validator_1"), directive("validator_1", 100));
    assert_eq!(parse_directive("101", "validator_1"), None);
    assert_eq!(parse_directive("01abc:255", "validator_1"), None);
}
