use std::collections::HashMap;

/// A new score must move strictly more than this many points to be resubmitted.
pub const SIGNIFICANT_SCORE_DELTA: u8 = 5;

/// In-memory record of the last score submitted per validator.
///
/// Never persisted: after a restart every validator is submitted again on its first
/// observation.
#[derive(Debug, Default)]
pub struct ChangeGate {
    last_submitted: HashMap<String, u8>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.last_submitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_submitted.is_empty()
    }

    pub fn last_submitted(&self, public_key: &str) -> Option<u8> {
        self.last_submitted.get(public_key).copied()
    }

    /// Returns true on first observation or when `|new - last| > 5`, recording
    /// `new_score` as the last submitted score in that case.
    pub fn should_submit(&mut self, public_key: &str, new_score: u8) -> bool {
        let significant = match self.last_submitted.get(public_key) {
            None => true,
            Some(&last) => last.abs_diff(new_score) > SIGNIFICANT_SCORE_DELTA,
        };
        if significant {
            self.last_submitted.insert(public_key.to_string(), new_score);
        }
        significant
    }
}
