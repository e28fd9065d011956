//! Per-cycle view of the validator set.

pub type EraId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorObservation {
    pub public_key: String,
    /// Stake in motes.
    pub stake: u128,
}

/// Validators observed for one era, sorted by stake descending.
///
/// This may be a partial (top-N) view of the network, so `total_stake` and every
/// concentration figure derived from it are relative to the observed set only.
#[derive(Debug, Clone)]
pub struct EraSnapshot {
    era_id: EraId,
    validators: Vec<ValidatorObservation>,
    total_stake: u128,
}

impl EraSnapshot {
    pub fn new(era_id: EraId, mut validators: Vec<ValidatorObservation>) -> Self {
        // Stable sort keeps API order among equal stakes.
        validators.sort_by(|a, b| b.stake.cmp(&a.stake));
        let total_stake = validators
            .iter()
            .fold(0u128, |acc, v| acc.saturating_add(v.stake));
        Self {
            era_id,
            validators,
            total_stake,
        }
    }

    pub fn era_id(&self) -> EraId {
        self.era_id
    }

    pub fn validators(&self) -> &[ValidatorObservation] {
        &self.validators
    }

    pub fn total_stake(&self) -> u128 {
        self.total_stake
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
