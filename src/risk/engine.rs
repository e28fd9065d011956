//! Composite validator risk score.
//!
//! `raw = 0.4 * concentration + 0.3 * volatility + 0.3 * instability + noise`,
//! scaled to 0..=100 and truncated toward zero. The weights are a fixed policy shared
//! with the on-chain consumer and must not drift.

use serde::Serialize;

use super::signals::SignalSource;

pub const CONCENTRATION_WEIGHT: f64 = 0.4;
pub const VOLATILITY_WEIGHT: f64 = 0.3;
pub const INSTABILITY_WEIGHT: f64 = 0.3;

/// A stake share of `1 / CONCENTRATION_SATURATION` (10%) or more is maximal risk.
pub const CONCENTRATION_SATURATION: f64 = 10.0;
pub const DEFAULT_VOLATILITY: f64 = 0.1;
pub const VOLATILITY_SCALE: f64 = 5.0;
pub const MIN_REWARD_SAMPLES: usize = 2;
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub concentration: f64,
    pub volatility: f64,
    pub instability: f64,
    pub noise: f64,
    pub score: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskInputs<'a> {
    pub stake: u128,
    pub total_stake: u128,
    pub rewards: &'a [f64],
}

pub fn concentration_risk(stake: u128, total_stake: u128) -> f64 {
    if total_stake == 0 {
        return 0.0;
    }
    concentration_from_share(stake as f64 / total_stake as f64)
}

pub fn concentration_from_share(share: f64) -> f64 {
    if !share.is_finite() || share <= 0.0 {
        return 0.0;
    }
    (share * CONCENTRATION_SATURATION).min(1.0)
}

/// Coefficient of variation of the reward history, scaled and capped to [0, 1].
pub fn volatility_risk(rewards: &[f64]) -> f64 {
    if rewards.len() < MIN_REWARD_SAMPLES {
        return DEFAULT_VOLATILITY;
    }
    let n = rewards.len() as f64;
    let mean = rewards.iter().sum::<f64>() / n;
    if mean == 0.0 || !mean.is_finite() {
        return 0.0;
    }
    let variance = rewards.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;
    if !cv.is_finite() {
        return 0.0;
    }
    (cv * VOLATILITY_SCALE).clamp(0.0, 1.0)
}

pub fn composite_score(concentration: f64, volatility: f64, instability: f64, noise: f64) -> u8 {
    let raw = CONCENTRATION_WEIGHT * concentration
        + VOLATILITY_WEIGHT * volatility
        + INSTABILITY_WEIGHT * instability
        + noise;
    let scaled = (raw * 100.0).trunc();
    if !scaled.is_finite() {
        return 0;
    }
    scaled.clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// Pure assessment with the random inputs supplied by the caller.
pub fn assess(inputs: RiskInputs<'_>, instability: f64, noise: f64) -> RiskAssessment {
    let concentration = concentration_risk(inputs.stake, inputs.total_stake);
    let volatility = volatility_risk(inputs.rewards);
    RiskAssessment {
        concentration,
        volatility,
        instability,
        noise,
        score: composite_score(concentration, volatility, instability, noise),
    }
}

pub struct RiskEngine<S> {
    signals: S,
}

impl<S: SignalSource> RiskEngine<S> {
    pub fn new(signals: S) -> Self {
        Self { signals }
    }

    pub fn compute(&mut self, public_key: &str, inputs: RiskInputs<'_>) -> RiskAssessment {
        let instability = self.signals.instability(public_key);
        let noise = self.signals.noise();
        assess(inputs, instability, noise)
    }
}
