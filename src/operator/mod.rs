//! Side channels shared with the operator and the dashboard.
//!
//! The override file lets an operator force a score for one target; the bridge state
//! file exposes the last successful submission to the dashboard.

pub mod file_channel;

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::risk::engine::MAX_SCORE;
use crate::risk::RiskAssessment;

pub use file_channel::FileChannel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDirective {
    pub target: String,
    pub score: u8,
}

/// Parses `SCORE` or `TARGET:SCORE` with `SCORE` in `0..=100`. Anything else yields
/// `None`.
///
/// Malformed input is never an error: the agent falls back to automatic scoring.
pub fn parse_directive(raw: &str, default_target: &str) -> Option<OverrideDirective> {
    let content = raw.trim();
    if content.is_empty() {
        return None;
    }
    let (target, score) = match content.split_once(':') {
        Some((target, score)) => (target.trim(), score.trim()),
        None => (default_target, content),
    };
    if target.is_empty() {
        return None;
    }
    let score = score.parse::<u8>().ok().filter(|s| *s <= MAX_SCORE)?;
    Some(OverrideDirective {
        target: target.to_string(),
        score,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeDetails {
    pub concentration: f64,
    pub volatility: f64,
    pub instability: f64,
}

impl BridgeDetails {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            concentration: assessment.concentration,
            volatility: assessment.volatility,
            instability: assessment.instability,
        }
    }

    /// Manual pushes carry no computed sub-signals.
    pub fn manual() -> Self {
        Self {
            concentration: 0.0,
            volatility: 0.0,
            instability: 0.0,
        }
    }
}

/// Dashboard snapshot of the last successful submission. Field names are consumed by
/// the dashboard and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeState {
    pub validator: String,
    pub score: u8,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub details: BridgeDetails,
}

impl BridgeState {
    pub fn now(validator: impl Into<String>, score: u8, details: BridgeDetails) -> Self {
        Self {
            validator: validator.into(),
            score,
            timestamp: unix_now_secs(),
            details,
        }
    }
}

fn unix_now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub trait OperatorChannel: Send + Sync {
    fn read_directive(&self) -> Option<OverrideDirective>;
    fn write_bridge_state(&self, state: &BridgeState) -> Result<(), ChannelError>;
}
