//! The agent decision loop.
//!
//! Each cycle either pushes an operator override (skipping data, scoring and the
//! change gate entirely) or scores every observed validator of the latest era and
//! submits the significant changes. Work inside a cycle is strictly sequential.

pub mod scheduler;

use std::time::Duration;

use crate::cspr_cloud::DataSource;
use crate::executor::{SubmissionOutcome, Submitter};
use crate::gate::ChangeGate;
use crate::model::{EraId, EraSnapshot};
use crate::operator::{BridgeDetails, BridgeState, OperatorChannel, OverrideDirective};
use crate::risk::{RiskAssessment, RiskEngine, RiskInputs, SignalSource};
use crate::utils::blackbox;
use crate::utils::config::OracleConfig;

pub use scheduler::{CycleBudget, Scheduler, SignalScheduler, Tick};

/// Scores above this are reported as a risk factor in the log.
pub const RISK_ALERT_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    pub cycle: Duration,
    pub override_repoll: Duration,
    pub era_retry: Duration,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            cycle: Duration::from_secs(30),
            override_repoll: Duration::from_secs(10),
            era_retry: Duration::from_secs(5),
        }
    }
}

impl CycleTiming {
    pub fn from_config(config: &OracleConfig) -> Self {
        Self {
            cycle: config.cycle_interval,
            override_repoll: config.override_repoll_interval,
            era_retry: config.era_retry_interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleKind {
    Override {
        directive: OverrideDirective,
        success: bool,
    },
    EraUnavailable,
    Completed {
        era: EraId,
        observed: usize,
        submitted: usize,
        failed: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub kind: CycleKind,
    pub pause: Duration,
}

pub struct Agent {
    source: Box<dyn DataSource>,
    engine: RiskEngine<Box<dyn SignalSource>>,
    gate: ChangeGate,
    submitter: Box<dyn Submitter>,
    channel: Box<dyn OperatorChannel>,
    timing: CycleTiming,
    validator_limit: usize,
}

impl Agent {
    pub fn new(
        source: Box<dyn DataSource>,
        signals: Box<dyn SignalSource>,
        submitter: Box<dyn Submitter>,
        channel: Box<dyn OperatorChannel>,
        timing: CycleTiming,
        validator_limit: usize,
    ) -> Self {
        Self {
            source,
            engine: RiskEngine::new(signals),
            gate: ChangeGate::new(),
            submitter,
            channel,
            timing,
            validator_limit,
        }
    }

    pub fn gate(&self) -> &ChangeGate {
        &self.gate
    }

    /// Runs cycles until the scheduler says stop. Returns the number of cycles run.
    pub async fn run<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> u64 {
        tracing::info!(
            "[CYCLE] Agent loop started (submitter={}, cycle={}s, override_repoll={}s, era_retry={}s)",
            self.submitter.name(),
            self.timing.cycle.as_secs(),
            self.timing.override_repoll.as_secs(),
            self.timing.era_retry.as_secs()
        );
        let mut cycles = 0u64;
        loop {
            let report = self.run_cycle().await;
            cycles += 1;
            if scheduler.pause(report.pause).await == Tick::Stop {
                break;
            }
        }
        tracing::info!("[CYCLE] Agent loop stopped after {} cycles.", cycles);
        cycles
    }

    pub async fn run_cycle(&mut self) -> CycleReport {
        if let Some(directive) = self.channel.read_directive() {
            return self.push_override(directive).await;
        }

        let era = match self.source.latest_era().await {
            Ok(era) => era,
            Err(err) => {
                tracing::warn!(
                    "[DATA] Latest era unavailable: {}. Retrying in {}s.",
                    err,
                    self.timing.era_retry.as_secs()
                );
                blackbox::record("fetch", format!("latest_era: {err}"), None);
                return CycleReport {
                    kind: CycleKind::EraUnavailable,
                    pause: self.timing.era_retry,
                };
            }
        };

        let validators = match self.source.top_validators(era, self.validator_limit).await {
            Ok(validators) => validators,
            Err(err) => {
                tracing::warn!("[DATA] Validator fetch for era {} failed: {}", era, err);
                blackbox::record("fetch", format!("top_validators era={era}: {err}"), None);
                Vec::new()
            }
        };
        let snapshot = EraSnapshot::new(era, validators);
        let (submitted, failed) = self.score_snapshot(&snapshot).await;

        tracing::info!(
            "[CYCLE] Era {}: observed={} submitted={} failed={} tracked={}. Next cycle in {}s.",
            era,
            snapshot.validators().len(),
            submitted,
            failed,
            self.gate.len(),
            self.timing.cycle.as_secs()
        );
        CycleReport {
            kind: CycleKind::Completed {
                era,
                observed: snapshot.validators().len(),
                submitted,
                failed,
            },
            pause: self.timing.cycle,
        }
    }

    async fn push_override(&mut self, directive: OverrideDirective) -> CycleReport {
        tracing::warn!(
            "[OVERRIDE] Manual override detected: pushing {} for {}",
            directive.score,
            directive.target
        );
        blackbox::record(
            "override",
            format!("{}={}", directive.target, directive.score),
            None,
        );
        let outcome = self
            .submitter
            .submit(&directive.target, directive.score)
            .await;
        self.report_outcome(&directive.target, directive.score, &outcome);
        if outcome.success {
            self.publish(BridgeState::now(
                directive.target.clone(),
                directive.score,
                BridgeDetails::manual(),
            ));
        }
        tracing::info!(
            "[CYCLE] Override cycle done. Re-checking override in {}s.",
            self.timing.override_repoll.as_secs()
        );
        CycleReport {
            kind: CycleKind::Override {
                directive,
                success: outcome.success,
            },
            pause: self.timing.override_repoll,
        }
    }

    async fn score_snapshot(&mut self, snapshot: &EraSnapshot) -> (usize, usize) {
        let mut submitted = 0usize;
        let mut failed = 0usize;
        for validator in snapshot.validators() {
            let rewards = match self.source.reward_history(&validator.public_key).await {
                Ok(rewards) => rewards,
                Err(err) => {
                    tracing::debug!(
                        "[DATA] Reward history for {} unavailable: {}",
                        validator.public_key,
                        err
                    );
                    Vec::new()
                }
            };
            let assessment = self.engine.compute(
                &validator.public_key,
                RiskInputs {
                    stake: validator.stake,
                    total_stake: snapshot.total_stake(),
                    rewards: &rewards,
                },
            );
            log_assessment(&validator.public_key, &assessment);

            if !self
                .gate
                .should_submit(&validator.public_key, assessment.score)
            {
                tracing::debug!(
                    "[RISK] {} score {} within change threshold; skipping.",
                    validator.public_key,
                    assessment.score
                );
                continue;
            }

            let outcome = self
                .submitter
                .submit(&validator.public_key, assessment.score)
                .await;
            self.report_outcome(&validator.public_key, assessment.score, &outcome);
            if outcome.success {
                submitted += 1;
                self.publish(BridgeState::now(
                    validator.public_key.clone(),
                    assessment.score,
                    BridgeDetails::from_assessment(&assessment),
                ));
            } else {
                failed += 1;
            }
        }
        (submitted, failed)
    }

    fn report_outcome(&self, target: &str, score: u8, outcome: &SubmissionOutcome) {
        match (&outcome.error, &outcome.deploy_hash) {
            (None, Some(hash)) => {
                tracing::info!(
                    "[DEPLOY] Submitted {} for {}. Deploy hash: {}",
                    score,
                    target,
                    hash
                );
            }
            (None, None) => {
                tracing::info!(
                    "[DEPLOY] Submitted {} for {} (deploy hash not reported).",
                    score,
                    target
                );
            }
            (Some(err), _) => {
                tracing::error!("[DEPLOY] Deploy failed for {}: {}", target, err);
                if let Some(hint) = err.hint() {
                    tracing::error!("[DEPLOY] Hint: {}", hint);
                } else {
                    tracing::warn!("[DEPLOY] Network busy or deploy rejected. Skipping this era...");
                }
            }
        }
        blackbox::record(
            "submission",
            target.to_string(),
            Some(serde_json::json!({
                "score": score,
                "success": outcome.success,
                "deploy_hash": outcome.deploy_hash,
                "error": outcome.error.as_ref().map(|e| e.to_string()),
            })),
        );
    }

    fn publish(&self, state: BridgeState) {
        if let Err(err) = self.channel.write_bridge_state(&state) {
            tracing::warn!("[BRIDGE] Bridge state not updated: {}", err);
        }
    }
}

fn log_assessment(public_key: &str, a: &RiskAssessment) {
    tracing::info!(
        "[RISK] {}: concentration={:.1}% volatility={:.1}% unstake_pressure={:.1}% noise={:+.3}",
        public_key,
        a.concentration * 100.0,
        a.volatility * 100.0,
        a.instability * 100.0,
        a.noise
    );
    if a.score > RISK_ALERT_THRESHOLD {
        tracing::warn!(
            "[RISK] Risk factor detected for {}: {}/100",
            public_key,
            a.score
        );
    } else {
        tracing::info!("[RISK] System safe for {}: {}/100", public_key, a.score);
    }
}
