use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Decides how the agent waits between cycles, and whether it keeps going.
#[async_trait]
pub trait Scheduler: Send {
    async fn pause(&mut self, duration: Duration) -> Tick;
}

/// Wall-clock scheduler. Stops on the shutdown broadcast or after `max_cycles`.
pub struct SignalScheduler {
    shutdown_rx: broadcast::Receiver<()>,
    max_cycles: Option<u64>,
    completed: u64,
}

impl SignalScheduler {
    pub fn new(shutdown_rx: broadcast::Receiver<()>, max_cycles: Option<u64>) -> Self {
        Self {
            shutdown_rx,
            max_cycles,
            completed: 0,
        }
    }
}

#[async_trait]
impl Scheduler for SignalScheduler {
    async fn pause(&mut self, duration: Duration) -> Tick {
        self.completed = self.completed.saturating_add(1);
        if self.max_cycles.is_some_and(|max| self.completed >= max) {
            tracing::info!(
                "[CYCLE] Cycle budget of {} reached; stopping.",
                self.completed
            );
            return Tick::Stop;
        }
        tokio::select! {
            // A closed channel means nobody can signal us anymore; treat as shutdown.
            _ = self.shutdown_rx.recv() => {
                tracing::info!("[CYCLE] Shutdown signal received. Stopping agent loop...");
                Tick::Stop
            }
            _ = tokio::time::sleep(duration) => Tick::Continue,
        }
    }
}

/// Runs a fixed number of cycles without sleeping and records every requested pause.
#[derive(Debug, Default)]
pub struct CycleBudget {
    remaining: usize,
    requested: Vec<Duration>,
}

impl CycleBudget {
    pub fn new(cycles: usize) -> Self {
        Self {
            remaining: cycles,
            requested: Vec::new(),
        }
    }

    pub fn requested(&self) -> &[Duration] {
        &self.requested
    }
}

#[async_trait]
impl Scheduler for CycleBudget {
    async fn pause(&mut self, duration: Duration) -> Tick {
        self.requested.push(duration);
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            Tick::Stop
        } else {
            Tick::Continue
        }
    }
}
