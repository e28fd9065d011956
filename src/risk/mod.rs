pub mod engine;
pub mod signals;

pub use engine::{assess, RiskAssessment, RiskEngine, RiskInputs};
pub use signals::{RandomSignals, SignalSource};
