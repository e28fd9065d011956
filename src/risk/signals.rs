use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound of the unstake-pressure placeholder draw.
pub const INSTABILITY_CEILING: f64 = 0.2;
/// Half-width of the symmetric market-noise draw.
pub const NOISE_AMPLITUDE: f64 = 0.02;

/// Supplies the two non-data inputs of a risk assessment.
///
/// `instability` is a placeholder: there is no unstake-pressure feed yet, so the
/// only implementation draws it at random. A real signal replaces the source, not
/// the engine's weighting.
pub trait SignalSource: Send {
    fn instability(&mut self, public_key: &str) -> f64;
    fn noise(&mut self) -> f64;
}

impl<S: SignalSource + ?Sized> SignalSource for Box<S> {
    fn instability(&mut self, public_key: &str) -> f64 {
        (**self).instability(public_key)
    }

    fn noise(&mut self) -> f64 {
        (**self).noise()
    }
}

pub struct RandomSignals {
    rng: StdRng,
}

impl RandomSignals {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SignalSource for RandomSignals {
    fn instability(&mut self, _public_key: &str) -> f64 {
        self.rng.gen_range(0.0..=INSTABILITY_CEILING)
    }

    fn noise(&mut self) -> f64 {
        self.rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE)
    }
}
