//! Random draws from resolved preference domains.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{Rng, thread_rng};

use crate::preference::{Literal, PreferenceSpec};

/// One concrete value drawn for a preference in a single round.
#[derive(Debug, Clone, PartialEq)]
pub enum RealizedValue {
    Scalar(Literal),
    /// Members of a multi-valued preference, in the order they were drawn.
    Members(Vec<Literal>),
}

/// A preference paired with the value drawn for it.
pub type Sampled<'s> = (&'s PreferenceSpec, RealizedValue);

/// Draws realized values. Production code uses the thread-local, OS-seeded
/// generator; tests inject a seeded one through [`ValueSampler::with_rng`].
#[derive(Debug)]
pub struct ValueSampler<R = ThreadRng> {
    rng: R,
}

impl ValueSampler<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: thread_rng() }
    }
}

impl Default for ValueSampler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ValueSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample(&mut self, spec: &PreferenceSpec) -> RealizedValue {
        let domain = spec.domain();
        match spec.cardinality() {
            None => RealizedValue::Scalar(self.pick(domain)),
            Some(bounds) => {
                let count = self.rng.gen_range(bounds.min..=bounds.max);
                let members = if bounds.distinct {
                    domain
                        .choose_multiple(&mut self.rng, count)
                        .cloned()
                        .collect()
                } else {
                    // With replacement: the same member may be drawn twice.
                    (0..count).map(|_| self.pick(domain)).collect()
                };
                RealizedValue::Members(members)
            }
        }
    }

    /// Samples every spec, keeping each value next to the spec it was drawn for.
    pub fn sample_all<'s>(&mut self, specs: &'s [PreferenceSpec]) -> Vec<Sampled<'s>> {
        specs.iter().map(|spec| (spec, self.sample(spec))).collect()
    }

    fn pick(&mut self, domain: &[Literal]) -> Literal {
        let index = self.rng.gen_range(0..domain.len());
        domain[index].clone()
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
