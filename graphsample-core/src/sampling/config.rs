//! Tunable parameters shared by every sampling family.

use std::num::NonZeroUsize;

use crate::{
    error::{Result, SamplingError},
    walk::DEFAULT_ESCAPE_PROBABILITY,
};

/// Default share of the remaining nodes removed per deletion round.
pub const DEFAULT_BATCH_FRACTION: f64 = 0.03;
/// Default probability that a hybrid step uses the node-edge policy.
pub const DEFAULT_HYBRID_WEIGHT: f64 = 0.5;

const STALL_STEPS_PER_NODE: usize = 100;
const MIN_STALL_STEPS: usize = 1_000;

/// Parameters controlling how the sampling families converge.
///
/// Setters store values as given; [`SamplingConfig::validate`] rejects
/// out-of-range values. [`crate::SamplerBuilder::build`] and every family's
/// `sample` call it before any randomness is drawn.
///
/// # Examples
/// ```
/// use graphsample_core::SamplingConfig;
///
/// let config = SamplingConfig::default().with_batch_fraction(0.1);
/// assert!(config.validate().is_ok());
/// assert!(SamplingConfig::default().with_hybrid_weight(1.5).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    batch_fraction: f64,
    escape_probability: f64,
    hybrid_weight: f64,
    max_stalled_steps: Option<NonZeroUsize>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            batch_fraction: DEFAULT_BATCH_FRACTION,
            escape_probability: DEFAULT_ESCAPE_PROBABILITY,
            hybrid_weight: DEFAULT_HYBRID_WEIGHT,
            max_stalled_steps: None,
        }
    }
}

impl SamplingConfig {
    /// Share of the remaining nodes a deletion round removes, in `(0, 1]`.
    #[must_use]
    pub fn with_batch_fraction(mut self, fraction: f64) -> Self {
        self.batch_fraction = fraction;
        self
    }

    /// Per-step escape probability for jump and restart walks, in `[0, 1]`.
    #[must_use]
    pub fn with_escape_probability(mut self, probability: f64) -> Self {
        self.escape_probability = probability;
        self
    }

    /// Probability that a hybrid step uses the node-edge policy, in `[0, 1]`.
    #[must_use]
    pub fn with_hybrid_weight(mut self, weight: f64) -> Self {
        self.hybrid_weight = weight;
        self
    }

    /// Caps how many consecutive steps (or deletion rounds) may pass without
    /// progress. `None` derives the cap from the input size.
    #[must_use]
    pub fn with_max_stalled_steps(mut self, steps: Option<NonZeroUsize>) -> Self {
        self.max_stalled_steps = steps;
        self
    }

    /// Returns the deletion batch fraction.
    #[must_use]
    pub fn batch_fraction(&self) -> f64 {
        self.batch_fraction
    }

    /// Returns the walk escape probability.
    #[must_use]
    pub fn escape_probability(&self) -> f64 {
        self.escape_probability
    }

    /// Returns the hybrid mixing weight.
    #[must_use]
    pub fn hybrid_weight(&self) -> f64 {
        self.hybrid_weight
    }

    /// Returns the explicit stall cap, if one was set.
    #[must_use]
    pub fn max_stalled_steps(&self) -> Option<NonZeroUsize> {
        self.max_stalled_steps
    }

    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidConfig`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.batch_fraction > 0.0 && self.batch_fraction <= 1.0) {
            return Err(invalid("batch fraction", self.batch_fraction, "(0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.escape_probability) {
            return Err(invalid("escape probability", self.escape_probability, "[0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.hybrid_weight) {
            return Err(invalid("hybrid weight", self.hybrid_weight, "[0, 1]"));
        }
        Ok(())
    }

    /// Number of fruitless steps tolerated on a graph of `node_count` nodes.
    pub(crate) fn stall_limit(&self, node_count: usize) -> usize {
        self.max_stalled_steps.map_or_else(
            || node_count.saturating_mul(STALL_STEPS_PER_NODE).max(MIN_STALL_STEPS),
            NonZeroUsize::get,
        )
    }
}

fn invalid(name: &str, value: f64, range: &str) -> SamplingError {
    SamplingError::InvalidConfig {
        reason: format!("{name} {value} is outside {range}"),
    }
}
