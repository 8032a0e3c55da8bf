//! Builder utilities for configuring graph sampling.
//!
//! Collects the strategy, seed and tuning parameters and validates them before
//! constructing a [`Sampler`].

use std::num::NonZeroUsize;

use crate::{
    Result,
    sampler::Sampler,
    sampling::{SamplingConfig, StrategyKind},
};

/// Configures and constructs [`Sampler`] instances.
///
/// # Examples
/// ```
/// use graphsample_core::{Family, Policy, SamplerBuilder, StrategyKind};
///
/// let sampler = SamplerBuilder::new()
///     .with_strategy(StrategyKind::new(Family::Deletion, Policy::RandomEdge))
///     .with_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(sampler.strategy().family(), Family::Deletion);
/// assert_eq!(sampler.seed(), Some(7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SamplerBuilder {
    strategy: StrategyKind,
    seed: Option<u64>,
    config: SamplingConfig,
}

impl SamplerBuilder {
    /// Creates a builder for preservation random-node sampling with default
    /// parameters and an entropy-seeded RNG.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{SamplerBuilder, StrategyKind};
    ///
    /// let builder = SamplerBuilder::new();
    /// assert_eq!(builder.strategy(), StrategyKind::default());
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the family and policy to run.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Fixes the RNG seed so runs are reproducible.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::SamplerBuilder;
    ///
    /// let builder = SamplerBuilder::new().with_seed(42);
    /// assert_eq!(builder.seed(), Some(42));
    /// ```
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Replaces every tuning parameter at once.
    #[must_use]
    pub fn with_config(mut self, config: SamplingConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the tuning parameters.
    #[must_use]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Overrides the deletion batch fraction.
    #[must_use]
    pub fn with_batch_fraction(mut self, fraction: f64) -> Self {
        self.config = self.config.with_batch_fraction(fraction);
        self
    }

    /// Overrides the walk escape probability.
    #[must_use]
    pub fn with_escape_probability(mut self, probability: f64) -> Self {
        self.config = self.config.with_escape_probability(probability);
        self
    }

    /// Overrides the hybrid mixing weight.
    #[must_use]
    pub fn with_hybrid_weight(mut self, weight: f64) -> Self {
        self.config = self.config.with_hybrid_weight(weight);
        self
    }

    /// Caps the number of fruitless steps before a run is abandoned.
    #[must_use]
    pub fn with_max_stalled_steps(mut self, steps: NonZeroUsize) -> Self {
        self.config = self.config.with_max_stalled_steps(Some(steps));
        self
    }

    /// Validates the configuration and constructs a [`Sampler`].
    ///
    /// # Errors
    /// Returns [`crate::SamplingError::InvalidConfig`] when a tuning parameter
    /// is out of range.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{SamplerBuilder, SamplingErrorCode};
    ///
    /// let err = SamplerBuilder::new().with_batch_fraction(0.0).build().unwrap_err();
    /// assert_eq!(err.code(), SamplingErrorCode::InvalidConfig);
    /// ```
    pub fn build(self) -> Result<Sampler> {
        self.config.validate()?;
        Ok(Sampler::new(self.strategy, self.seed, self.config))
    }
}
