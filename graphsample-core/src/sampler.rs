//! Sampling entry point.
//!
//! [`Sampler`] owns a validated configuration, seeds one RNG per call and
//! dispatches to the strategy selected at build time.

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    graph::Graph,
    sampling::{SamplingConfig, SamplingStrategy, StrategyKind},
};

/// Runs the configured sampling strategy.
///
/// # Examples
/// ```
/// use graphsample_core::{SamplerBuilder, generators::classic::complete_graph};
///
/// let sampler = SamplerBuilder::new().with_seed(1).build()?;
/// let sample = sampler.sample(&complete_graph(10), 0.5)?;
/// assert_eq!(sample.number_of_nodes(), 5);
/// assert_eq!(sample.number_of_edges(), 10);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Debug)]
pub struct Sampler {
    kind: StrategyKind,
    seed: Option<u64>,
    config: SamplingConfig,
    strategy: Box<dyn SamplingStrategy>,
}

impl Sampler {
    pub(crate) fn new(kind: StrategyKind, seed: Option<u64>, config: SamplingConfig) -> Self {
        Self {
            kind,
            seed,
            config,
            strategy: kind.build(config),
        }
    }

    /// Returns the family and policy this sampler runs.
    #[must_use]
    pub fn strategy(&self) -> StrategyKind {
        self.kind
    }

    /// Returns the fixed seed, or `None` when each call draws from entropy.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the validated tuning parameters.
    #[must_use]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Samples `graph` down to `floor(n * ratio)` nodes.
    ///
    /// A fixed seed makes the result reproducible. `graph` is never mutated.
    ///
    /// # Errors
    /// Propagates every [`crate::SamplingError`] raised by the strategy.
    pub fn sample(&self, graph: &Graph, ratio: f64) -> Result<Graph> {
        let mut rng = self
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        self.sample_with_rng(graph, ratio, &mut rng)
    }

    /// Samples `graph` using a caller-supplied RNG.
    ///
    /// # Errors
    /// Propagates every [`crate::SamplingError`] raised by the strategy.
    #[instrument(
        name = "core.sample",
        err,
        skip(self, graph, rng),
        fields(
            strategy = %self.kind,
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            ratio = ratio,
        ),
    )]
    pub fn sample_with_rng(&self, graph: &Graph, ratio: f64, rng: &mut SmallRng) -> Result<Graph> {
        let sample = self.strategy.sample(graph, ratio, rng)?;
        info!(
            nodes = sample.number_of_nodes(),
            edges = sample.number_of_edges(),
            "sampling completed"
        );
        Ok(sample)
    }
}
