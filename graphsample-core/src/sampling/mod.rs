//! Sampling strategies.
//!
//! Every strategy reduces a graph of `n` nodes to about `floor(n * ratio)`
//! nodes. The three families differ in how they get there:
//!
//! - [`Family::Preservation`] grows a new graph from elements selected in the
//!   read-only input;
//! - [`Family::Deletion`] removes elements from a private copy and keeps only
//!   its largest connected component after every round;
//! - [`Family::Contraction`] merges elements of a private copy into their
//!   neighbours.
//!
//! All families share the [`Policy`] vocabulary, so a strategy is identified
//! by a [`StrategyKind`] and instantiated through [`StrategyKind::build`].

mod config;
mod contraction;
mod deletion;
mod policy;
mod preservation;

use std::fmt;

use rand::{Rng, rngs::SmallRng};

pub use self::{
    config::{DEFAULT_BATCH_FRACTION, DEFAULT_HYBRID_WEIGHT, SamplingConfig},
    contraction::ContractionSampler,
    deletion::DeletionSampler,
    policy::{Family, Policy, StrategyKind},
    preservation::PreservationSampler,
};
use crate::{
    error::{Result, SamplingError},
    graph::{Graph, NodeId},
};

/// Reduces a graph to a smaller representative graph.
///
/// Implementations never mutate `graph`; mutating families work on a private
/// copy.
pub trait SamplingStrategy: fmt::Debug {
    /// Returns the family and policy this strategy implements.
    fn kind(&self) -> StrategyKind;

    /// Samples `graph` down to `floor(n * ratio)` nodes.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidConfig`] when the sampler's
    /// [`SamplingConfig`] is out of range, [`SamplingError::EmptyGraph`] for
    /// an empty input, [`SamplingError::InvalidRatio`] when the ratio is
    /// outside `(0, 1]` or the target size is zero, and family-specific
    /// errors when the target cannot be reached.
    fn sample(&self, graph: &Graph, ratio: f64, rng: &mut SmallRng) -> Result<Graph>;
}

/// Returns `floor(graph.number_of_nodes() * ratio)`.
///
/// Shrinking families also reject targets that would leave the input
/// untouched.
pub(crate) fn target_size(graph: &Graph, ratio: f64, shrinking: bool) -> Result<usize> {
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(invalid_ratio(ratio, "ratio must lie in (0, 1]"));
    }
    if graph.is_empty() {
        return Err(SamplingError::EmptyGraph);
    }
    let nodes = graph.number_of_nodes();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "ratio lies in (0, 1] so the product is bounded by the node count"
    )]
    let target = ((nodes as f64) * ratio).floor() as usize;
    if target == 0 {
        return Err(invalid_ratio(
            ratio,
            &format!("target size rounds to zero for {nodes} nodes"),
        ));
    }
    if shrinking && target >= nodes {
        return Err(invalid_ratio(
            ratio,
            &format!("target size {target} leaves nothing to remove from {nodes} nodes"),
        ));
    }
    Ok(target.min(nodes))
}

fn invalid_ratio(ratio: f64, reason: &str) -> SamplingError {
    SamplingError::InvalidRatio {
        ratio,
        reason: reason.to_owned(),
    }
}

/// Returns a uniformly chosen neighbour of `node`, if it has any.
pub(crate) fn random_neighbour<R: Rng + ?Sized>(
    graph: &Graph,
    node: NodeId,
    rng: &mut R,
) -> Option<NodeId> {
    let neighbours = graph.neighbours(node);
    if neighbours.is_empty() {
        return None;
    }
    neighbours.get(rng.gen_range(0..neighbours.len())).copied()
}
