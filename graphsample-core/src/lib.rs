//! Graph sampling core library.
//!
//! Reduces an undirected graph to a smaller representative graph using one of
//! three sampling families (preservation, deletion and contraction) over a
//! shared vocabulary of node, edge and random-walk selection policies.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod chooser;
mod components;
mod error;
pub mod generators;
mod graph;
mod sampler;
mod sampling;
mod walk;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::SamplerBuilder,
    chooser::WeightedChooser,
    components::{Components, connected_components, largest_component},
    error::{Result, SamplingError, SamplingErrorCode},
    graph::{Edge, Graph, NodeId},
    sampler::Sampler,
    sampling::{
        ContractionSampler, DEFAULT_BATCH_FRACTION, DEFAULT_HYBRID_WEIGHT, DeletionSampler,
        Family, Policy, PreservationSampler, SamplingConfig, SamplingStrategy, StrategyKind,
    },
    walk::{DEFAULT_ESCAPE_PROBABILITY, EscapePolicy, RandomWalk},
};
