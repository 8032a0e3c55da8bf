//! Preservation family: grow a new graph from the read-only input.
//!
//! Node policies collect a node set and return the subgraph it induces in the
//! input. Edge policies copy only the edges they select, so the result may
//! miss edges that exist between two selected nodes.

use std::collections::BTreeSet;

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};
use tracing::{instrument, warn};

use super::{
    SamplingStrategy, config::SamplingConfig, policy::{Family, Policy, StrategyKind},
    random_neighbour, target_size,
};
use crate::{
    chooser::WeightedChooser,
    error::{Result, SamplingError},
    graph::{Edge, Graph, NodeId},
    walk::{EscapePolicy, RandomWalk},
};

/// Builds a sample by selecting nodes or edges of the input.
///
/// # Examples
/// ```
/// use graphsample_core::{
///     Policy, PreservationSampler, SamplingConfig, SamplingStrategy,
///     generators::classic::complete_graph,
/// };
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let sampler = PreservationSampler::new(Policy::RandomNode, SamplingConfig::default());
/// let sample = sampler.sample(&complete_graph(10), 0.5, &mut SmallRng::seed_from_u64(1))?;
/// assert_eq!(sample.number_of_nodes(), 5);
/// assert_eq!(sample.number_of_edges(), 10);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PreservationSampler {
    policy: Policy,
    config: SamplingConfig,
}

impl PreservationSampler {
    /// Creates a sampler for `policy`.
    #[must_use]
    pub fn new(policy: Policy, config: SamplingConfig) -> Self {
        Self { policy, config }
    }
}

impl SamplingStrategy for PreservationSampler {
    fn kind(&self) -> StrategyKind {
        StrategyKind::new(Family::Preservation, self.policy)
    }

    #[instrument(
        name = "sampling.preservation",
        err,
        skip(self, graph, rng),
        fields(policy = %self.policy, nodes = graph.number_of_nodes()),
    )]
    fn sample(&self, graph: &Graph, ratio: f64, rng: &mut SmallRng) -> Result<Graph> {
        self.config.validate()?;
        let target = target_size(graph, ratio, false)?;
        let stall_limit = self.config.stall_limit(graph.number_of_nodes());
        let selection = match self.policy {
            Policy::RandomNode => uniform_nodes(graph, target, rng),
            Policy::RandomDegreeNode => WeightedChooser::new()
                .draw_batch(graph, target, rng)?
                .into_iter()
                .collect(),
            Policy::RandomNodeNeighbour => neighbour_nodes(graph, target, false, stall_limit, rng)?,
            Policy::InclusiveRandomNodeNeighbour => {
                neighbour_nodes(graph, target, true, stall_limit, rng)?
            }
            Policy::RandomWalk | Policy::RandomWalkWithJump | Policy::RandomWalkWithRestart => {
                let escape = self.policy.walk_escape().unwrap_or_default();
                walk_nodes(graph, target, escape, &self.config, stall_limit, rng)?
            }
            Policy::RandomEdge => return uniform_edges(graph, target, rng),
            Policy::RandomNodeEdge => {
                return mixed_edges(graph, target, 1.0, stall_limit, rng);
            }
            Policy::Hybrid => {
                return mixed_edges(graph, target, self.config.hybrid_weight(), stall_limit, rng);
            }
        };
        Ok(graph.induced_subgraph(&selection))
    }
}

fn uniform_nodes(graph: &Graph, target: usize, rng: &mut SmallRng) -> BTreeSet<NodeId> {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    nodes.choose_multiple(rng, target).copied().collect()
}

/// Picks a uniform node and keeps one of its neighbours (and the node itself
/// when `inclusive`). Isolated picks keep the node so every step can make
/// progress.
fn neighbour_nodes(
    graph: &Graph,
    target: usize,
    inclusive: bool,
    stall_limit: usize,
    rng: &mut SmallRng,
) -> Result<BTreeSet<NodeId>> {
    let mut selected = BTreeSet::new();
    let mut stalled = 0;
    while selected.len() < target {
        let node = graph.pick_random_node(rng)?;
        let before = selected.len();
        match random_neighbour(graph, node, rng) {
            Some(neighbour) => {
                selected.insert(neighbour);
                if inclusive && selected.len() < target {
                    selected.insert(node);
                }
            }
            None => {
                selected.insert(node);
            }
        }
        stalled = if selected.len() > before { 0 } else { stalled + 1 };
        if stalled >= stall_limit {
            return Err(SamplingError::Exhausted {
                collected: selected.len(),
                target,
            });
        }
    }
    Ok(selected)
}

fn walk_nodes(
    graph: &Graph,
    target: usize,
    escape: EscapePolicy,
    config: &SamplingConfig,
    stall_limit: usize,
    rng: &mut SmallRng,
) -> Result<BTreeSet<NodeId>> {
    let mut walk = RandomWalk::from_random_start(graph, escape, rng)?
        .with_escape_probability(config.escape_probability())?;
    let mut selected = BTreeSet::from([walk.start()]);
    let mut stalled = 0;
    while selected.len() < target {
        let Some(node) = walk.step(graph, rng)? else {
            warn!(
                collected = selected.len(),
                target,
                node = %walk.current(),
                "random walk reached a dead end, returning partial sample"
            );
            break;
        };
        stalled = if selected.insert(node) { 0 } else { stalled + 1 };
        if stalled >= stall_limit {
            return Err(SamplingError::StuckWalk {
                node: walk.current(),
            });
        }
    }
    Ok(selected)
}

/// Copies edges in a uniformly shuffled order until the sample holds `target`
/// nodes.
fn uniform_edges(graph: &Graph, target: usize, rng: &mut SmallRng) -> Result<Graph> {
    let mut edges = graph.edge_tuples();
    edges.shuffle(rng);
    let mut sample = Graph::new();
    for edge in edges {
        if sample.number_of_nodes() >= target {
            break;
        }
        sample.add_edge(edge.first(), edge.second());
    }
    if sample.number_of_nodes() < target {
        return Err(SamplingError::Exhausted {
            collected: sample.number_of_nodes(),
            target,
        });
    }
    Ok(sample)
}

/// With probability `node_edge_weight` picks a uniform node and one of its
/// edges, otherwise a uniform edge.
fn mixed_edges(
    graph: &Graph,
    target: usize,
    node_edge_weight: f64,
    stall_limit: usize,
    rng: &mut SmallRng,
) -> Result<Graph> {
    let mut sample = Graph::new();
    let exhausted = |sample: &Graph| SamplingError::Exhausted {
        collected: sample.number_of_nodes(),
        target,
    };
    if graph.number_of_edges() == 0 {
        return Err(exhausted(&sample));
    }
    let mut stalled = 0;
    while sample.number_of_nodes() < target {
        let before = sample.number_of_nodes();
        if let Some(edge) = pick_edge(graph, node_edge_weight, rng)? {
            sample.add_edge(edge.first(), edge.second());
        }
        stalled = if sample.number_of_nodes() > before { 0 } else { stalled + 1 };
        if stalled >= stall_limit {
            return Err(exhausted(&sample));
        }
    }
    Ok(sample)
}

fn pick_edge(graph: &Graph, node_edge_weight: f64, rng: &mut SmallRng) -> Result<Option<Edge>> {
    if rng.gen_bool(node_edge_weight) {
        let node = graph.pick_random_node(rng)?;
        Ok(random_neighbour(graph, node, rng).map(|neighbour| Edge::new(node, neighbour)))
    } else {
        graph.pick_random_edge(rng).map(Some)
    }
}
