//! Deletion family: shrink a private copy round by round.
//!
//! Each round removes a batch of `max(1, floor(batch_fraction * remaining))`
//! elements and then keeps only the largest connected component, so the
//! result is always a single connected graph. A disconnected input is reduced
//! to its largest component before the first round.

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, instrument, warn};

use super::{
    SamplingStrategy, config::SamplingConfig, policy::{Family, Policy, StrategyKind},
    random_neighbour, target_size,
};
use crate::{
    chooser::WeightedChooser,
    components::{connected_components, largest_component},
    error::{Result, SamplingError},
    graph::{Graph, NodeId},
    walk::RandomWalk,
};

/// Samples by deleting nodes or edges from a copy of the input.
///
/// # Examples
/// ```
/// use graphsample_core::{
///     DeletionSampler, Policy, SamplingConfig, SamplingStrategy, connected_components,
///     generators::classic::cycle_graph,
/// };
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let sampler = DeletionSampler::new(Policy::RandomNode, SamplingConfig::default());
/// let sample = sampler.sample(&cycle_graph(40), 0.5, &mut SmallRng::seed_from_u64(3))?;
/// assert!(sample.number_of_nodes() <= 20);
/// assert_eq!(connected_components(&sample).len(), 1);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DeletionSampler {
    policy: Policy,
    config: SamplingConfig,
}

impl DeletionSampler {
    /// Creates a sampler for `policy`.
    #[must_use]
    pub fn new(policy: Policy, config: SamplingConfig) -> Self {
        Self { policy, config }
    }

    fn batch_size(&self, remaining: usize, target: usize) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss,
            reason = "batch fraction lies in (0, 1] so the batch never exceeds the node count"
        )]
        let batch = ((remaining as f64) * self.config.batch_fraction()).floor() as usize;
        let batch = batch.max(1);
        if self.policy.selects_edges() {
            batch
        } else {
            batch.min(remaining - target)
        }
    }
}

impl SamplingStrategy for DeletionSampler {
    fn kind(&self) -> StrategyKind {
        StrategyKind::new(Family::Deletion, self.policy)
    }

    #[instrument(
        name = "sampling.deletion",
        err,
        skip(self, graph, rng),
        fields(policy = %self.policy, nodes = graph.number_of_nodes()),
    )]
    fn sample(&self, graph: &Graph, ratio: f64, rng: &mut SmallRng) -> Result<Graph> {
        self.config.validate()?;
        let target = target_size(graph, ratio, true)?;
        let components = connected_components(graph);
        let mut working = if components.len() > 1 {
            warn!(
                components = components.len(),
                "input graph is disconnected, sampling its largest component"
            );
            components.into_largest()?
        } else {
            graph.clone()
        };

        let mut round = Round {
            policy: self.policy,
            config: &self.config,
            stall_limit: self.config.stall_limit(graph.number_of_nodes()),
            walk: None,
        };
        let mut stalled = 0;
        let mut rounds = 0_usize;
        while working.number_of_nodes() > target {
            let remaining = working.number_of_nodes();
            let edges = working.number_of_edges();
            let batch = self.batch_size(remaining, target);
            round.delete_batch(&mut working, batch, target, rng)?;
            working = largest_component(&working)?;
            rounds += 1;
            debug!(
                round = rounds,
                batch,
                removed = remaining - working.number_of_nodes(),
                remaining = working.number_of_nodes(),
                target,
                "deletion round completed"
            );

            let progressed =
                working.number_of_nodes() < remaining || working.number_of_edges() < edges;
            stalled = if progressed { 0 } else { stalled + 1 };
            if stalled >= round.stall_limit {
                return Err(SamplingError::Stalled {
                    remaining: working.number_of_nodes(),
                    target,
                });
            }
        }
        Ok(working)
    }
}

/// State carried from one deletion round to the next.
struct Round<'a> {
    policy: Policy,
    config: &'a SamplingConfig,
    stall_limit: usize,
    walk: Option<RandomWalk>,
}

impl Round<'_> {
    fn delete_batch(
        &mut self,
        graph: &mut Graph,
        batch: usize,
        target: usize,
        rng: &mut SmallRng,
    ) -> Result<()> {
        match self.policy {
            Policy::RandomNode => {
                let nodes: Vec<NodeId> = graph.nodes().collect();
                for &node in nodes.choose_multiple(rng, batch) {
                    graph.remove_node(node);
                }
            }
            Policy::RandomDegreeNode => {
                let mut chooser = WeightedChooser::new();
                for _ in 0..batch {
                    let node = chooser.draw_or_uniform(graph, rng)?;
                    graph.remove_node(node);
                }
            }
            Policy::RandomNodeNeighbour => {
                for _ in 0..batch {
                    let node = graph.pick_random_node(rng)?;
                    let victim = random_neighbour(graph, node, rng).unwrap_or(node);
                    graph.remove_node(victim);
                }
            }
            Policy::InclusiveRandomNodeNeighbour => {
                let mut removed = 0;
                while removed < batch {
                    let node = graph.pick_random_node(rng)?;
                    if let Some(neighbour) = random_neighbour(graph, node, rng) {
                        graph.remove_node(neighbour);
                        removed += 1;
                    }
                    if removed < batch {
                        graph.remove_node(node);
                        removed += 1;
                    }
                }
            }
            Policy::RandomEdge => {
                let edges = graph.edge_tuples();
                for edge in edges.choose_multiple(rng, batch) {
                    graph.remove_edge(edge.first(), edge.second());
                }
            }
            Policy::RandomNodeEdge => delete_edges(graph, batch, 1.0, rng)?,
            Policy::Hybrid => {
                let weight = self.config.hybrid_weight();
                delete_edges(graph, batch, weight, rng)?;
            }
            Policy::RandomWalk | Policy::RandomWalkWithJump | Policy::RandomWalkWithRestart => {
                self.delete_walked(graph, batch, target, rng)?;
            }
        }
        Ok(())
    }

    /// Walks the graph and deletes every node the walk leaves behind.
    fn delete_walked(
        &mut self,
        graph: &mut Graph,
        batch: usize,
        target: usize,
        rng: &mut SmallRng,
    ) -> Result<()> {
        let escape = self.policy.walk_escape().unwrap_or_default();
        let mut removed = 0;
        let mut steps = 0;
        while removed < batch {
            steps += 1;
            if steps > self.stall_limit {
                return Err(SamplingError::Stalled {
                    remaining: graph.number_of_nodes(),
                    target,
                });
            }
            let mut walk = match self.walk.take() {
                Some(walk) if graph.has_node(walk.current()) => walk,
                _ => RandomWalk::from_random_start(graph, escape, rng)?
                    .with_escape_probability(self.config.escape_probability())?,
            };
            let previous = walk.current();
            match walk.step(graph, rng) {
                Ok(Some(next)) if next != previous => {
                    graph.remove_node(previous);
                    removed += 1;
                    self.walk = Some(walk);
                }
                Ok(Some(_)) => self.walk = Some(walk),
                // Dead ends and stuck restarts sit on isolated nodes that the
                // component pass would drop anyway.
                Ok(None) => {
                    graph.remove_node(previous);
                    removed += 1;
                }
                Err(SamplingError::StuckWalk { node }) => {
                    graph.remove_node(node);
                    removed += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

/// Removes `batch` edges, each picked through a uniform node with
/// probability `node_edge_weight` and uniformly otherwise.
fn delete_edges(
    graph: &mut Graph,
    batch: usize,
    node_edge_weight: f64,
    rng: &mut SmallRng,
) -> Result<()> {
    for _ in 0..batch {
        if graph.number_of_edges() == 0 {
            break;
        }
        if rng.gen_bool(node_edge_weight) {
            let node = graph.pick_random_node(rng)?;
            if let Some(neighbour) = random_neighbour(graph, node, rng) {
                graph.remove_edge(node, neighbour);
            }
        } else {
            let edge = graph.pick_random_edge(rng)?;
            graph.remove_edge(edge.first(), edge.second());
        }
    }
    Ok(())
}
