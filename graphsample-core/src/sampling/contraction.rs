//! Contraction family: merge elements of a private copy into neighbours.
//!
//! Every contraction removes exactly one node while keeping the merged node's
//! other edges, so connectivity and most of the degree mass survive. Nodes
//! without a neighbour to merge into are removed instead.

use rand::{Rng, rngs::SmallRng};
use tracing::{instrument, trace};

use super::{
    SamplingStrategy, config::SamplingConfig, policy::{Family, Policy, StrategyKind},
    random_neighbour, target_size,
};
use crate::{
    chooser::WeightedChooser,
    error::{Result, SamplingError},
    graph::{Graph, NodeId},
    walk::{EscapePolicy, RandomWalk},
};

/// Samples by contracting nodes or edges of a copy of the input.
///
/// # Examples
/// ```
/// use graphsample_core::{
///     ContractionSampler, Policy, SamplingConfig, SamplingStrategy,
///     generators::classic::wheel_graph,
/// };
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let sampler = ContractionSampler::new(Policy::RandomEdge, SamplingConfig::default());
/// let sample = sampler.sample(&wheel_graph(12), 0.5, &mut SmallRng::seed_from_u64(5))?;
/// assert_eq!(sample.number_of_nodes(), 6);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ContractionSampler {
    policy: Policy,
    config: SamplingConfig,
}

impl ContractionSampler {
    /// Creates a sampler for `policy`.
    #[must_use]
    pub fn new(policy: Policy, config: SamplingConfig) -> Self {
        Self { policy, config }
    }
}

impl SamplingStrategy for ContractionSampler {
    fn kind(&self) -> StrategyKind {
        StrategyKind::new(Family::Contraction, self.policy)
    }

    #[instrument(
        name = "sampling.contraction",
        err,
        skip(self, graph, rng),
        fields(policy = %self.policy, nodes = graph.number_of_nodes()),
    )]
    fn sample(&self, graph: &Graph, ratio: f64, rng: &mut SmallRng) -> Result<Graph> {
        self.config.validate()?;
        let target = target_size(graph, ratio, true)?;
        let stall_limit = self.config.stall_limit(graph.number_of_nodes());
        let mut contractor = Contractor {
            graph: graph.clone(),
            target,
            walk: None,
        };
        let mut stalled = 0;
        while contractor.graph.number_of_nodes() > target {
            let before = contractor.graph.number_of_nodes();
            contractor.step(self.policy, &self.config, rng)?;
            stalled = if contractor.graph.number_of_nodes() < before {
                0
            } else {
                stalled + 1
            };
            if stalled >= stall_limit {
                return Err(SamplingError::Stalled {
                    remaining: contractor.graph.number_of_nodes(),
                    target,
                });
            }
        }
        Ok(contractor.graph)
    }
}

struct Contractor {
    graph: Graph,
    target: usize,
    walk: Option<RandomWalk>,
}

impl Contractor {
    fn step(&mut self, policy: Policy, config: &SamplingConfig, rng: &mut SmallRng) -> Result<()> {
        match policy {
            Policy::RandomNode => {
                let node = self.graph.pick_random_node(rng)?;
                self.merge_into_neighbour(node, rng);
            }
            Policy::RandomDegreeNode => {
                let node = WeightedChooser::new().draw_or_uniform(&self.graph, rng)?;
                self.merge_into_neighbour(node, rng);
            }
            Policy::RandomEdge => self.contract_random_edge(rng)?,
            Policy::RandomNodeEdge => self.contract_node_edge(rng)?,
            Policy::RandomNodeNeighbour => {
                let node = self.graph.pick_random_node(rng)?;
                match random_neighbour(&self.graph, node, rng) {
                    Some(neighbour) => self.merge_into_neighbour(neighbour, rng),
                    None => {
                        self.graph.remove_node(node);
                    }
                }
            }
            Policy::InclusiveRandomNodeNeighbour => {
                let node = self.graph.pick_random_node(rng)?;
                if let Some(neighbour) = random_neighbour(&self.graph, node, rng) {
                    self.merge_into_neighbour(neighbour, rng);
                }
                if self.graph.number_of_nodes() > self.target && self.graph.has_node(node) {
                    self.merge_into_neighbour(node, rng);
                }
            }
            Policy::Hybrid => {
                if rng.gen_bool(config.hybrid_weight()) {
                    self.contract_node_edge(rng)?;
                } else {
                    self.contract_random_edge(rng)?;
                }
            }
            Policy::RandomWalk | Policy::RandomWalkWithJump | Policy::RandomWalkWithRestart => {
                let escape = policy.walk_escape().unwrap_or_default();
                self.walk_step(escape, config, rng)?;
            }
        }
        Ok(())
    }

    /// Merges `node` into a uniform neighbour, or removes it when isolated.
    fn merge_into_neighbour(&mut self, node: NodeId, rng: &mut SmallRng) {
        match random_neighbour(&self.graph, node, rng) {
            Some(into) => {
                self.graph.contract_node(node, into);
            }
            None => {
                trace!(%node, "removing isolated node");
                self.graph.remove_node(node);
            }
        }
    }

    fn contract_random_edge(&mut self, rng: &mut SmallRng) -> Result<()> {
        match self.graph.pick_random_edge(rng) {
            Ok(edge) => {
                self.graph.contract_edge(edge);
            }
            Err(SamplingError::EmptyGraph) => {
                let node = self.graph.pick_random_node(rng)?;
                self.graph.remove_node(node);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Picks a uniform node and merges one of its neighbours into it.
    fn contract_node_edge(&mut self, rng: &mut SmallRng) -> Result<()> {
        let node = self.graph.pick_random_node(rng)?;
        match random_neighbour(&self.graph, node, rng) {
            Some(neighbour) => {
                self.graph.contract_node(neighbour, node);
            }
            None => {
                self.graph.remove_node(node);
            }
        }
        Ok(())
    }

    /// Advances the walk and merges the node it leaves into the node it
    /// reaches. Escapes move the walk without contracting.
    fn walk_step(
        &mut self,
        escape: EscapePolicy,
        config: &SamplingConfig,
        rng: &mut SmallRng,
    ) -> Result<()> {
        let mut walk = match self.walk.take() {
            Some(walk) if self.graph.has_node(walk.current()) => walk,
            _ => RandomWalk::from_random_start(&self.graph, escape, rng)?
                .with_escape_probability(config.escape_probability())?,
        };
        let previous = walk.current();
        match walk.step(&self.graph, rng) {
            Ok(Some(next)) => {
                let merged =
                    self.graph.has_edge(previous, next) && self.graph.contract_node(previous, next);
                if merged && walk.start() == previous {
                    walk.reanchor(next);
                }
                self.walk = Some(walk);
            }
            Ok(None) => {
                self.graph.remove_node(previous);
            }
            Err(SamplingError::StuckWalk { node }) => {
                self.graph.remove_node(node);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::classic::{path_graph, star_graph},
        test_utils::seeded,
    };

    #[test]
    fn walk_anchor_follows_merges() {
        let mut contractor = Contractor {
            graph: path_graph(2),
            target: 1,
            walk: Some(
                RandomWalk::new(NodeId::new(0), EscapePolicy::Restart)
                    .with_escape_probability(0.0)
                    .expect("valid probability"),
            ),
        };
        let config = SamplingConfig::default().with_escape_probability(0.0);
        contractor
            .step(Policy::RandomWalkWithRestart, &config, &mut seeded(1))
            .expect("edge to walk along");
        let walk = contractor.walk.expect("walk survives the merge");
        assert_eq!(walk.start(), NodeId::new(1));
        assert_eq!(walk.current(), NodeId::new(1));
        assert_eq!(contractor.graph.number_of_nodes(), 1);
    }

    #[test]
    fn isolated_nodes_are_removed() {
        let mut graph = star_graph(2);
        graph.add_node(NodeId::new(9));
        graph.remove_node(NodeId::new(0));
        let mut contractor = Contractor {
            graph,
            target: 0,
            walk: None,
        };
        contractor.merge_into_neighbour(NodeId::new(9), &mut seeded(2));
        assert!(!contractor.graph.has_node(NodeId::new(9)));
        assert_eq!(contractor.graph.number_of_nodes(), 2);
    }
}
