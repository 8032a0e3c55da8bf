//! Stateful random walk with configurable escape behaviour.
//!
//! A [`RandomWalk`] tracks an anchor (the start node) and the node it
//! currently stands on. Every [`RandomWalk::step`] moves to a uniformly chosen
//! neighbour unless the walk escapes. Jump and restart walks escape with a fixed
//! probability on every step as well as on dead ends, which keeps them from
//! circling inside a small neighbourhood.

use rand::Rng;

use crate::{
    error::{Result, SamplingError},
    graph::{Graph, NodeId},
};

/// Escape probability from Leskovec and Faloutsos, "Sampling from large
/// graphs" (KDD 2006).
pub const DEFAULT_ESCAPE_PROBABILITY: f64 = 0.15;

/// What a walk does when it escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EscapePolicy {
    /// Never escape; a dead end terminates the walk.
    #[default]
    Plain,
    /// Teleport to a uniformly random node of the graph.
    Jump,
    /// Return to the anchor node.
    Restart,
}

/// Random walk over a [`Graph`] that may change between steps.
///
/// # Examples
/// ```
/// use graphsample_core::{EscapePolicy, Graph, NodeId, RandomWalk};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let path = Graph::from_edges([(0, 1), (1, 2)]);
/// let mut walk = RandomWalk::new(NodeId::new(0), EscapePolicy::Plain);
/// let mut rng = SmallRng::seed_from_u64(3);
/// assert_eq!(walk.step(&path, &mut rng)?, Some(NodeId::new(1)));
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RandomWalk {
    start: NodeId,
    current: NodeId,
    escape: EscapePolicy,
    escape_probability: f64,
}

impl RandomWalk {
    /// Starts a walk at `start` using the default escape probability.
    #[must_use]
    pub fn new(start: NodeId, escape: EscapePolicy) -> Self {
        Self {
            start,
            current: start,
            escape,
            escape_probability: DEFAULT_ESCAPE_PROBABILITY,
        }
    }

    /// Starts a walk at a uniformly random node of `graph`.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when `graph` has no nodes.
    pub fn from_random_start<R: Rng + ?Sized>(
        graph: &Graph,
        escape: EscapePolicy,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self::new(graph.pick_random_node(rng)?, escape))
    }

    /// Overrides the per-step escape probability of jump and restart walks.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidConfig`] unless `probability` lies in
    /// `[0, 1]`.
    pub fn with_escape_probability(mut self, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SamplingError::InvalidConfig {
                reason: format!("escape probability {probability} is outside [0, 1]"),
            });
        }
        self.escape_probability = probability;
        Ok(self)
    }

    /// Anchor node a restart returns to.
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Node the walk currently stands on.
    #[must_use]
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Replaces the anchor node.
    pub fn reanchor(&mut self, node: NodeId) {
        self.start = node;
    }

    /// Advances the walk by one step and returns the node it lands on.
    ///
    /// A plain walk returns `Ok(None)` at a dead end and stays where it is. A
    /// restart walk whose anchor has been removed from `graph` is re-anchored
    /// at a uniformly random node first.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when a jump or re-anchor finds
    /// no node and [`SamplingError::StuckWalk`] when a restart lands on an
    /// anchor that has no neighbours.
    pub fn step<R: Rng + ?Sized>(&mut self, graph: &Graph, rng: &mut R) -> Result<Option<NodeId>> {
        let escapes = self.escape != EscapePolicy::Plain && rng.gen_bool(self.escape_probability);
        let neighbours = graph.neighbours(self.current);
        if !escapes && !neighbours.is_empty() {
            if let Some(&next) = neighbours.get(rng.gen_range(0..neighbours.len())) {
                self.current = next;
                return Ok(Some(next));
            }
        }
        match self.escape {
            EscapePolicy::Plain => Ok(None),
            EscapePolicy::Jump => {
                self.current = graph.pick_random_node(rng)?;
                Ok(Some(self.current))
            }
            EscapePolicy::Restart => self.restart(graph, rng).map(Some),
        }
    }

    fn restart<R: Rng + ?Sized>(&mut self, graph: &Graph, rng: &mut R) -> Result<NodeId> {
        if !graph.has_node(self.start) {
            self.start = graph.pick_random_node(rng)?;
        }
        if graph.node_degree(self.start) == 0 {
            return Err(SamplingError::StuckWalk { node: self.start });
        }
        self.current = self.start;
        Ok(self.start)
    }
}
