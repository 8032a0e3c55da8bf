//! Degree-weighted node selection without replacement.
//!
//! Each draw weighs the remaining candidates by their *current* degree, so a
//! caller that removes nodes or edges between draws automatically sees the
//! updated distribution. Nodes returned earlier in the same batch are excluded
//! from later draws.

use std::collections::BTreeSet;

use rand::{
    Rng,
    distributions::{Distribution, WeightedError, WeightedIndex},
};

use crate::{
    error::{Result, SamplingError},
    graph::{Graph, NodeId},
};

/// Draws nodes with probability proportional to their degree.
///
/// # Examples
/// ```
/// use graphsample_core::{Graph, NodeId, WeightedChooser};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let star = Graph::from_edges([(0, 1), (0, 2), (0, 3)]);
/// let mut chooser = WeightedChooser::new();
/// let mut rng = SmallRng::seed_from_u64(7);
/// let batch = chooser.draw_batch(&star, 4, &mut rng)?;
/// assert_eq!(batch.len(), 4);
/// assert!(chooser.has_drawn(NodeId::new(0)));
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct WeightedChooser {
    drawn: BTreeSet<NodeId>,
}

impl WeightedChooser {
    /// Creates a chooser with an empty exclusion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `node` was returned earlier in this batch.
    #[must_use]
    pub fn has_drawn(&self, node: NodeId) -> bool {
        self.drawn.contains(&node)
    }

    /// Returns how many nodes this batch has produced so far.
    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// Clears the exclusion set so a new batch can start.
    pub fn reset(&mut self) {
        self.drawn.clear();
    }

    /// Draws one node of `graph`, weighted by degree, that has not been drawn
    /// yet in this batch.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when no undrawn node remains and
    /// [`SamplingError::EmptyCandidateSet`] when every undrawn node is
    /// isolated.
    pub fn draw<R: Rng + ?Sized>(&mut self, graph: &Graph, rng: &mut R) -> Result<NodeId> {
        let (candidates, weights): (Vec<NodeId>, Vec<usize>) = graph
            .nodes()
            .filter(|node| !self.drawn.contains(node))
            .map(|node| (node, graph.node_degree(node)))
            .unzip();
        let index = WeightedIndex::new(&weights).map_err(|err| match err {
            WeightedError::NoItem => SamplingError::EmptyGraph,
            _ => SamplingError::EmptyCandidateSet,
        })?;
        let node = candidates
            .get(index.sample(rng))
            .copied()
            .ok_or(SamplingError::EmptyCandidateSet)?;
        self.drawn.insert(node);
        Ok(node)
    }

    /// Draws one node, falling back to a uniform pick among the undrawn nodes
    /// when all of them are isolated.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when no undrawn node remains.
    pub fn draw_or_uniform<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        rng: &mut R,
    ) -> Result<NodeId> {
        match self.draw(graph, rng) {
            Err(SamplingError::EmptyCandidateSet) => self.draw_uniform(graph, rng),
            other => other,
        }
    }

    /// Draws `count` distinct nodes from a graph that does not change between
    /// draws, using [`Self::draw_or_uniform`] for each one.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when `count` exceeds the number of
    /// undrawn nodes.
    pub fn draw_batch<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<NodeId>> {
        (0..count)
            .map(|_| self.draw_or_uniform(graph, rng))
            .collect()
    }

    fn draw_uniform<R: Rng + ?Sized>(&mut self, graph: &Graph, rng: &mut R) -> Result<NodeId> {
        // Drawn nodes may already be gone from `graph`, so count what is left.
        let candidates: Vec<NodeId> = graph
            .nodes()
            .filter(|node| !self.drawn.contains(node))
            .collect();
        if candidates.is_empty() {
            return Err(SamplingError::EmptyGraph);
        }
        let node = candidates
            .get(rng.gen_range(0..candidates.len()))
            .copied()
            .ok_or(SamplingError::EmptyGraph)?;
        self.drawn.insert(node);
        Ok(node)
    }
}
