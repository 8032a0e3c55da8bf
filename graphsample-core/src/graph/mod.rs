//! Undirected graph store.
//!
//! [`Graph`] owns the node set and the adjacency lists and offers every
//! mutation and query primitive the sampling strategies need. The store keeps
//! three invariants at all times:
//!
//! - adjacency is symmetric: `b` is listed under `a` exactly when `a` is listed
//!   under `b`;
//! - every node referenced by an edge is a member of the node set;
//! - there are no self-loops and no parallel edges. [`Graph::add_edge`]
//!   silently ignores both so degree and edge counts stay exact.
//!
//! Nodes are kept in ascending id order, which makes uniform picks driven by a
//! seeded RNG reproducible from run to run.

mod node;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::error::{Result, SamplingError};

pub use self::node::{Edge, NodeId};

/// Undirected graph backed by ordered adjacency lists.
///
/// # Examples
/// ```
/// use graphsample_core::{Graph, NodeId};
///
/// let mut graph = Graph::new();
/// graph.add_edge(NodeId::new(1), NodeId::new(2));
/// graph.add_edge(NodeId::new(2), NodeId::new(3));
/// assert_eq!(graph.number_of_nodes(), 3);
/// assert_eq!(graph.number_of_edges(), 2);
/// assert_eq!(graph.node_degree(NodeId::new(2)), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw `(a, b)` pairs.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::Graph;
    ///
    /// let triangle = Graph::from_edges([(1, 2), (2, 3), (1, 3)]);
    /// assert_eq!(triangle.number_of_edges(), 3);
    /// ```
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = (u64, u64)>) -> Self {
        let mut graph = Self::new();
        graph.add_edges_from_tuples(edges);
        graph
    }

    /// Ensures `node` is a member of the node set.
    ///
    /// Returns `true` when the node was not present before.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, Vec::new());
        true
    }

    /// Adds every node yielded by `nodes`.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Inserts the undirected edge `a`-`b`, adding both endpoints first.
    ///
    /// Self-loops and edges that already exist are ignored. Returns `true` when
    /// a new edge was inserted.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{Graph, NodeId};
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add_edge(NodeId::new(1), NodeId::new(2)));
    /// assert!(!graph.add_edge(NodeId::new(2), NodeId::new(1)));
    /// assert!(!graph.add_edge(NodeId::new(3), NodeId::new(3)));
    /// assert_eq!(graph.number_of_edges(), 1);
    /// assert!(graph.has_node(NodeId::new(3)));
    /// ```
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        self.add_node(a);
        self.add_node(b);
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.push_neighbour(a, b);
        self.push_neighbour(b, a);
        true
    }

    /// Adds every `(a, b)` pair as an undirected edge.
    pub fn add_edges_from_tuples(&mut self, edges: impl IntoIterator<Item = (u64, u64)>) {
        for (a, b) in edges {
            self.add_edge(NodeId::new(a), NodeId::new(b));
        }
    }

    /// Connects `source` to every node in `neighbours`.
    ///
    /// `source` is added even when `neighbours` is empty.
    pub fn add_edges_from_neighbour_list(
        &mut self,
        source: NodeId,
        neighbours: impl IntoIterator<Item = NodeId>,
    ) {
        self.add_node(source);
        for neighbour in neighbours {
            self.add_edge(source, neighbour);
        }
    }

    /// Removes the edge `a`-`b` in both directions.
    ///
    /// Returns `false` when the edge did not exist.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let removed = self.drop_neighbour(a, b);
        self.drop_neighbour(b, a);
        removed
    }

    /// Removes `node`, every edge touching it and its adjacency entry.
    ///
    /// Returns `false` when the node was absent.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(neighbours) = self.adjacency.remove(&node) else {
            return false;
        };
        for neighbour in neighbours {
            self.drop_neighbour(neighbour, node);
        }
        true
    }

    /// Returns `true` when `node` is in the node set.
    #[must_use]
    pub fn has_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Returns `true` when the undirected edge `a`-`b` exists.
    #[must_use]
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Returns the neighbours of `node` in insertion order.
    ///
    /// Absent nodes have no neighbours.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of edges touching `node`, or zero when it is absent.
    #[must_use]
    pub fn node_degree(&self, node: NodeId) -> usize {
        self.neighbours(node).len()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over the nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates over every undirected edge once, smaller endpoint first.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&node, neighbours)| {
            neighbours
                .iter()
                .filter(move |&&neighbour| node < neighbour)
                .map(move |&neighbour| Edge::new(node, neighbour))
        })
    }

    /// Collects every undirected edge exactly once, sorted by endpoints.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{Edge, Graph};
    ///
    /// let graph = Graph::from_edges([(2, 1), (3, 2)]);
    /// assert_eq!(graph.edge_tuples(), vec![Edge::from((1, 2)), Edge::from((2, 3))]);
    /// ```
    #[must_use]
    pub fn edge_tuples(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges().collect();
        edges.sort_by_key(|edge| (edge.first(), edge.second()));
        edges
    }

    /// Returns the subgraph reachable from `start`.
    ///
    /// The result holds every reachable node and every edge between them. An
    /// absent `start` yields an empty graph.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{Graph, NodeId};
    ///
    /// let graph = Graph::from_edges([(1, 2), (2, 3), (4, 5)]);
    /// let reachable = graph.dfs(NodeId::new(1));
    /// assert_eq!(reachable.number_of_nodes(), 3);
    /// assert!(!reachable.has_node(NodeId::new(4)));
    /// ```
    #[must_use]
    pub fn dfs(&self, start: NodeId) -> Self {
        let mut visited = BTreeSet::new();
        let order = self.reachable_from(start, &mut visited);
        self.component_from(&order)
    }

    /// Returns the subgraph induced by `nodes`: the members of `nodes` present
    /// in this graph and every edge between two of them.
    #[must_use]
    pub fn induced_subgraph(&self, nodes: &BTreeSet<NodeId>) -> Self {
        let adjacency = nodes
            .iter()
            .filter_map(|node| {
                self.adjacency.get(node).map(|neighbours| {
                    let kept = neighbours
                        .iter()
                        .copied()
                        .filter(|neighbour| nodes.contains(neighbour))
                        .collect();
                    (*node, kept)
                })
            })
            .collect();
        Self { adjacency }
    }

    /// Picks a node uniformly at random.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when the graph has no nodes.
    pub fn pick_random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<NodeId> {
        if self.adjacency.is_empty() {
            return Err(SamplingError::EmptyGraph);
        }
        let index = rng.gen_range(0..self.adjacency.len());
        self.adjacency
            .keys()
            .nth(index)
            .copied()
            .ok_or(SamplingError::EmptyGraph)
    }

    /// Picks an undirected edge uniformly at random.
    ///
    /// Every edge appears once under each endpoint, so drawing an adjacency
    /// slot uniformly selects every edge with equal probability and either
    /// orientation with probability one half.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyGraph`] when the graph has no edges.
    pub fn pick_random_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Edge> {
        let slots: usize = self.adjacency.values().map(Vec::len).sum();
        if slots == 0 {
            return Err(SamplingError::EmptyGraph);
        }
        let mut offset = rng.gen_range(0..slots);
        for (&node, neighbours) in &self.adjacency {
            if let Some(&neighbour) = neighbours.get(offset) {
                return Ok(Edge::new(node, neighbour));
            }
            offset -= neighbours.len();
        }
        Err(SamplingError::EmptyGraph)
    }

    /// Merges `node` into `into`.
    ///
    /// Every edge of `node` other than the one to `into` is redirected to
    /// `into` (edges `into` already has are not duplicated) and `node` is
    /// removed, so the node count drops by one. Returns `false` without
    /// touching the graph when either node is absent or both are the same.
    ///
    /// # Examples
    /// ```
    /// use graphsample_core::{Graph, NodeId};
    ///
    /// // Path 1-2-3: merging 2 into 1 leaves the edge 1-3.
    /// let mut graph = Graph::from_edges([(1, 2), (2, 3)]);
    /// assert!(graph.contract_node(NodeId::new(2), NodeId::new(1)));
    /// assert_eq!(graph.number_of_nodes(), 2);
    /// assert!(graph.has_edge(NodeId::new(1), NodeId::new(3)));
    /// ```
    pub fn contract_node(&mut self, node: NodeId, into: NodeId) -> bool {
        if node == into || !self.has_node(into) {
            return false;
        }
        let Some(neighbours) = self.adjacency.remove(&node) else {
            return false;
        };
        for neighbour in neighbours {
            self.drop_neighbour(neighbour, node);
            if neighbour != into {
                self.add_edge(into, neighbour);
            }
        }
        true
    }

    /// Contracts `edge`, merging its second endpoint into its first.
    ///
    /// Returns `false` when the edge does not exist.
    pub fn contract_edge(&mut self, edge: Edge) -> bool {
        if !self.has_edge(edge.first(), edge.second()) {
            return false;
        }
        self.contract_node(edge.second(), edge.first())
    }

    /// Depth-first traversal from `start`, marking every reached node in
    /// `visited` and returning them in visit order.
    pub(crate) fn reachable_from(
        &self,
        start: NodeId,
        visited: &mut BTreeSet<NodeId>,
    ) -> Vec<NodeId> {
        if !self.has_node(start) || !visited.insert(start) {
            return Vec::new();
        }
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            order.push(node);
            for &neighbour in self.neighbours(node).iter().rev() {
                if visited.insert(neighbour) {
                    stack.push(neighbour);
                }
            }
        }
        order
    }

    /// Copies the adjacency entries of a closed set of nodes (a whole
    /// component) into a new graph.
    pub(crate) fn component_from(&self, nodes: &[NodeId]) -> Self {
        let adjacency = nodes
            .iter()
            .filter_map(|node| {
                self.adjacency
                    .get(node)
                    .map(|neighbours| (*node, neighbours.clone()))
            })
            .collect();
        Self { adjacency }
    }

    fn push_neighbour(&mut self, node: NodeId, neighbour: NodeId) {
        self.adjacency.entry(node).or_default().push(neighbour);
    }

    fn drop_neighbour(&mut self, node: NodeId, neighbour: NodeId) -> bool {
        let Some(neighbours) = self.adjacency.get_mut(&node) else {
            return false;
        };
        let before = neighbours.len();
        neighbours.retain(|&candidate| candidate != neighbour);
        neighbours.len() != before
    }
}

impl FromIterator<Edge> for Graph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut graph = Self::new();
        for edge in iter {
            graph.add_edge(edge.first(), edge.second());
        }
        graph
    }
}

#[cfg(test)]
mod tests;
