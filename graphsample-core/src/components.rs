//! Connected-component analysis.
//!
//! Deletion strategies fragment the working graph and must keep only its
//! largest piece after every round; this module provides the partition and the
//! largest-component lookup they rely on.

use std::collections::BTreeSet;

use crate::{
    error::{Result, SamplingError},
    graph::Graph,
};

/// Disjoint subgraphs covering every node of the analysed graph exactly once.
#[derive(Clone, Debug, Default)]
pub struct Components {
    components: Vec<Graph>,
    largest: Option<usize>,
}

impl Components {
    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` when the analysed graph had no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates over the components in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Graph> {
        self.components.iter()
    }

    /// Returns the position of the largest component by node count.
    #[must_use]
    pub fn largest_index(&self) -> Option<usize> {
        self.largest
    }

    /// Returns the largest component.
    ///
    /// # Errors
    /// Returns [`SamplingError::NoComponents`] when the analysed graph was
    /// empty.
    pub fn largest(&self) -> Result<&Graph> {
        self.largest
            .and_then(|index| self.components.get(index))
            .ok_or(SamplingError::NoComponents)
    }

    /// Consumes the partition and returns its largest component.
    ///
    /// # Errors
    /// Returns [`SamplingError::NoComponents`] when the analysed graph was
    /// empty.
    pub fn into_largest(self) -> Result<Graph> {
        let index = self.largest.ok_or(SamplingError::NoComponents)?;
        self.components
            .into_iter()
            .nth(index)
            .ok_or(SamplingError::NoComponents)
    }
}

impl IntoIterator for Components {
    type Item = Graph;
    type IntoIter = std::vec::IntoIter<Graph>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

/// Partitions `graph` into its connected components.
///
/// Nodes are visited in ascending id order and every unvisited node seeds a
/// depth-first traversal. The first component reaching the maximum size is
/// reported as the largest.
///
/// # Examples
/// ```
/// use graphsample_core::{Graph, connected_components};
///
/// let graph = Graph::from_edges([(1, 2), (2, 3), (4, 5)]);
/// let components = connected_components(&graph);
/// assert_eq!(components.len(), 2);
/// assert_eq!(components.largest()?.number_of_nodes(), 3);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[must_use]
pub fn connected_components(graph: &Graph) -> Components {
    let mut visited = BTreeSet::new();
    let mut components = Vec::new();
    let mut largest: Option<(usize, usize)> = None;

    for node in graph.nodes() {
        if visited.contains(&node) {
            continue;
        }
        let members = graph.reachable_from(node, &mut visited);
        let size = members.len();
        if largest.is_none_or(|(_, best)| size > best) {
            largest = Some((components.len(), size));
        }
        components.push(graph.component_from(&members));
    }

    Components {
        components,
        largest: largest.map(|(index, _)| index),
    }
}

/// Returns the largest connected component of `graph`.
///
/// # Errors
/// Returns [`SamplingError::NoComponents`] when `graph` is empty.
pub fn largest_component(graph: &Graph) -> Result<Graph> {
    connected_components(graph).into_largest()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{
        graph::NodeId,
        test_utils::{assert_symmetric, raw_edges, suite_proptest_config},
    };

    fn node_sets(components: &Components) -> Vec<Vec<u64>> {
        components
            .iter()
            .map(|component| component.nodes().map(NodeId::get).collect())
            .collect()
    }

    #[rstest]
    #[case::three_components(
        vec![(1, 2), (2, 3), (4, 5), (6, 7)],
        vec![vec![1, 2, 3], vec![4, 5], vec![6, 7]],
    )]
    #[case::single_path(vec![(1, 2), (2, 3), (3, 4)], vec![vec![1, 2, 3, 4]])]
    #[case::empty(vec![], vec![])]
    fn partitions_into_expected_components(
        #[case] edges: Vec<(u64, u64)>,
        #[case] expected: Vec<Vec<u64>>,
    ) {
        let components = connected_components(&Graph::from_edges(edges));
        assert_eq!(node_sets(&components), expected);
    }

    #[test]
    fn components_carry_their_edges() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (1, 3), (4, 5)]);
        let components = connected_components(&graph);
        let edge_counts: Vec<usize> = components.iter().map(Graph::number_of_edges).collect();
        assert_eq!(edge_counts, vec![3, 1]);
    }

    #[test]
    fn isolated_nodes_form_singleton_components() {
        let mut graph = Graph::from_edges([(1, 2)]);
        graph.add_node(NodeId::new(9));
        let components = connected_components(&graph);
        assert_eq!(node_sets(&components), vec![vec![1, 2], vec![9]]);
        assert_eq!(components.largest_index(), Some(0));
    }

    #[test]
    fn first_seen_component_wins_ties() {
        let graph = Graph::from_edges([(5, 6), (1, 2)]);
        let largest = largest_component(&graph).expect("graph is not empty");
        assert!(largest.has_node(NodeId::new(1)));
    }

    #[test]
    fn largest_is_reported_by_node_count() {
        let graph = Graph::from_edges([(1, 2), (10, 11), (11, 12), (12, 13)]);
        let components = connected_components(&graph);
        assert_eq!(components.largest_index(), Some(1));
        let largest = components.into_largest().expect("non-empty");
        assert_eq!(largest.number_of_nodes(), 4);
    }

    #[test]
    fn empty_graph_has_no_largest_component() {
        let components = connected_components(&Graph::new());
        assert!(components.is_empty());
        assert_eq!(components.largest().expect_err("no components"), SamplingError::NoComponents);
        assert_eq!(
            largest_component(&Graph::new()).expect_err("no components"),
            SamplingError::NoComponents
        );
    }

    proptest! {
        #![proptest_config(suite_proptest_config(64))]

        #[test]
        fn components_partition_the_node_set(edges in raw_edges(32, 48)) {
            let graph = Graph::from_edges(edges);
            let components = connected_components(&graph);

            let mut seen = BTreeSet::new();
            let mut edge_total = 0;
            for component in components.iter() {
                assert_symmetric(component);
                edge_total += component.number_of_edges();
                for node in component.nodes() {
                    prop_assert!(seen.insert(node), "node {} appears twice", node);
                }
            }
            let all: BTreeSet<NodeId> = graph.nodes().collect();
            prop_assert_eq!(seen, all);
            prop_assert_eq!(edge_total, graph.number_of_edges());

            if let Some(index) = components.largest_index() {
                let best = components.iter().map(Graph::number_of_nodes).max();
                let chosen = components.iter().nth(index).map(Graph::number_of_nodes);
                prop_assert_eq!(chosen, best);
            }
        }
    }
}
