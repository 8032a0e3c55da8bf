//! Deterministic graph families.
//!
//! Nodes are numbered from zero. Sizes that cannot form the named shape
//! degrade to the nearest smaller one (a cycle of two nodes is a single edge).

use crate::graph::{Graph, NodeId};

/// Graph with `n` isolated nodes.
#[must_use]
pub fn empty_graph(n: u64) -> Graph {
    let mut graph = Graph::new();
    graph.add_nodes((0..n).map(NodeId::new));
    graph
}

/// Complete graph on `n` nodes: `n * (n - 1) / 2` edges.
///
/// # Examples
/// ```
/// use graphsample_core::generators::classic::complete_graph;
///
/// let k5 = complete_graph(5);
/// assert_eq!(k5.number_of_edges(), 10);
/// ```
#[must_use]
pub fn complete_graph(n: u64) -> Graph {
    let mut graph = empty_graph(n);
    for a in 0..n {
        for b in (a + 1)..n {
            graph.add_edge(NodeId::new(a), NodeId::new(b));
        }
    }
    graph
}

/// Path `0 - 1 - ... - (n - 1)`.
#[must_use]
pub fn path_graph(n: u64) -> Graph {
    let mut graph = empty_graph(n);
    for a in 1..n {
        graph.add_edge(NodeId::new(a - 1), NodeId::new(a));
    }
    graph
}

/// Path on `n` nodes closed into a ring.
#[must_use]
pub fn cycle_graph(n: u64) -> Graph {
    let mut graph = path_graph(n);
    if n > 2 {
        graph.add_edge(NodeId::new(n - 1), NodeId::new(0));
    }
    graph
}

/// Hub `0` joined to `leaves` leaf nodes `1..=leaves`.
#[must_use]
pub fn star_graph(leaves: u64) -> Graph {
    let mut graph = empty_graph(1);
    for leaf in 1..=leaves {
        graph.add_edge(NodeId::new(0), NodeId::new(leaf));
    }
    graph
}

/// Hub `0` joined to every node of a cycle over `1..n`.
#[must_use]
pub fn wheel_graph(n: u64) -> Graph {
    let mut graph = empty_graph(n.min(1));
    let rim = n.saturating_sub(1);
    for offset in 0..rim {
        let node = NodeId::new(offset + 1);
        graph.add_edge(NodeId::new(0), node);
        if offset > 0 {
            graph.add_edge(NodeId::new(offset), node);
        }
    }
    if rim > 2 {
        graph.add_edge(NodeId::new(rim), NodeId::new(1));
    }
    graph
}

/// Two parallel paths of `length` nodes (`0..length` and
/// `length..2 * length`) joined by a rung at every position.
#[must_use]
pub fn ladder_graph(length: u64) -> Graph {
    let mut graph = empty_graph(2 * length);
    for offset in 0..length {
        let top = NodeId::new(offset);
        let bottom = NodeId::new(offset + length);
        graph.add_edge(top, bottom);
        if offset > 0 {
            graph.add_edge(NodeId::new(offset - 1), top);
            graph.add_edge(NodeId::new(offset + length - 1), bottom);
        }
    }
    graph
}

/// Ladder whose two rails are closed into rings.
#[must_use]
pub fn circular_ladder_graph(length: u64) -> Graph {
    let mut graph = ladder_graph(length);
    if length > 2 {
        graph.add_edge(NodeId::new(0), NodeId::new(length - 1));
        graph.add_edge(NodeId::new(length), NodeId::new(2 * length - 1));
    }
    graph
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{assert_symmetric, is_connected};

    #[rstest]
    #[case::empty(empty_graph(4), 4, 0)]
    #[case::complete(complete_graph(6), 6, 15)]
    #[case::single_node_complete(complete_graph(1), 1, 0)]
    #[case::path(path_graph(5), 5, 4)]
    #[case::cycle(cycle_graph(5), 5, 5)]
    #[case::short_cycle(cycle_graph(2), 2, 1)]
    #[case::star(star_graph(4), 5, 4)]
    #[case::wheel(wheel_graph(6), 6, 10)]
    #[case::ladder(ladder_graph(4), 8, 10)]
    #[case::circular_ladder(circular_ladder_graph(4), 8, 12)]
    fn builds_expected_shape(#[case] graph: Graph, #[case] nodes: usize, #[case] edges: usize) {
        assert_symmetric(&graph);
        assert_eq!(graph.number_of_nodes(), nodes);
        assert_eq!(graph.number_of_edges(), edges);
    }

    #[rstest]
    #[case::complete(complete_graph(7))]
    #[case::cycle(cycle_graph(9))]
    #[case::wheel(wheel_graph(5))]
    #[case::circular_ladder(circular_ladder_graph(3))]
    fn connected_families_are_connected(#[case] graph: Graph) {
        assert!(is_connected(&graph));
    }

    #[test]
    fn wheel_hub_touches_every_rim_node() {
        let wheel = wheel_graph(8);
        assert_eq!(wheel.node_degree(NodeId::new(0)), 7);
        assert!((1..8).all(|rim| wheel.node_degree(NodeId::new(rim)) == 3));
    }
}
