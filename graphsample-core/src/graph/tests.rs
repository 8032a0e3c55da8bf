//! Unit tests for the graph store primitives.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rstest::rstest;

use super::{Edge, Graph, NodeId};
use crate::{
    error::SamplingError,
    generators::classic::complete_graph,
    test_utils::{assert_symmetric, raw_edges, seeded, suite_proptest_config},
};

fn n(id: u64) -> NodeId {
    NodeId::new(id)
}

fn adjacency(graph: &Graph) -> BTreeMap<u64, Vec<u64>> {
    graph
        .nodes()
        .map(|node| {
            let neighbours = graph.neighbours(node).iter().map(|id| id.get()).collect();
            (node.get(), neighbours)
        })
        .collect()
}

fn node_ids(graph: &Graph) -> Vec<u64> {
    graph.nodes().map(NodeId::get).collect()
}

#[test]
fn add_edge_to_empty_graph_adds_both_directions() {
    let mut graph = Graph::new();
    assert!(graph.add_edge(n(1), n(2)));

    assert_eq!(node_ids(&graph), vec![1, 2]);
    assert_eq!(
        adjacency(&graph),
        BTreeMap::from([(1, vec![2]), (2, vec![1])])
    );
}

#[test]
fn add_edge_appends_in_insertion_order() {
    let mut graph = Graph::from_edges([(1, 2), (2, 3)]);
    graph.add_edge(n(3), n(1));

    assert_eq!(
        adjacency(&graph),
        BTreeMap::from([(1, vec![2, 3]), (2, vec![1, 3]), (3, vec![2, 1])])
    );
}

#[rstest]
#[case::same_direction(1, 2)]
#[case::reverse_direction(2, 1)]
fn add_edge_ignores_duplicates(#[case] a: u64, #[case] b: u64) {
    let mut graph = Graph::from_edges([(1, 2)]);
    assert!(!graph.add_edge(n(a), n(b)));
    assert_eq!(graph.number_of_edges(), 1);
    assert_eq!(graph.node_degree(n(1)), 1);
    assert_eq!(graph.node_degree(n(2)), 1);
}

#[test]
fn add_edge_ignores_self_loops_but_keeps_node() {
    let mut graph = Graph::new();
    assert!(!graph.add_edge(n(4), n(4)));
    assert!(graph.has_node(n(4)));
    assert_eq!(graph.node_degree(n(4)), 0);
    assert_eq!(graph.number_of_edges(), 0);
}

#[test]
fn add_node_is_idempotent() {
    let mut graph = Graph::from_edges([(1, 2)]);
    assert!(!graph.add_node(n(2)));
    assert!(graph.add_node(n(3)));
    assert_eq!(node_ids(&graph), vec![1, 2, 3]);
    assert_eq!(graph.neighbours(n(2)), &[n(1)]);
}

#[test]
fn neighbour_list_helper_adds_isolated_source() {
    let mut graph = Graph::new();
    graph.add_edges_from_neighbour_list(n(0), [n(1), n(2)]);
    graph.add_edges_from_neighbour_list(n(5), []);
    assert_eq!(node_ids(&graph), vec![0, 1, 2, 5]);
    assert_eq!(graph.number_of_edges(), 2);
}

#[rstest]
#[case::present(1, 2, true)]
#[case::reversed(2, 1, true)]
#[case::missing(1, 3, false)]
#[case::absent_nodes(8, 9, false)]
fn remove_edge_reports_whether_it_existed(#[case] a: u64, #[case] b: u64, #[case] existed: bool) {
    let mut graph = Graph::from_edges([(1, 2), (2, 3)]);
    assert_eq!(graph.remove_edge(n(a), n(b)), existed);
    assert_symmetric(&graph);
    assert!(!graph.has_edge(n(a), n(b)));
}

#[test]
fn remove_last_edge_keeps_nodes() {
    let mut graph = Graph::from_edges([(1, 2)]);
    graph.remove_edge(n(1), n(2));
    assert_eq!(graph.number_of_nodes(), 2);
    assert_eq!(graph.number_of_edges(), 0);
}

#[test]
fn remove_node_from_triangle_leaves_single_edge() {
    let mut graph = Graph::from_edges([(1, 2), (2, 3), (1, 3)]);
    assert!(graph.remove_node(n(2)));

    assert_eq!(node_ids(&graph), vec![1, 3]);
    assert_eq!(graph.edge_tuples(), vec![Edge::from((1, 3))]);
    assert_eq!(graph.node_degree(n(1)), 1);
    assert_eq!(graph.node_degree(n(3)), 1);
}

#[rstest]
#[case::absent_node(Graph::from_edges([(1, 2), (2, 3), (1, 3)]), 4)]
#[case::empty_graph(Graph::new(), 1)]
fn remove_absent_node_is_a_no_op(#[case] graph: Graph, #[case] node: u64) {
    let mut mutated = graph.clone();
    assert!(!mutated.remove_node(n(node)));
    assert_eq!(mutated, graph);
}

#[test]
fn node_degree_is_zero_for_absent_nodes() {
    let graph = Graph::from_edges([(1, 2)]);
    assert_eq!(graph.node_degree(n(42)), 0);
    assert!(graph.neighbours(n(42)).is_empty());
}

#[test]
fn complete_graph_of_five_has_ten_edges() {
    let graph = complete_graph(5);
    assert_eq!(graph.number_of_edges(), 10);
    assert!(graph.nodes().all(|node| graph.node_degree(node) == 4));
}

#[test]
fn edge_tuples_emit_each_edge_once() {
    let graph = complete_graph(4);
    let edges = graph.edge_tuples();
    assert_eq!(edges.len(), 6);
    let unique: BTreeSet<(u64, u64)> = edges
        .iter()
        .map(|edge| (edge.first().get(), edge.second().get()))
        .collect();
    assert_eq!(unique.len(), 6);
    assert!(edges.iter().all(|edge| edge.first() < edge.second()));
}

#[rstest]
#[case::tree(vec![(1, 2), (1, 3), (2, 4), (2, 5), (3, 6)], 1, vec![1, 2, 3, 4, 5, 6])]
#[case::two_components(vec![(1, 2), (2, 3), (4, 5)], 1, vec![1, 2, 3])]
#[case::absent_start(vec![(1, 2)], 9, vec![])]
#[case::empty(vec![], 1, vec![])]
fn dfs_collects_reachable_nodes(
    #[case] edges: Vec<(u64, u64)>,
    #[case] start: u64,
    #[case] expected: Vec<u64>,
) {
    let graph = Graph::from_edges(edges);
    let reachable = graph.dfs(n(start));
    assert_eq!(node_ids(&reachable), expected);
    assert_symmetric(&reachable);
}

#[test]
fn dfs_keeps_every_edge_between_reachable_nodes() {
    let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1), (4, 5)]);
    let reachable = graph.dfs(n(2));
    assert_eq!(reachable.number_of_edges(), 3);
}

#[test]
fn induced_subgraph_keeps_only_internal_edges() {
    let graph = complete_graph(5);
    let selected = BTreeSet::from([n(0), n(2), n(4), n(99)]);
    let induced = graph.induced_subgraph(&selected);
    assert_eq!(node_ids(&induced), vec![0, 2, 4]);
    assert_eq!(induced.number_of_edges(), 3);
    assert_symmetric(&induced);
}

#[test]
fn contract_node_redirects_edges_without_duplicates() {
    // 1 and 2 share neighbour 3; 2 also reaches 4.
    let mut graph = Graph::from_edges([(1, 2), (1, 3), (2, 3), (2, 4)]);
    assert!(graph.contract_node(n(2), n(1)));

    assert!(!graph.has_node(n(2)));
    assert_eq!(graph.number_of_nodes(), 3);
    assert_eq!(
        graph.edge_tuples(),
        vec![Edge::from((1, 3)), Edge::from((1, 4))]
    );
    assert_symmetric(&graph);
}

#[rstest]
#[case::same_node(1, 1)]
#[case::absent_source(7, 1)]
#[case::absent_target(1, 7)]
fn contract_node_rejects_invalid_pairs(#[case] node: u64, #[case] into: u64) {
    let graph = Graph::from_edges([(1, 2)]);
    let mut mutated = graph.clone();
    assert!(!mutated.contract_node(n(node), n(into)));
    assert_eq!(mutated, graph);
}

#[test]
fn contract_edge_merges_second_endpoint_into_first() {
    let mut graph = Graph::from_edges([(1, 2), (2, 3)]);
    assert!(graph.contract_edge(Edge::from((1, 2))));
    assert_eq!(node_ids(&graph), vec![1, 3]);
    assert!(graph.has_edge(n(1), n(3)));
    assert!(!graph.contract_edge(Edge::from((1, 2))));
}

#[test]
fn clone_is_independent() {
    let original = complete_graph(4);
    let mut copy = original.clone();
    copy.remove_node(n(0));
    assert_eq!(original.number_of_nodes(), 4);
    assert_eq!(original.number_of_edges(), 6);
}

#[test]
fn pick_random_node_fails_on_empty_graph() {
    let err = Graph::new()
        .pick_random_node(&mut seeded(1))
        .expect_err("empty graph has no nodes");
    assert_eq!(err, SamplingError::EmptyGraph);
}

#[test]
fn pick_random_node_returns_members() {
    let graph = Graph::from_edges([(10, 20), (30, 40)]);
    let mut rng = seeded(3);
    for _ in 0..50 {
        let node = graph.pick_random_node(&mut rng).expect("graph has nodes");
        assert!(graph.has_node(node));
    }
}

#[test]
fn pick_random_edge_returns_existing_edges() {
    let graph = Graph::from_edges([(1, 2), (2, 3), (5, 6)]);
    let mut rng = seeded(5);
    let mut seen = BTreeSet::new();
    for _ in 0..200 {
        let edge = graph.pick_random_edge(&mut rng).expect("graph has edges");
        assert!(graph.has_edge(edge.first(), edge.second()));
        let normalized = edge.normalized();
        seen.insert((normalized.first().get(), normalized.second().get()));
    }
    assert_eq!(seen.len(), 3, "every edge should eventually be drawn");
}

#[test]
fn pick_random_edge_fails_without_edges() {
    let mut graph = Graph::new();
    graph.add_nodes([n(1), n(2)]);
    let err = graph
        .pick_random_edge(&mut seeded(1))
        .expect_err("no edges to pick");
    assert_eq!(err, SamplingError::EmptyGraph);
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn adjacency_stays_symmetric_under_insertion(edges in raw_edges(24, 80)) {
        let graph = Graph::from_edges(edges.iter().copied());
        assert_symmetric(&graph);
        for &(a, b) in &edges {
            prop_assert!(graph.has_node(n(a)) && graph.has_node(n(b)));
            if a != b {
                prop_assert!(graph.has_edge(n(a), n(b)));
                prop_assert!(graph.has_edge(n(b), n(a)));
                prop_assert!(graph.node_degree(n(a)) >= 1);
            }
        }
        prop_assert_eq!(graph.number_of_edges(), graph.edge_tuples().len());
    }

    #[test]
    fn remove_node_leaves_no_dangling_references(
        edges in raw_edges(24, 80),
        victim in 0u64..24,
    ) {
        let mut graph = Graph::from_edges(edges);
        let edges_before = graph.number_of_edges();
        let degree = graph.node_degree(n(victim));
        graph.remove_node(n(victim));
        prop_assert!(!graph.has_node(n(victim)));
        prop_assert!(graph.nodes().all(|node| !graph.neighbours(node).contains(&n(victim))));
        prop_assert_eq!(graph.number_of_edges(), edges_before - degree);
        assert_symmetric(&graph);
    }

    #[test]
    fn contraction_reduces_node_count_by_one(
        edges in raw_edges(16, 60),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut graph = Graph::from_edges(edges);
        let candidates = graph.edge_tuples();
        prop_assume!(!candidates.is_empty());
        let edge = *pick.get(&candidates);
        let before = graph.number_of_nodes();
        prop_assert!(graph.contract_edge(edge));
        prop_assert_eq!(graph.number_of_nodes(), before - 1);
        prop_assert!(!graph.has_node(edge.second()));
        assert_symmetric(&graph);
    }
}
