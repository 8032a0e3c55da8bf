//! Shared test utilities for `graphsample-core`.

use graphsample_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{collection::vec, strategy::Strategy, test_runner::Config as ProptestConfig};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    components::connected_components,
    graph::{Graph, NodeId},
};

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Deterministic RNG for reproducible tests.
#[must_use]
pub(crate) fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Connected graph over `0..node_count`: a random spanning tree plus
/// `extra_edges` random chords.
#[must_use]
pub(crate) fn connected_graph(node_count: u64, extra_edges: usize, seed: u64) -> Graph {
    let mut rng = seeded(seed);
    let mut graph = Graph::new();
    graph.add_node(NodeId::new(0));
    for node in 1..node_count {
        let parent = rng.gen_range(0..node);
        graph.add_edge(node.into(), parent.into());
    }
    if node_count > 1 {
        for _ in 0..extra_edges {
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            graph.add_edge(a.into(), b.into());
        }
    }
    graph
}

/// Panics unless every adjacency entry has a matching reverse entry and no
/// node lists itself or a neighbour twice.
pub(crate) fn assert_symmetric(graph: &Graph) {
    for node in graph.nodes() {
        let neighbours = graph.neighbours(node);
        for &neighbour in neighbours {
            assert_ne!(node, neighbour, "self-loop at {node}");
            assert!(
                graph.neighbours(neighbour).contains(&node),
                "{neighbour} lists no back-edge to {node}"
            );
            let copies = neighbours.iter().filter(|&&n| n == neighbour).count();
            assert_eq!(copies, 1, "{node} lists {neighbour} {copies} times");
        }
    }
}

/// Panics unless every node and edge of `sample` exists in `original`.
pub(crate) fn assert_subgraph_of(sample: &Graph, original: &Graph) {
    for node in sample.nodes() {
        assert!(original.has_node(node), "fabricated node {node}");
    }
    for edge in sample.edges() {
        assert!(
            original.has_edge(edge.first(), edge.second()),
            "fabricated edge {edge}"
        );
    }
}

/// Returns `true` when `graph` is a single connected component.
#[must_use]
pub(crate) fn is_connected(graph: &Graph) -> bool {
    connected_components(graph).len() == 1
}

/// Strategy producing raw edge lists over a small id space, self-loops and
/// duplicates included.
pub(crate) fn raw_edges(max_node: u64, max_edges: usize) -> impl Strategy<Value = Vec<(u64, u64)>> {
    vec((0..max_node, 0..max_node), 0..max_edges)
}
