use graphsample_core::{
    Graph, NodeId,
    generators::{classic::complete_graph, random::dense_gnm_random_graph},
};
use rand::{SeedableRng, rngs::SmallRng};

/// Connected graph of `nodes` nodes: a spanning path plus random chords.
#[must_use]
pub fn connected(nodes: u64, chords: u64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = dense_gnm_random_graph(nodes, chords, &mut rng);
    for node in 1..nodes {
        graph.add_edge(NodeId::new(node - 1), NodeId::new(node));
    }
    graph
}

/// A 10-clique alongside a disjoint 5-node path labelled 100..=104.
#[must_use]
pub fn clique_and_path() -> Graph {
    let mut graph = complete_graph(10);
    graph.add_edges_from_tuples((100..104).map(|node| (node, node + 1)));
    graph
}
