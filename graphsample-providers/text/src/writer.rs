use std::io::Write;

use graphsample_core::Graph;

use crate::errors::TextProviderError;

/// Writes `graph` as an edge list that [`crate::read_edge_list`] reads back.
///
/// Edges are written sorted by endpoints, followed by isolated nodes on lines
/// of their own.
///
/// # Errors
/// Returns [`TextProviderError::Io`] when the writer fails.
///
/// # Examples
/// ```
/// use graphsample_core::{Graph, NodeId};
/// use graphsample_providers_text::write_edge_list;
///
/// let mut graph = Graph::from_edges([(2, 1), (1, 3)]);
/// graph.add_node(NodeId::new(9));
/// let mut out = Vec::new();
/// write_edge_list(&graph, &mut out)?;
/// assert_eq!(String::from_utf8_lossy(&out), "1,2\n1,3\n9\n");
/// # Ok::<(), graphsample_providers_text::TextProviderError>(())
/// ```
pub fn write_edge_list<W: Write>(graph: &Graph, mut writer: W) -> Result<(), TextProviderError> {
    for edge in graph.edge_tuples() {
        writeln!(writer, "{},{}", edge.first(), edge.second())?;
    }
    for node in graph.nodes().filter(|&node| graph.node_degree(node) == 0) {
        writeln!(writer, "{node}")?;
    }
    writer.flush()?;
    Ok(())
}
