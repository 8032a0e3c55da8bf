use std::{fmt, io::BufRead, str::FromStr};

use graphsample_core::{Graph, NodeId};
use tracing::debug;

use crate::errors::TextProviderError;

/// Layout of a text graph file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TextFormat {
    /// One edge per line.
    #[default]
    EdgeList,
    /// One neighbour list per node.
    AdjacencyList,
}

impl TextFormat {
    /// Returns the tag used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EdgeList => "edge-list",
            Self::AdjacencyList => "adjacency-list",
        }
    }

    /// Reads a graph in this layout.
    ///
    /// # Errors
    /// See [`read_edge_list`] and [`read_adjacency_list`].
    pub fn read<R: BufRead>(self, reader: R) -> Result<Graph, TextProviderError> {
        match self {
            Self::EdgeList => read_edge_list(reader),
            Self::AdjacencyList => read_adjacency_list(reader),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "edge-list" => Ok(Self::EdgeList),
            "adjacency-list" => Ok(Self::AdjacencyList),
            other => Err(format!("unknown text format `{other}`")),
        }
    }
}

/// Reads an edge list.
///
/// # Errors
/// Returns [`TextProviderError::InvalidNodeId`] or
/// [`TextProviderError::MalformedEdge`] with the offending line number,
/// [`TextProviderError::EmptyInput`] when no data lines are present, and
/// [`TextProviderError::Io`] when the reader fails.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphsample_providers_text::read_edge_list;
///
/// let graph = read_edge_list(Cursor::new("# triangle\n0,1\n1 2\n2, 0\n\n7\n"))?;
/// assert_eq!(graph.number_of_nodes(), 4);
/// assert_eq!(graph.number_of_edges(), 3);
/// # Ok::<(), graphsample_providers_text::TextProviderError>(())
/// ```
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Graph, TextProviderError> {
    let mut graph = Graph::new();
    let mut data_lines = 0_usize;
    for line in data_lines_of(reader) {
        let (number, content) = line?;
        data_lines += 1;
        let ids = parse_ids(number, &content)?;
        match ids.as_slice() {
            [node] => {
                graph.add_node(*node);
            }
            [a, b] => {
                graph.add_edge(*a, *b);
            }
            _ => {
                return Err(TextProviderError::MalformedEdge {
                    line: number,
                    content,
                });
            }
        }
    }
    finish(graph, data_lines, TextFormat::EdgeList)
}

/// Reads an adjacency list.
///
/// # Errors
/// Returns [`TextProviderError::InvalidNodeId`] with the offending line
/// number, [`TextProviderError::EmptyInput`] when no data lines are present,
/// and [`TextProviderError::Io`] when the reader fails.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphsample_core::NodeId;
/// use graphsample_providers_text::read_adjacency_list;
///
/// let graph = read_adjacency_list(Cursor::new("1,2\n0\n0\n-\n"))?;
/// assert_eq!(graph.number_of_edges(), 2);
/// assert_eq!(graph.node_degree(NodeId::new(3)), 0);
/// # Ok::<(), graphsample_providers_text::TextProviderError>(())
/// ```
pub fn read_adjacency_list<R: BufRead>(reader: R) -> Result<Graph, TextProviderError> {
    let mut graph = Graph::new();
    let mut source = 0_u64;
    for line in data_lines_of(reader) {
        let (number, content) = line?;
        let neighbours = if content == "-" {
            Vec::new()
        } else {
            parse_ids(number, &content)?
        };
        graph.add_edges_from_neighbour_list(NodeId::new(source), neighbours);
        source += 1;
    }
    let data_lines = usize::try_from(source).unwrap_or(usize::MAX);
    finish(graph, data_lines, TextFormat::AdjacencyList)
}

fn finish(graph: Graph, data_lines: usize, format: TextFormat) -> Result<Graph, TextProviderError> {
    if data_lines == 0 {
        return Err(TextProviderError::EmptyInput);
    }
    debug!(
        %format,
        lines = data_lines,
        nodes = graph.number_of_nodes(),
        edges = graph.number_of_edges(),
        "text graph loaded"
    );
    Ok(graph)
}

/// Yields `(line_number, trimmed_content)` for every non-blank, non-comment
/// line.
fn data_lines_of<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), TextProviderError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(raw) => {
                let content = raw.trim();
                if content.is_empty() || content.starts_with('#') {
                    None
                } else {
                    Some(Ok((index + 1, content.to_owned())))
                }
            }
            Err(error) => Some(Err(TextProviderError::from(error))),
        })
}

fn parse_ids(line: usize, content: &str) -> Result<Vec<NodeId>, TextProviderError> {
    content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .map(NodeId::new)
                .map_err(|_| TextProviderError::InvalidNodeId {
                    line,
                    token: token.to_owned(),
                })
        })
        .collect()
}
