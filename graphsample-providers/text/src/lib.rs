//! Text provider reading and writing graphs as line-based UTF-8 files.
//!
//! Two layouts are understood:
//!
//! - **edge list**: one `a,b` pair per line. A lone id declares an isolated
//!   node.
//! - **adjacency list**: the `i`-th data line lists the neighbours of node
//!   `i`, with `-` standing for no neighbours.
//!
//! Ids may be separated by commas, whitespace or both. Blank lines and lines
//! starting with `#` are skipped and do not count as data lines.
mod errors;
mod reader;
mod writer;

pub use errors::{TextProviderError, TextProviderErrorCode};
pub use reader::{TextFormat, read_adjacency_list, read_edge_list};
pub use writer::write_edge_list;
