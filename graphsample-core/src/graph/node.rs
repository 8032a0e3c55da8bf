//! Node identifiers and undirected edges.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Opaque identifier of a graph node.
///
/// # Examples
/// ```
/// use graphsample_core::NodeId;
///
/// let node = NodeId::new(7);
/// assert_eq!(node.get(), 7);
/// assert_eq!(NodeId::from(7), node);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(u64);

impl NodeId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unordered pair of nodes.
///
/// `Edge::new(a, b)` and `Edge::new(b, a)` compare and hash equal. The
/// endpoints keep the order they were given in so callers that care about
/// orientation (edge contraction) can still read it back.
///
/// # Examples
/// ```
/// use graphsample_core::{Edge, NodeId};
///
/// let forward = Edge::new(NodeId::new(1), NodeId::new(2));
/// let backward = Edge::new(NodeId::new(2), NodeId::new(1));
/// assert_eq!(forward, backward);
/// assert_eq!(backward.normalized().first(), NodeId::new(1));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    first: NodeId,
    second: NodeId,
}

impl Edge {
    /// Creates an edge between `first` and `second`.
    #[must_use]
    pub const fn new(first: NodeId, second: NodeId) -> Self {
        Self { first, second }
    }

    /// Returns the first endpoint.
    #[must_use]
    pub const fn first(&self) -> NodeId {
        self.first
    }

    /// Returns the second endpoint.
    #[must_use]
    pub const fn second(&self) -> NodeId {
        self.second
    }

    /// Returns the same edge with the smaller endpoint first.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.first <= self.second {
            self
        } else {
            self.reversed()
        }
    }

    /// Swaps the endpoints.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.first == self.second
    }

    /// Returns the endpoint opposite `node`, or `None` when `node` is not an
    /// endpoint.
    #[must_use]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.first {
            Some(self.second)
        } else if node == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    fn key(&self) -> (NodeId, NodeId) {
        let normalized = self.normalized();
        (normalized.first, normalized.second)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(u64, u64)> for Edge {
    fn from((first, second): (u64, u64)) -> Self {
        Self::new(NodeId::new(first), NodeId::new(second))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
