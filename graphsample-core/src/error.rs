//! Error types for the graphsample core library.
//!
//! Graph primitives are total and never fail. Only randomized selection and
//! the convergence loops of the sampling families report errors, which are
//! collected in [`SamplingError`] together with a stable machine-readable code.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by random selection and by the sampling strategies.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplingError {
    /// The operation needs at least one node (or edge) and the graph has none.
    #[error("graph contains no nodes or edges to select from")]
    EmptyGraph,
    /// Every remaining candidate has zero weight.
    #[error("no candidate with a positive weight remains")]
    EmptyCandidateSet,
    /// The requested sampling ratio cannot be honoured.
    #[error("invalid sampling ratio {ratio}: {reason}")]
    InvalidRatio {
        /// Ratio supplied by the caller.
        ratio: f64,
        /// Why the ratio was rejected.
        reason: String,
    },
    /// A sampling parameter was out of range.
    #[error("invalid sampling configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending parameter.
        reason: String,
    },
    /// Component analysis was requested on a graph with no nodes.
    #[error("graph has no connected components")]
    NoComponents,
    /// A random walk reached a node it cannot leave.
    #[error("random walk is stuck at node {node}")]
    StuckWalk {
        /// Node the walk could not escape from.
        node: NodeId,
    },
    /// A preservation strategy ran out of selectable elements.
    #[error("selection exhausted after collecting {collected} of {target} nodes")]
    Exhausted {
        /// Nodes collected before the candidates ran out.
        collected: usize,
        /// Node count the strategy was aiming for.
        target: usize,
    },
    /// A shrinking strategy stopped making progress.
    #[error("sampling stalled with {remaining} nodes remaining (target {target})")]
    Stalled {
        /// Nodes left in the working graph.
        remaining: usize,
        /// Node count the strategy was aiming for.
        target: usize,
    },
    /// A strategy tag did not name a known family or policy.
    #[error("unknown sampling strategy `{name}`")]
    UnknownStrategy {
        /// Tag supplied by the caller.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplingError`] variants.
    enum SamplingErrorCode for SamplingError {
        /// The graph has no nodes or edges to select from.
        EmptyGraph => EmptyGraph => "SAMPLING_EMPTY_GRAPH",
        /// Every remaining candidate has zero weight.
        EmptyCandidateSet => EmptyCandidateSet => "SAMPLING_EMPTY_CANDIDATE_SET",
        /// The requested sampling ratio cannot be honoured.
        InvalidRatio => InvalidRatio { .. } => "SAMPLING_INVALID_RATIO",
        /// A sampling parameter was out of range.
        InvalidConfig => InvalidConfig { .. } => "SAMPLING_INVALID_CONFIG",
        /// Component analysis found no components.
        NoComponents => NoComponents => "SAMPLING_NO_COMPONENTS",
        /// A random walk could not leave a node.
        StuckWalk => StuckWalk { .. } => "SAMPLING_STUCK_WALK",
        /// Selection ran out of candidates.
        Exhausted => Exhausted { .. } => "SAMPLING_EXHAUSTED",
        /// A shrinking loop stopped making progress.
        Stalled => Stalled { .. } => "SAMPLING_STALLED",
        /// A strategy tag was not recognised.
        UnknownStrategy => UnknownStrategy { .. } => "SAMPLING_UNKNOWN_STRATEGY",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SamplingError>;
