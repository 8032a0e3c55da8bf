//! Strategy vocabulary and the factory turning tags into samplers.

use std::{fmt, str::FromStr};

use super::{
    SamplingStrategy, config::SamplingConfig, contraction::ContractionSampler,
    deletion::DeletionSampler, preservation::PreservationSampler,
};
use crate::{error::SamplingError, walk::EscapePolicy};

/// How a family reaches the target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Family {
    /// Grow a fresh graph from selected elements of the input.
    #[default]
    Preservation,
    /// Remove elements from a copy, keeping the largest component.
    Deletion,
    /// Merge elements of a copy into their neighbours.
    Contraction,
}

impl Family {
    /// Every family, in declaration order.
    pub const ALL: [Self; 3] = [Self::Preservation, Self::Deletion, Self::Contraction];

    /// Returns the tag used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preservation => "preservation",
            Self::Deletion => "deletion",
            Self::Contraction => "contraction",
        }
    }
}

/// Which node or edge a strategy picks at each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// A node chosen uniformly at random.
    RandomNode,
    /// A node chosen with probability proportional to its degree.
    RandomDegreeNode,
    /// An edge chosen uniformly at random.
    RandomEdge,
    /// A uniform node, then one of its incident edges.
    RandomNodeEdge,
    /// A uniform node, then one of its neighbours (the neighbour is used).
    RandomNodeNeighbour,
    /// A uniform node and one of its neighbours (both are used).
    InclusiveRandomNodeNeighbour,
    /// Node-edge or uniform edge, mixed by the hybrid weight.
    Hybrid,
    /// A walk that stops at dead ends.
    RandomWalk,
    /// A walk that teleports to a random node when it escapes.
    RandomWalkWithJump,
    /// A walk that returns to its start node when it escapes.
    RandomWalkWithRestart,
}

impl Policy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::RandomNode,
        Self::RandomDegreeNode,
        Self::RandomEdge,
        Self::RandomNodeEdge,
        Self::RandomNodeNeighbour,
        Self::InclusiveRandomNodeNeighbour,
        Self::Hybrid,
        Self::RandomWalk,
        Self::RandomWalkWithJump,
        Self::RandomWalkWithRestart,
    ];

    /// Returns the tag used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RandomNode => "random-node",
            Self::RandomDegreeNode => "random-degree-node",
            Self::RandomEdge => "random-edge",
            Self::RandomNodeEdge => "random-node-edge",
            Self::RandomNodeNeighbour => "random-node-neighbour",
            Self::InclusiveRandomNodeNeighbour => "inclusive-random-node-neighbour",
            Self::Hybrid => "hybrid",
            Self::RandomWalk => "random-walk",
            Self::RandomWalkWithJump => "random-walk-with-jump",
            Self::RandomWalkWithRestart => "random-walk-with-restart",
        }
    }

    /// Returns the escape behaviour of walk policies, `None` otherwise.
    #[must_use]
    pub const fn walk_escape(self) -> Option<EscapePolicy> {
        match self {
            Self::RandomWalk => Some(EscapePolicy::Plain),
            Self::RandomWalkWithJump => Some(EscapePolicy::Jump),
            Self::RandomWalkWithRestart => Some(EscapePolicy::Restart),
            _ => None,
        }
    }

    /// Returns `true` for policies that select edges rather than nodes.
    #[must_use]
    pub const fn selects_edges(self) -> bool {
        matches!(self, Self::RandomEdge | Self::RandomNodeEdge | Self::Hybrid)
    }
}

/// A family paired with a policy.
///
/// Tags parse as `"<policy>"` (preservation family) or
/// `"<family>:<policy>"`.
///
/// # Examples
/// ```
/// use graphsample_core::{Family, Policy, StrategyKind};
///
/// let kind: StrategyKind = "deletion:random-edge".parse()?;
/// assert_eq!(kind, StrategyKind::new(Family::Deletion, Policy::RandomEdge));
/// assert_eq!("hybrid".parse::<StrategyKind>()?.family(), Family::Preservation);
/// # Ok::<(), graphsample_core::SamplingError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StrategyKind {
    family: Family,
    policy: Policy,
}

impl StrategyKind {
    /// Pairs `family` with `policy`.
    #[must_use]
    pub const fn new(family: Family, policy: Policy) -> Self {
        Self { family, policy }
    }

    /// Returns the family.
    #[must_use]
    pub const fn family(self) -> Family {
        self.family
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(self) -> Policy {
        self.policy
    }

    /// Iterates over every family and policy combination.
    pub fn all() -> impl Iterator<Item = Self> {
        Family::ALL.into_iter().flat_map(|family| {
            Policy::ALL
                .into_iter()
                .map(move |policy| Self::new(family, policy))
        })
    }

    /// Instantiates the sampler for this kind.
    #[must_use]
    pub fn build(self, config: SamplingConfig) -> Box<dyn SamplingStrategy> {
        match self.family {
            Family::Preservation => Box::new(PreservationSampler::new(self.policy, config)),
            Family::Deletion => Box::new(DeletionSampler::new(self.policy, config)),
            Family::Contraction => Box::new(ContractionSampler::new(self.policy, config)),
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::new(Family::Preservation, Policy::RandomNode)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.policy)
    }
}

fn unknown(name: &str) -> SamplingError {
    SamplingError::UnknownStrategy {
        name: name.to_owned(),
    }
}

impl FromStr for Family {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| unknown(s))
    }
}

impl FromStr for Policy {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| unknown(s))
    }
}

impl FromStr for StrategyKind {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let kind = match tag.split_once(':') {
            Some((family, policy)) => Self::new(
                family.parse().map_err(|_| unknown(tag))?,
                policy.parse().map_err(|_| unknown(tag))?,
            ),
            None => Self::new(Family::Preservation, tag.parse()?),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare_policy("random-node", Family::Preservation, Policy::RandomNode)]
    #[case::walk("random-walk-with-restart", Family::Preservation, Policy::RandomWalkWithRestart)]
    #[case::deletion("deletion:hybrid", Family::Deletion, Policy::Hybrid)]
    #[case::contraction(
        "contraction:inclusive-random-node-neighbour",
        Family::Contraction,
        Policy::InclusiveRandomNodeNeighbour
    )]
    #[case::padded("  preservation:random-edge ", Family::Preservation, Policy::RandomEdge)]
    fn parses_strategy_tags(#[case] tag: &str, #[case] family: Family, #[case] policy: Policy) {
        let kind: StrategyKind = tag.parse().expect("tag is valid");
        assert_eq!(kind, StrategyKind::new(family, policy));
    }

    #[rstest]
    #[case::unknown_policy("random-leaf")]
    #[case::unknown_family("shrink:random-node")]
    #[case::empty("")]
    #[case::missing_policy("deletion:")]
    fn rejects_unknown_tags(#[case] tag: &str) {
        let err = tag.parse::<StrategyKind>().expect_err("tag is invalid");
        assert_eq!(
            err,
            SamplingError::UnknownStrategy {
                name: tag.trim().to_owned()
            }
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in StrategyKind::all() {
            let parsed: StrategyKind = kind.to_string().parse().expect("display output parses");
            assert_eq!(parsed, kind);
        }
        assert_eq!(StrategyKind::all().count(), 30);
    }

    #[test]
    fn factory_reports_the_requested_kind() {
        for kind in StrategyKind::all() {
            assert_eq!(kind.build(SamplingConfig::default()).kind(), kind);
        }
    }

    #[rstest]
    #[case(Policy::RandomWalk, Some(EscapePolicy::Plain))]
    #[case(Policy::RandomWalkWithJump, Some(EscapePolicy::Jump))]
    #[case(Policy::RandomWalkWithRestart, Some(EscapePolicy::Restart))]
    #[case(Policy::Hybrid, None)]
    fn walk_policies_map_to_escape_behaviour(
        #[case] policy: Policy,
        #[case] escape: Option<EscapePolicy>,
    ) {
        assert_eq!(policy.walk_escape(), escape);
    }
}
