//! Greedy child matching
//!
//! Pairs elements of a primary ordered sequence with compatible elements of
//! a secondary ordered sequence, sharing one visited set across repeated
//! calls. First-match and order-dependent: siblings with duplicate
//! `(kind, name)` pairs are paired by list position, which is a deliberate
//! simplicity/cost trade-off rather than an optimality guarantee. Each call
//! re-scans from the start, so draining a sibling list is quadratic in the
//! worst case; fan-out per tree level is expected to be small.

use std::collections::HashSet;

use canopy_core_types::LiveId;

use crate::model::Kind;

/// Identity of a match candidate, usable from either sequence side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MatchKey {
    /// Index of a virtual child within its parent's child list
    Virtual(usize),
    /// Handle of a live child
    Live(LiveId),
}

/// One matchable element: identity plus the `(kind, name)` match key
#[derive(Debug, Clone)]
pub(crate) struct MatchCandidate {
    pub key: MatchKey,
    pub kind: Kind,
    pub name: String,
}

/// Visited identities, shared across the two passes of one
/// children-reconciliation call and never across unrelated calls
#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    seen: HashSet<MatchKey>,
}

impl VisitedSet {
    pub fn contains(&self, key: MatchKey) -> bool {
        self.seen.contains(&key)
    }

    pub fn insert(&mut self, key: MatchKey) {
        self.seen.insert(key);
    }
}

/// Advance to the next unvisited primary element and find its match
///
/// Returns the first unvisited primary element (marking it visited) together
/// with the first unvisited secondary element whose kind is compatible and
/// whose name is equal (marking that one visited too), or `None` in the pair
/// position when nothing matches, or `None` overall once the primary
/// sequence is exhausted.
pub(crate) fn next_child_pair<'a>(
    primary: &'a [MatchCandidate],
    secondary: &'a [MatchCandidate],
    visited: &mut VisitedSet,
) -> Option<(&'a MatchCandidate, Option<&'a MatchCandidate>)> {
    let first = primary.iter().find(|candidate| !visited.contains(candidate.key))?;
    visited.insert(first.key);

    let matched = secondary.iter().find(|candidate| {
        !visited.contains(candidate.key)
            && candidate.kind.is_compatible(&first.kind)
            && candidate.name == first.name
    });
    if let Some(found) = matched {
        visited.insert(found.key);
    }
    Some((first, matched))
}
