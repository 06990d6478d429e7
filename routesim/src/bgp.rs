// routesim: Inter-Domain Routing Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing definitions for path-vector advertisements and route ranking

use crate::{AsId, Prefix, Relationship};
use std::cmp::Reverse;

/// Path-vector advertisement for a single destination prefix.
///
/// The AS path is stored nearest hop first, with the origin of the route last. The self-route of
/// the origin has an empty path, and every AS re-advertising the route prepends itself. Once
/// created, the path is never changed: [`Advertisement::extended_copy`] builds an independent
/// value, such that two ASes holding "the same" advertisement never observe each other's
/// extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Advertisement {
    /// IP PREFIX
    pub prefix: Prefix,
    /// AS-PATH, nearest hop first, origin last.
    as_path: Vec<AsId>,
}

impl Advertisement {
    /// Create the self-route of the origin. Its path is empty.
    pub fn origin(prefix: Prefix) -> Self {
        Self { prefix, as_path: Vec::new() }
    }

    /// Create an advertisement with a given path (nearest hop first).
    pub fn new(prefix: Prefix, as_path: Vec<AsId>) -> Self {
        Self { prefix, as_path }
    }

    /// Returns the AS path, nearest hop first.
    pub fn as_path(&self) -> &[AsId] {
        &self.as_path
    }

    /// Number of ASes on the path. The self-route has length 0.
    pub fn length(&self) -> usize {
        self.as_path.len()
    }

    /// Checks if the AS is already on the path.
    pub fn contains(&self, as_id: AsId) -> bool {
        self.as_path.contains(&as_id)
    }

    /// The neighbor through which the advertisement claims to be received, or `None` for the
    /// self-route.
    pub fn head_neighbor(&self) -> Option<AsId> {
        self.as_path.first().copied()
    }

    /// The AS originating the prefix, or `None` for the self-route.
    pub fn origin_as(&self) -> Option<AsId> {
        self.as_path.last().copied()
    }

    /// Returns true if this is the self-route of the origin.
    pub fn is_local(&self) -> bool {
        self.as_path.is_empty()
    }

    /// Returns a new advertisement with `via` prepended to the path. `self` is not modified.
    pub fn extended_copy(&self, via: AsId) -> Self {
        let mut as_path = Vec::with_capacity(self.as_path.len() + 1);
        as_path.push(via);
        as_path.extend_from_slice(&self.as_path);
        Self { prefix: self.prefix, as_path }
    }
}

/// BGP Events
#[derive(Debug, Clone, PartialEq)]
pub enum BgpEvent {
    /// Withdraw a previously advertised route
    Withdraw(Prefix),
    /// Update a route, or add a new one.
    Update(Advertisement),
}

impl BgpEvent {
    /// Returns the prefix for which this event is responsible
    pub fn prefix(&self) -> Prefix {
        match self {
            Self::Withdraw(p) => *p,
            Self::Update(r) => r.prefix,
        }
    }
}

/// Route table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RibEntry {
    /// the advertisement
    pub(crate) route: Advertisement,
    /// the neighbor from which the route was learned, and its relationship. `None` for the
    /// self-route.
    pub(crate) learned_from: Option<(AsId, Relationship)>,
}

impl RibEntry {
    /// Entry for the self-route of the own prefix
    pub(crate) fn local(prefix: Prefix) -> Self {
        Self { route: Advertisement::origin(prefix), learned_from: None }
    }

    /// Returns the advertisement of this entry
    pub fn route(&self) -> &Advertisement {
        &self.route
    }

    /// Returns the neighbor from which the route was learned.
    pub fn from_id(&self) -> Option<AsId> {
        self.learned_from.map(|(id, _)| id)
    }

    /// Returns the relationship to the neighbor from which the route was learned.
    pub fn from_type(&self) -> Option<Relationship> {
        self.learned_from.map(|(_, rel)| rel)
    }

    /// Compute the rank of this entry. See [`RouteRank`].
    pub fn rank(&self) -> RouteRank {
        RouteRank {
            local: self.learned_from.is_none(),
            preference: self.from_type().map(|rel| rel.preference()).unwrap_or(u8::MAX),
            length: Reverse(self.route.length()),
            neighbor: Reverse(self.from_id()),
        }
    }

    /// Returns true if `self` is strictly preferred over `other`.
    pub fn outranks(&self, other: &Self) -> bool {
        self.rank() > other.rank()
    }
}

/// Rank of a route, where a larger rank is preferred. Routes are compared by (in this order):
///
/// 1. the self-route always wins,
/// 2. relationship class of the neighbor (customer over peer over provider),
/// 3. shorter AS path,
/// 4. smaller AS number of the neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RouteRank {
    local: bool,
    preference: u8,
    length: Reverse<usize>,
    neighbor: Reverse<Option<AsId>>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extended_copy_leaves_original() {
        let origin = Advertisement::origin(Prefix(0));
        let a = origin.extended_copy(AsId(3));
        let b = a.extended_copy(AsId(2));
        let c = a.extended_copy(AsId(5));

        assert!(origin.as_path().is_empty());
        assert_eq!(a.as_path(), &[AsId(3)]);
        assert_eq!(b.as_path(), &[AsId(2), AsId(3)]);
        assert_eq!(c.as_path(), &[AsId(5), AsId(3)]);

        assert_eq!(b.head_neighbor(), Some(AsId(2)));
        assert_eq!(b.origin_as(), Some(AsId(3)));
        assert_eq!(b.length(), 2);
        assert!(b.contains(AsId(3)));
        assert!(!b.contains(AsId(5)));
        assert_eq!(origin.head_neighbor(), None);
        assert!(origin.is_local());
    }

    #[test]
    fn ranking() {
        let p = Prefix(0);
        let entry = |path: Vec<u32>, rel: Relationship| RibEntry {
            learned_from: Some((AsId(path[0]), rel)),
            route: Advertisement::new(p, path.into_iter().map(AsId).collect()),
        };

        let local = RibEntry::local(p);
        let customer_long = entry(vec![4, 5, 6, 7], Relationship::Customer);
        let peer_short = entry(vec![2], Relationship::Peer);
        let provider = entry(vec![1, 7], Relationship::Provider);
        let customer_short = entry(vec![3, 7], Relationship::Customer);
        let customer_short_high = entry(vec![6, 7], Relationship::Customer);

        // the self-route beats everything
        assert!(local.outranks(&customer_short));
        // relationship class before length
        assert!(customer_long.outranks(&peer_short));
        assert!(peer_short.outranks(&provider));
        // length within the same class
        assert!(customer_short.outranks(&customer_long));
        // smaller neighbor wins the tie
        assert!(customer_short.outranks(&customer_short_high));
        // strict ordering
        assert!(!customer_short.outranks(&customer_short));
    }
}
