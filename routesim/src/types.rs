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

//! Module containing all type definitions

use petgraph::graph::Graph;
use petgraph::Directed;
use std::fmt;
use thiserror::Error;

/// AS Number, the unique identifier of an autonomous system.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct AsId(pub u32);

impl fmt::Display for AsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// IP Prefix, interned by the [`Network`](crate::Network). Use
/// [`Network::get_prefix_name`](crate::Network::get_prefix_name) to get the textual
/// representation back.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Prefix(pub u32);

/// Customer-provider hierarchy. Every edge points from a customer to its provider.
pub type AsHierarchy = Graph<AsId, (), Directed, u32>;

/// Commercial relationship of a neighbor, seen from the local AS. `Customer` means that the
/// neighbor is a customer of the local AS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// The neighbor pays the local AS for transit
    Customer,
    /// Settlement-free peering
    Peer,
    /// The local AS pays the neighbor for transit
    Provider,
}

impl Relationship {
    /// Preference class of routes learned over this relationship. Customer routes generate
    /// revenue and are preferred over peer routes, which are preferred over provider routes.
    pub fn preference(&self) -> u8 {
        match self {
            Self::Customer => 2,
            Self::Peer => 1,
            Self::Provider => 0,
        }
    }

    /// Returns the relationship as seen from the neighbor.
    pub fn reverse(&self) -> Self {
        match self {
            Self::Customer => Self::Provider,
            Self::Peer => Self::Peer,
            Self::Provider => Self::Customer,
        }
    }

    /// returns true if the neighbor is a customer
    pub fn is_customer(&self) -> bool {
        matches!(self, Self::Customer)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Peer => write!(f, "peer"),
            Self::Provider => write!(f, "provider"),
        }
    }
}

/// Errors of a single autonomous system
#[derive(Error, Debug, PartialEq)]
pub enum DeviceError {
    /// A relationship with this neighbor is already established
    #[error("Relationship with AS {0} already exists!")]
    RelationshipAlreadyExists(AsId),
    /// An AS cannot be its own neighbor
    #[error("AS {0} cannot have a relationship with itself!")]
    SelfRelationship(AsId),
    /// There is no relationship with this AS
    #[error("AS {0} is not a neighbor!")]
    NotANeighbor(AsId),
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Device Error which cannot be handled
    #[error("Device Error: {0}")]
    DeviceError(#[from] DeviceError),
    /// AS is not present in the topology
    #[error("AS was not found in topology: {0}")]
    DeviceNotFound(AsId),
    /// Prefix is not originated by any AS
    #[error("Prefix was not found in topology: {0:?}")]
    PrefixNotFound(Prefix),
    /// No AS originates a prefix with this name
    #[error("Prefix name was not found in topology: {0}")]
    PrefixNameNotFound(String),
    /// A worker thread of the parallel simulation panicked
    #[error("A simulation worker thread failed")]
    WorkerFailed,
}
