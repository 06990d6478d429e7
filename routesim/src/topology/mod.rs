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

//! # Topology description and loader
//!
//! A topology is described by a list of ASes, each originating one prefix, and a list of
//! relationships. The JSON representation looks as follows:
//!
//! ```json
//! {
//!   "ases": [
//!     {"number": 1, "prefix": "10.0.1.0/24"},
//!     {"number": 2, "prefix": "10.0.2.0/24"},
//!     {"number": 3, "prefix": "10.0.3.0/24"}
//!   ],
//!   "relationships": [
//!     {"customer": 1, "provider": 2},
//!     {"peerA": 2, "peerB": 3}
//!   ]
//! }
//! ```

mod error;
pub use error::TopologyError;

use crate::{AsId, Network};

use log::*;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Description of an AS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsRecord {
    /// AS number
    pub number: u32,
    /// Prefix originated by the AS
    pub prefix: String,
}

/// Description of a relationship between two ASes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipRecord {
    /// `customer` buys transit from `provider`
    CustomerProvider {
        /// AS number of the customer
        customer: u32,
        /// AS number of the provider
        provider: u32,
    },
    /// Settlement-free peering between `peer_a` and `peer_b`
    Peering {
        /// AS number of the first peer
        #[serde(rename = "peerA")]
        peer_a: u32,
        /// AS number of the second peer
        #[serde(rename = "peerB")]
        peer_b: u32,
    },
}

/// Topology Description, as produced by an external loader or read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDescription {
    /// All ASes
    pub ases: Vec<AsRecord>,
    /// All relationships
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

impl TopologyDescription {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON representation
    pub fn from_json_str(s: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON file
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, TopologyError> {
        Self::from_json_str(&read_to_string(filename)?)
    }

    /// Add an AS, originating the given prefix.
    pub fn add_as(&mut self, number: u32, prefix: impl Into<String>) -> &mut Self {
        self.ases.push(AsRecord { number, prefix: prefix.into() });
        self
    }

    /// Add a customer-provider relationship
    pub fn add_customer_provider(&mut self, customer: u32, provider: u32) -> &mut Self {
        self.relationships.push(RelationshipRecord::CustomerProvider { customer, provider });
        self
    }

    /// Add a peering
    pub fn add_peering(&mut self, peer_a: u32, peer_b: u32) -> &mut Self {
        self.relationships.push(RelationshipRecord::Peering { peer_a, peer_b });
        self
    }
}

/// Build the network from the description. All ASes are created first, then the relationships
/// are attached. Finally, the customer-provider hierarchy is checked for cycles.
pub fn load(topo: &TopologyDescription) -> Result<Network, TopologyError> {
    let mut net = Network::new();

    for record in topo.ases.iter() {
        net.add_as(AsId(record.number), record.prefix.as_str())?;
    }

    for relationship in topo.relationships.iter() {
        match relationship {
            RelationshipRecord::CustomerProvider { customer, provider } => {
                net.add_customer_provider(AsId(*customer), AsId(*provider))?
            }
            RelationshipRecord::Peering { peer_a, peer_b } => {
                net.add_peering(AsId(*peer_a), AsId(*peer_b))?
            }
        }
    }

    net.check_hierarchy()?;

    debug!(
        "Loaded topology with {} ASes and {} relationships",
        topo.ases.len(),
        topo.relationships.len()
    );

    Ok(net)
}

/// Read a JSON file and build the network.
pub fn load_file(filename: impl AsRef<Path>) -> Result<Network, TopologyError> {
    load(&TopologyDescription::from_file(filename)?)
}
