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

//! Networks for testing

use crate::topology::{load, TopologyDescription, TopologyError};
use crate::Network;

mod provider_chain;
pub use provider_chain::ProviderChain;

mod peer_triangle;
pub use peer_triangle::PeerTriangle;

mod two_tier;
pub use two_tier::TwoTier;

mod diamond;
pub use diamond::Diamond;

/// Trait for easier access to example networks.
pub trait ExampleNetwork {
    /// Get the description of the topology
    fn topology() -> TopologyDescription;

    /// Get the network, built from the topology.
    fn net() -> Result<Network, TopologyError> {
        load(&Self::topology())
    }
}

/// Name of the prefix originated by the AS with the given number.
pub fn prefix_name(number: u32) -> String {
    format!("10.{}.{}.0/24", number / 256, number % 256)
}
