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

//! # Peer Triangle

use super::{prefix_name, ExampleNetwork};
use crate::topology::TopologyDescription;

/// # Peer Triangle
///
/// AS 2 peers with both AS 1 and AS 3, but AS 1 and AS 3 are not connected. Since routes learned
/// from a peer are never exported to another peer, AS 1 and AS 3 cannot reach each other.
///
/// ```text
///  1 --- 2 --- 3
/// ```
pub struct PeerTriangle {}

impl ExampleNetwork for PeerTriangle {
    fn topology() -> TopologyDescription {
        let mut topo = TopologyDescription::new();
        topo.add_as(1, prefix_name(1))
            .add_as(2, prefix_name(2))
            .add_as(3, prefix_name(3))
            .add_peering(1, 2)
            .add_peering(2, 3);
        topo
    }
}
