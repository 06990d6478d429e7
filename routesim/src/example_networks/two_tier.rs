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

//! # Two-Tier Internet

use super::{prefix_name, ExampleNetwork};
use crate::topology::TopologyDescription;

/// # Two-Tier Internet
///
/// Two tier-1 ASes (10 and 20) peer with each other. AS 100 is a customer of 10, AS 200 is a
/// customer of 20, and AS 300 is multihomed to both tier-1 ASes. The regional ASes 100 and 200
/// peer with each other. The stub 1000 is a customer of 100, and the stub 2000 is a customer of
/// 200.
///
/// ```text
///        10 ======= 20
///       /  \       /  \
///     100   '- 300 -'  200
///      |    \=========/  |
///    1000                2000
/// ```
///
/// Lines going down connect a provider with its customer, `===` marks a peering.
pub struct TwoTier {}

impl ExampleNetwork for TwoTier {
    fn topology() -> TopologyDescription {
        let mut topo = TopologyDescription::new();
        for number in [10, 20, 100, 200, 300, 1000, 2000].iter() {
            topo.add_as(*number, prefix_name(*number));
        }
        topo.add_peering(10, 20)
            .add_customer_provider(100, 10)
            .add_customer_provider(200, 20)
            .add_customer_provider(300, 10)
            .add_customer_provider(300, 20)
            .add_peering(100, 200)
            .add_customer_provider(1000, 100)
            .add_customer_provider(2000, 200);
        topo
    }
}
