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

//! # Diamond

use super::{prefix_name, ExampleNetwork};
use crate::topology::TopologyDescription;

/// # Diamond
///
/// AS 1 is multihomed to the providers 2 and 3, which are both customers of AS 4. AS 4 learns the
/// prefix of AS 1 over two customer paths of equal length.
///
/// ```text
///    4
///   / \
///  2   3
///   \ /
///    1
/// ```
pub struct Diamond {}

impl ExampleNetwork for Diamond {
    fn topology() -> TopologyDescription {
        let mut topo = TopologyDescription::new();
        for number in 1..=4 {
            topo.add_as(number, prefix_name(number));
        }
        topo.add_customer_provider(1, 2)
            .add_customer_provider(1, 3)
            .add_customer_provider(2, 4)
            .add_customer_provider(3, 4);
        topo
    }
}
