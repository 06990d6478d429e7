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

//! # Provider Chain

use super::{prefix_name, ExampleNetwork};
use crate::topology::TopologyDescription;

/// # Provider Chain
///
/// Every AS is a customer of the next one: AS 1 is a customer of AS 2, which is a customer of AS
/// 3. Use [`ProviderChain::with_length`] to get a longer chain.
///
/// ```text
///  3
///  |
///  2
///  |
///  1
/// ```
pub struct ProviderChain {}

impl ProviderChain {
    /// Get a chain of `n` ASes, numbered from 1 to `n`, where AS `i` is a customer of AS `i+1`.
    pub fn with_length(n: u32) -> TopologyDescription {
        let mut topo = TopologyDescription::new();
        for i in 1..=n {
            topo.add_as(i, prefix_name(i));
        }
        for i in 1..n {
            topo.add_customer_provider(i, i + 1);
        }
        topo
    }
}

impl ExampleNetwork for ProviderChain {
    fn topology() -> TopologyDescription {
        Self::with_length(3)
    }
}
