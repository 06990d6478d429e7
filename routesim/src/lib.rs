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


#![deny(missing_docs)]

//! # RouteSim: Inter-Domain Routing Simulator
//! This is a library for simulating how routes to the prefixes of Autonomous Systems (ASes)
//! propagate through a network of ASes, connected by commercial relationships.
//!
//! ## Model
//! Every AS originates exactly one prefix. Two ASes are either in a customer-provider
//! relationship, or they peer with each other. Advertisements carry the AS path (nearest hop
//! first, origin last). Every AS follows the Gao-Rexford policy:
//!
//! - **Ranking**: The own prefix is always reached locally. Otherwise, routes learned from
//!   customers are preferred over routes from peers, which are preferred over routes from
//!   providers. Among routes of the same class, the shorter AS path wins, and remaining ties are
//!   broken by the smaller AS number of the neighbor.
//! - **Export**: Routes learned from customers (and the own prefix) are exported to all
//!   neighbors. Routes learned from peers or providers are only exported to customers. Hence,
//!   all paths are valley-free.
//! - **Acceptance**: Advertisements containing the own AS number are dropped.
//!
//! ## Structure
//!
//! - **[`Network`]**: Registry of all [`AutonomousSystem`]s, which passes all messages between
//!   them until the network converges (or a round limit is reached).
//! - **[`topology`]**: Read the topology from a JSON file, and build the network.
//! - **[`printer`]**: Format the topology and the selected paths.
//! - **[`report`]**: Machine-readable report of the result.
//! - **[`example_networks`]**: Collection of prepared topologies.
//!
//! ## Usage
//!
//! ```
//! use routesim::topology::{load, TopologyDescription};
//! use routesim::{simulate, AsId, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let mut topo = TopologyDescription::new();
//!     topo.add_as(1, "10.0.1.0/24")
//!         .add_as(2, "10.0.2.0/24")
//!         .add_as(3, "10.0.3.0/24")
//!         .add_customer_provider(1, 2)
//!         .add_customer_provider(3, 2);
//!
//!     let (net, outcome) = simulate(load(&topo)?)?;
//!     assert!(outcome.is_converged());
//!
//!     let prefix = net.get_prefix("10.0.3.0/24")?;
//!     assert_eq!(net.get_path(AsId(1), prefix)?, Some(vec![AsId(2), AsId(3)]));
//!     Ok(())
//! }
//! ```

mod autonomous_system;
pub mod bgp;
mod error;
pub mod event;
pub mod example_networks;
mod network;
pub mod printer;
pub mod report;
mod simulate;
pub mod topology;
mod types;

pub use autonomous_system::AutonomousSystem;
pub use bgp::{Advertisement, RibEntry};
pub use error::Error;
pub use network::{Convergence, DeliveryOrder, Network, SimulationOutcome};
pub use simulate::{simulate, simulate_parallel};
pub use topology::TopologyError;
pub use types::{AsHierarchy, AsId, DeviceError, NetworkError, Prefix, Relationship};

#[cfg(test)]
mod test;
