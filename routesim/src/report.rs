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

//! # JSON report of the simulation result

use crate::network::{Convergence, Network, SimulationOutcome};
use crate::{AsId, NetworkError};

use serde::Serialize;

/// Result of a simulation, ready to be serialized.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingReport {
    /// True if the network converged
    pub converged: bool,
    /// Number of rounds executed
    pub rounds: usize,
    /// Number of messages delivered
    pub messages: usize,
    /// Names of all prefixes that were still pending when the simulation stopped
    pub unresolved: Vec<String>,
    /// Every AS, sorted by AS number
    pub ases: Vec<AsReport>,
}

/// Relationships and selected paths of a single AS
#[derive(Debug, Clone, Serialize)]
pub struct AsReport {
    /// AS number
    pub number: u32,
    /// Prefix originated by this AS
    pub prefix: String,
    /// AS numbers of all customers
    pub customers: Vec<u32>,
    /// AS numbers of all providers
    pub providers: Vec<u32>,
    /// AS numbers of all peers
    pub peers: Vec<u32>,
    /// Selected path for every known prefix
    pub paths: Vec<PathReport>,
}

/// Path selected for a single prefix. `path` is `null` if the prefix is unreachable, and empty
/// for the own prefix.
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    /// Name of the prefix
    pub prefix: String,
    /// AS path, nearest hop first
    pub path: Option<Vec<u32>>,
}

fn numbers(ids: Vec<AsId>) -> Vec<u32> {
    ids.into_iter().map(|id| id.0).collect()
}

impl RoutingReport {
    /// Collect the report from a simulated network.
    pub fn new(net: &Network, outcome: &SimulationOutcome) -> Result<Self, NetworkError> {
        let unresolved = match &outcome.convergence {
            Convergence::Converged => Vec::new(),
            Convergence::NoConvergence { unresolved } => unresolved
                .iter()
                .map(|p| net.get_prefix_name(*p).map(String::from))
                .collect::<Result<_, _>>()?,
        };

        let mut ases = Vec::new();
        for as_id in net.get_ases() {
            let r = net.get_as(as_id)?;
            let mut paths = Vec::new();
            for prefix in net.get_known_prefixes() {
                paths.push(PathReport {
                    prefix: net.get_prefix_name(prefix)?.to_string(),
                    path: net.get_path(as_id, prefix)?.map(numbers),
                });
            }
            ases.push(AsReport {
                number: as_id.0,
                prefix: net.get_prefix_name(r.prefix())?.to_string(),
                customers: numbers(r.customers()),
                providers: numbers(r.providers()),
                peers: numbers(r.peers()),
                paths,
            });
        }

        Ok(Self {
            converged: outcome.is_converged(),
            rounds: outcome.rounds,
            messages: outcome.messages,
            unresolved,
            ases,
        })
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
