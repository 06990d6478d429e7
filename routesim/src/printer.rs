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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings and print information about the
//! network.

use crate::autonomous_system::AutonomousSystem;
use crate::bgp::{Advertisement, BgpEvent};
use crate::event::Event;
use crate::network::{Network, SimulationOutcome};
use crate::{AsId, NetworkError, Prefix};

use itertools::Itertools;

fn id_list(ids: &[AsId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}

/// Returns the formatted string of an AS and its relationships, in the form
/// `AS 1 (10.0.1.0/24): cust=[2, 3]; prov=[4]; peer=[]`.
pub fn autonomous_system(net: &Network, r: &AutonomousSystem) -> Result<String, NetworkError> {
    Ok(format!(
        "AS {} ({}): cust={}; prov={}; peer={}",
        r.as_id(),
        net.get_prefix_name(r.prefix())?,
        id_list(&r.customers()),
        id_list(&r.providers()),
        id_list(&r.peers()),
    ))
}

/// Returns the formatted string of an advertisement: `<prefix>: a -> b -> c`, nearest hop first.
/// The self-route is formatted as `<prefix>: local`.
pub fn advertisement(net: &Network, route: &Advertisement) -> Result<String, NetworkError> {
    let prefix = net.get_prefix_name(route.prefix)?;
    if route.is_local() {
        Ok(format!("{}: local", prefix))
    } else {
        Ok(format!("{}: {}", prefix, route.as_path().iter().join(" -> ")))
    }
}

/// Returns the formatted path an AS uses for a prefix. Unreachable prefixes are formatted as
/// `<prefix>: unreachable`. If the prefix is still unresolved in `outcome`, the line ends with
/// `(unresolved)`.
pub fn path(
    net: &Network,
    as_id: AsId,
    prefix: Prefix,
    outcome: Option<&SimulationOutcome>,
) -> Result<String, NetworkError> {
    let mut result = match net.get_route(as_id, prefix)? {
        Some(route) => advertisement(net, route)?,
        None => format!("{}: unreachable", net.get_prefix_name(prefix)?),
    };
    if outcome.map(|o| o.is_unresolved(prefix)).unwrap_or(false) {
        result.push_str(" (unresolved)");
    }
    Ok(result)
}

/// Get a vector of strings, one for every known prefix, containing the path the AS uses to reach
/// it.
pub fn route_table(
    net: &Network,
    as_id: AsId,
    outcome: Option<&SimulationOutcome>,
) -> Result<Vec<String>, NetworkError> {
    net.get_known_prefixes().into_iter().map(|p| path(net, as_id, p, outcome)).collect()
}

/// Returns the formatted string of a message between two ASes.
pub fn event(net: &Network, event: &Event) -> Result<String, NetworkError> {
    Ok(match &event.msg {
        BgpEvent::Update(route) => {
            format!("AS {} -> AS {}: Update {}", event.from, event.to, advertisement(net, route)?)
        }
        BgpEvent::Withdraw(prefix) => format!(
            "AS {} -> AS {}: Withdraw {}",
            event.from,
            event.to,
            net.get_prefix_name(*prefix)?
        ),
    })
}

/// Returns the topology section: a header line followed by one line per AS, sorted by AS number.
pub fn topology(net: &Network) -> Result<Vec<String>, NetworkError> {
    let mut result = vec![String::from("***** Topology *****")];
    for as_id in net.get_ases() {
        result.push(autonomous_system(net, net.get_as(as_id)?)?);
    }
    Ok(result)
}

/// Returns the path section: a header line, and for every AS (sorted by AS number) its name,
/// followed by the indented route table.
pub fn paths(
    net: &Network,
    outcome: Option<&SimulationOutcome>,
) -> Result<Vec<String>, NetworkError> {
    let mut result = vec![String::from("***** Paths *****")];
    for as_id in net.get_ases() {
        result.push(format!("AS {}:", as_id));
        result.extend(route_table(net, as_id, outcome)?.into_iter().map(|l| format!("    {}", l)));
    }
    Ok(result)
}

/// Print the topology section to stdout
pub fn print_topology(net: &Network) -> Result<(), NetworkError> {
    topology(net)?.iter().for_each(|l| println!("{}", l));
    Ok(())
}

/// Print the path section to stdout
pub fn print_paths(net: &Network, outcome: Option<&SimulationOutcome>) -> Result<(), NetworkError> {
    paths(net, outcome)?.iter().for_each(|l| println!("{}", l));
    Ok(())
}
