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

//! Module defining an autonomous system, running path-vector routing with Gao-Rexford policies.

use crate::bgp::{Advertisement, BgpEvent, RibEntry};
use crate::event::{Event, EventQueue};
use crate::{AsId, DeviceError, Prefix, Relationship};
use itertools::Itertools;
use log::*;
use std::collections::HashMap;

/// Autonomous System
///
/// The relationships to the neighbors are stored by their identifier only. The AS never owns
/// (or references) a neighbor; all messages are passed through the [`Network`](crate::Network).
#[derive(Debug, Clone)]
pub struct AutonomousSystem {
    /// AS number
    as_id: AsId,
    /// prefix originated by this AS
    prefix: Prefix,
    /// relationship of every neighbor, seen from this AS
    neighbors: HashMap<AsId, Relationship>,
    /// Table containing all received entries. It maps the prefix to another hashmap, which maps
    /// the neighbor to the last route received from it.
    rib_in: HashMap<Prefix, HashMap<AsId, RibEntry>>,
    /// Route table, containing the single selected route for each prefix.
    rib: HashMap<Prefix, RibEntry>,
    /// Table containing all exported routes, mapping the prefix to a map from the neighbor to
    /// the advertisement last sent.
    rib_out: HashMap<Prefix, HashMap<AsId, Advertisement>>,
}

impl AutonomousSystem {
    /// Create a new AS. The route table initially only contains the self-route.
    pub(crate) fn new(as_id: AsId, prefix: Prefix) -> Self {
        let mut rib = HashMap::new();
        rib.insert(prefix, RibEntry::local(prefix));
        Self {
            as_id,
            prefix,
            neighbors: HashMap::new(),
            rib_in: HashMap::new(),
            rib,
            rib_out: HashMap::new(),
        }
    }

    /// Return the AS number
    pub fn as_id(&self) -> AsId {
        self.as_id
    }

    /// Return the prefix originated by this AS
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// Add a neighbor. `relationship` tells what `neighbor` is in relation to `self`.
    pub(crate) fn add_neighbor(
        &mut self,
        neighbor: AsId,
        relationship: Relationship,
    ) -> Result<(), DeviceError> {
        if neighbor == self.as_id {
            return Err(DeviceError::SelfRelationship(neighbor));
        }
        if self.neighbors.contains_key(&neighbor) {
            return Err(DeviceError::RelationshipAlreadyExists(neighbor));
        }
        self.neighbors.insert(neighbor, relationship);
        Ok(())
    }

    /// Returns all customers, sorted by their AS number
    pub fn customers(&self) -> Vec<AsId> {
        self.neighbors_of_type(Relationship::Customer)
    }

    /// Returns all providers, sorted by their AS number
    pub fn providers(&self) -> Vec<AsId> {
        self.neighbors_of_type(Relationship::Provider)
    }

    /// Returns all peers, sorted by their AS number
    pub fn peers(&self) -> Vec<AsId> {
        self.neighbors_of_type(Relationship::Peer)
    }

    /// Returns all neighbors with their relationship, sorted by their AS number
    pub fn get_neighbors(&self) -> Vec<(AsId, Relationship)> {
        self.neighbors.iter().map(|(id, rel)| (*id, *rel)).sorted_by_key(|(id, _)| *id).collect()
    }

    /// Returns the relationship of a neighbor.
    pub fn get_relationship(&self, neighbor: AsId) -> Result<Relationship, DeviceError> {
        self.neighbors.get(&neighbor).copied().ok_or(DeviceError::NotANeighbor(neighbor))
    }

    /// Returns the selected route for the prefix, or returns None
    pub fn get_selected_route(&self, prefix: Prefix) -> Option<&RibEntry> {
        self.rib.get(&prefix)
    }

    /// Returns all routes currently received for the prefix, the most preferred first.
    pub fn get_known_routes(&self, prefix: Prefix) -> Vec<&RibEntry> {
        self.rib_in
            .get(&prefix)
            .map(|table| table.values().sorted_by_key(|e| std::cmp::Reverse(e.rank())).collect())
            .unwrap_or_default()
    }

    /// Returns the advertisement last exported to the neighbor for this prefix.
    pub fn get_exported_route(
        &self,
        prefix: Prefix,
        neighbor: AsId,
    ) -> Result<Option<&Advertisement>, DeviceError> {
        self.get_relationship(neighbor)?;
        Ok(self.rib_out.get(&prefix).and_then(|table| table.get(&neighbor)))
    }

    /// Returns the route table, sorted by prefix.
    pub fn get_route_table(&self) -> Vec<(Prefix, &RibEntry)> {
        self.rib.iter().map(|(p, e)| (*p, e)).sorted_by_key(|(p, _)| *p).collect()
    }

    /// Advertise the own prefix to all neighbors.
    pub(crate) fn originate(&mut self, queue: &mut EventQueue) {
        self.send_advertisement(self.prefix, queue);
    }

    /// handle an `Event`, and enqueue all resulting events. Returns true if the selected route
    /// changed.
    pub(crate) fn handle_event(&mut self, event: Event, queue: &mut EventQueue) -> bool {
        if event.to != self.as_id {
            return false;
        }
        match event.msg {
            BgpEvent::Update(route) => self.recv_advertisement(event.from, route, queue),
            BgpEvent::Withdraw(prefix) => self.recv_withdraw(event.from, prefix, queue),
        }
    }

    /// Receive an advertisement from a neighbor. The advertisement replaces whatever was
    /// received earlier from the same neighbor. Returns true if the selected route changed, in
    /// which case the new route is already exported.
    pub(crate) fn recv_advertisement(
        &mut self,
        from: AsId,
        route: Advertisement,
        queue: &mut EventQueue,
    ) -> bool {
        let from_type = match self.neighbors.get(&from) {
            Some(t) => *t,
            None => {
                debug!("AS {} received an advertisement from non-neighbor {}!", self.as_id, from);
                return false;
            }
        };
        if route.contains(self.as_id) {
            trace!("AS {}: loop detected in {:?} from AS {}", self.as_id, route.as_path(), from);
            return false;
        }
        if route.head_neighbor() != Some(from) {
            debug!(
                "AS {}: advertisement {:?} was not sent by its head neighbor {}!",
                self.as_id,
                route.as_path(),
                from
            );
            return false;
        }

        let prefix = route.prefix;
        let entry = RibEntry { route, learned_from: Some((from, from_type)) };
        self.rib_in.entry(prefix).or_default().insert(from, entry);

        self.update_prefix(prefix, queue)
    }

    /// Receive a withdraw from a neighbor. Returns true if the selected route changed.
    pub(crate) fn recv_withdraw(
        &mut self,
        from: AsId,
        prefix: Prefix,
        queue: &mut EventQueue,
    ) -> bool {
        if self.rib_in.get_mut(&prefix).and_then(|table| table.remove(&from)).is_none() {
            return false;
        }
        self.update_prefix(prefix, queue)
    }

    /// Send the currently selected route for the prefix to all neighbors that should receive it.
    /// Only differences to what was sent before are enqueued.
    pub(crate) fn send_advertisement(&mut self, prefix: Prefix, queue: &mut EventQueue) {
        for (neighbor, neighbor_type) in self.get_neighbors() {
            let export = self
                .rib
                .get(&prefix)
                .filter(|entry| self.should_export_route(entry, neighbor, neighbor_type))
                .map(|entry| entry.route.extended_copy(self.as_id))
                .filter(|route| !route.contains(neighbor));
            let current = self.rib_out.get(&prefix).and_then(|table| table.get(&neighbor)).cloned();

            let msg = match (export, current) {
                (Some(new), Some(old)) if new == old => None,
                (Some(new), _) => {
                    self.rib_out.entry(prefix).or_default().insert(neighbor, new.clone());
                    Some(BgpEvent::Update(new))
                }
                (None, Some(_)) => {
                    self.rib_out.entry(prefix).or_default().remove(&neighbor);
                    Some(BgpEvent::Withdraw(prefix))
                }
                (None, None) => None,
            };

            if let Some(msg) = msg {
                queue.push_back(Event { from: self.as_id, to: neighbor, msg });
            }
        }
    }

    /// Copy the entire state for a prefix from `other`, which must be a clone of the same AS.
    pub(crate) fn import_prefix(&mut self, other: &Self, prefix: Prefix) {
        match other.rib_in.get(&prefix) {
            Some(table) => self.rib_in.insert(prefix, table.clone()),
            None => self.rib_in.remove(&prefix),
        };
        match other.rib.get(&prefix) {
            Some(entry) => self.rib.insert(prefix, entry.clone()),
            None => self.rib.remove(&prefix),
        };
        match other.rib_out.get(&prefix) {
            Some(table) => self.rib_out.insert(prefix, table.clone()),
            None => self.rib_out.remove(&prefix),
        };
    }

    /// Checks if both route tables select the same routes for all prefixes.
    pub(crate) fn compare_route_table(&self, other: &Self) -> bool {
        self.rib == other.rib
    }

    // -----------------
    // Private Functions
    // -----------------

    fn neighbors_of_type(&self, relationship: Relationship) -> Vec<AsId> {
        self.neighbors
            .iter()
            .filter(|(_, rel)| **rel == relationship)
            .map(|(id, _)| *id)
            .sorted()
            .collect()
    }

    /// Run the decision process and, if the selection changed, the export.
    fn update_prefix(&mut self, prefix: Prefix, queue: &mut EventQueue) -> bool {
        if self.run_decision_process_for_prefix(prefix) {
            self.send_advertisement(prefix, queue);
            true
        } else {
            false
        }
    }

    /// Select the best route among all received ones. Returns true if the selection changed.
    fn run_decision_process_for_prefix(&mut self, prefix: Prefix) -> bool {
        let mut new_entry =
            if prefix == self.prefix { Some(RibEntry::local(prefix)) } else { None };

        if let Some(rib_in) = self.rib_in.get(&prefix) {
            for entry in rib_in.values() {
                if new_entry.as_ref().map(|best| entry.outranks(best)).unwrap_or(true) {
                    new_entry = Some(entry.clone());
                }
            }
        }

        if new_entry.as_ref() == self.rib.get(&prefix) {
            return false;
        }
        match new_entry {
            Some(entry) => self.rib.insert(prefix, entry),
            None => self.rib.remove(&prefix),
        };
        true
    }

    /// Valley-free export: Routes learned from customers (and the own prefix) are exported to
    /// everyone, routes learned from peers or providers only to customers. A route is never sent
    /// back to the neighbor it was learned from.
    fn should_export_route(&self, entry: &RibEntry, to: AsId, to_type: Relationship) -> bool {
        match entry.learned_from {
            None => true,
            Some((from, _)) if from == to => false,
            Some((_, Relationship::Customer)) => true,
            Some((_, Relationship::Peer)) | Some((_, Relationship::Provider)) => {
                to_type.is_customer()
            }
        }
    }
}
