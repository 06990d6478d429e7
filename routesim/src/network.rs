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

//! # Top-level Network module
//!
//! This module holds the registry of all ASes, and drives the propagation of advertisements
//! until the network has converged.

use crate::autonomous_system::AutonomousSystem;
use crate::bgp::{Advertisement, BgpEvent};
use crate::event::{Event, EventQueue};
use crate::topology::TopologyError;
use crate::types::AsHierarchy;
use crate::{AsId, DeviceError, NetworkError, Prefix, Relationship};

use itertools::Itertools;
use log::*;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

const DEFAULT_ROUND_LIMIT: usize = 10_000;

/// Order in which the messages of a single round are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOrder {
    /// Deliver messages in the order in which they were sent.
    Fifo,
    /// Shuffle the messages of every round, using a random generator with the given seed.
    /// Messages sent over the same link are still delivered in the order in which they were
    /// sent.
    Shuffled {
        /// Seed for the random generator
        seed: u64,
    },
}

impl Default for DeliveryOrder {
    fn default() -> Self {
        Self::Fifo
    }
}

/// Whether the simulation has reached a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Convergence {
    /// No message is pending, and no route table will change anymore.
    Converged,
    /// The round limit was reached. `unresolved` contains all prefixes for which messages were
    /// still pending.
    NoConvergence {
        /// Prefixes which are not yet stable
        unresolved: Vec<Prefix>,
    },
}

/// Result of running the propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Convergence state
    pub convergence: Convergence,
    /// Number of rounds executed
    pub rounds: usize,
    /// Number of messages delivered
    pub messages: usize,
}

impl SimulationOutcome {
    /// Returns true if the network converged
    pub fn is_converged(&self) -> bool {
        matches!(self.convergence, Convergence::Converged)
    }

    /// Returns true if the prefix was still oscillating (or not yet propagated) when the
    /// simulation stopped.
    pub fn is_unresolved(&self, prefix: Prefix) -> bool {
        match &self.convergence {
            Convergence::Converged => false,
            Convergence::NoConvergence { unresolved } => unresolved.contains(&prefix),
        }
    }

    /// Combine the outcome of two simulations on disjoint sets of prefixes.
    pub(crate) fn merge(self, other: Self) -> Self {
        let convergence = match (self.convergence, other.convergence) {
            (Convergence::Converged, Convergence::Converged) => Convergence::Converged,
            (Convergence::NoConvergence { unresolved }, Convergence::Converged)
            | (Convergence::Converged, Convergence::NoConvergence { unresolved }) => {
                Convergence::NoConvergence { unresolved }
            }
            (
                Convergence::NoConvergence { unresolved: a },
                Convergence::NoConvergence { unresolved: b },
            ) => Convergence::NoConvergence {
                unresolved: a.into_iter().chain(b).sorted().collect(),
            },
        };
        Self {
            convergence,
            rounds: self.rounds.max(other.rounds),
            messages: self.messages + other.messages,
        }
    }
}

/// # Network struct
///
/// The network is the registry of all ASes, keyed by their AS number. The relationships are
/// stored inside every AS by identifier, and the customer-provider hierarchy is mirrored in a
/// directed graph (edges point from the customer to the provider) to validate the topology.
///
/// The network passes all messages between the ASes. The propagation works in rounds: every
/// round delivers all messages that are currently pending, and the messages generated while
/// doing so are delivered in the next round. The simulation has converged once no message is
/// pending. If this is not the case after the configured number of rounds, the simulation stops
/// and reports the prefixes that are not yet resolved.
#[derive(Debug, Clone)]
pub struct Network {
    ases: HashMap<AsId, AutonomousSystem>,
    hierarchy: AsHierarchy,
    node_lookup: HashMap<AsId, NodeIndex<u32>>,
    prefixes: Vec<(String, AsId)>,
    prefix_lookup: HashMap<String, Prefix>,
    round_limit: Option<usize>,
    delivery_order: DeliveryOrder,
    queue: EventQueue,
    num_msg: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Generate an empty Network
    pub fn new() -> Self {
        Self {
            ases: HashMap::new(),
            hierarchy: AsHierarchy::new(),
            node_lookup: HashMap::new(),
            prefixes: Vec::new(),
            prefix_lookup: HashMap::new(),
            round_limit: Some(DEFAULT_ROUND_LIMIT),
            delivery_order: DeliveryOrder::Fifo,
            queue: EventQueue::new(),
            num_msg: 0,
        }
    }

    // ***********************
    // * Building the network *
    // ***********************

    /// Add a new AS originating `prefix`. Returns the handle for the prefix.
    pub fn add_as(
        &mut self,
        as_id: AsId,
        prefix: impl Into<String>,
    ) -> Result<Prefix, TopologyError> {
        let prefix_name = prefix.into();
        if self.ases.contains_key(&as_id) {
            return Err(TopologyError::DuplicateAs(as_id));
        }
        if self.prefix_lookup.contains_key(&prefix_name) {
            return Err(TopologyError::DuplicatePrefix(prefix_name));
        }

        let prefix = Prefix(self.prefixes.len() as u32);
        self.prefixes.push((prefix_name.clone(), as_id));
        self.prefix_lookup.insert(prefix_name, prefix);
        self.ases.insert(as_id, AutonomousSystem::new(as_id, prefix));
        self.node_lookup.insert(as_id, self.hierarchy.add_node(as_id));

        Ok(prefix)
    }

    /// Add a relationship, where `customer` buys transit from `provider`.
    pub fn add_customer_provider(
        &mut self,
        customer: AsId,
        provider: AsId,
    ) -> Result<(), TopologyError> {
        self.check_new_relationship(customer, provider)?;
        self.add_relationship(customer, provider, Relationship::Provider)?;
        self.hierarchy.add_edge(self.node_lookup[&customer], self.node_lookup[&provider], ());
        Ok(())
    }

    /// Add a settlement-free peering between `a` and `b`.
    pub fn add_peering(&mut self, a: AsId, b: AsId) -> Result<(), TopologyError> {
        self.check_new_relationship(a, b)?;
        self.add_relationship(a, b, Relationship::Peer)
    }

    /// Make sure that no AS is (indirectly) its own provider.
    pub fn check_hierarchy(&self) -> Result<(), TopologyError> {
        match toposort(&self.hierarchy, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(TopologyError::ProviderCycle(self.hierarchy[cycle.node_id()])),
        }
    }

    // *****************
    // * Configuration *
    // *****************

    /// Set the maximum number of rounds. `None` removes the bound, which may cause the simulation
    /// to run forever.
    pub fn set_round_limit(&mut self, round_limit: Option<usize>) {
        self.round_limit = round_limit;
    }

    /// Get the maximum number of rounds
    pub fn get_round_limit(&self) -> Option<usize> {
        self.round_limit
    }

    /// Set the order in which messages are delivered within a round.
    pub fn set_delivery_order(&mut self, delivery_order: DeliveryOrder) {
        self.delivery_order = delivery_order;
    }

    // **************
    // * Simulation *
    // **************

    /// Let every AS advertise its own prefix, and propagate all advertisements until the network
    /// converges or the round limit is reached.
    pub fn simulate(&mut self) -> Result<SimulationOutcome, NetworkError> {
        let prefixes = self.get_known_prefixes();
        self.simulate_prefixes(&prefixes)
    }

    /// Like [`Network::simulate`], but only the given prefixes are advertised.
    pub fn simulate_prefixes(
        &mut self,
        prefixes: &[Prefix],
    ) -> Result<SimulationOutcome, NetworkError> {
        for prefix in prefixes {
            let origin = self.get_origin(*prefix)?;
            self.ases
                .get_mut(&origin)
                .ok_or(NetworkError::DeviceNotFound(origin))?
                .originate(&mut self.queue);
        }
        self.do_queue()
    }

    /// Returns true if messages are still waiting to be delivered.
    pub fn has_pending_messages(&self) -> bool {
        !self.queue.is_empty()
    }

    // *********
    // * Query *
    // *********

    /// Return the AS with the given number
    pub fn get_as(&self, as_id: AsId) -> Result<&AutonomousSystem, NetworkError> {
        self.ases.get(&as_id).ok_or(NetworkError::DeviceNotFound(as_id))
    }

    /// Returns a sorted list of all AS numbers
    pub fn get_ases(&self) -> Vec<AsId> {
        self.ases.keys().copied().sorted().collect()
    }

    /// Returns a list of all prefixes
    pub fn get_known_prefixes(&self) -> Vec<Prefix> {
        (0..self.prefixes.len() as u32).map(Prefix).collect()
    }

    /// Returns the textual representation of the prefix
    pub fn get_prefix_name(&self, prefix: Prefix) -> Result<&str, NetworkError> {
        self.prefixes
            .get(prefix.0 as usize)
            .map(|(name, _)| name.as_str())
            .ok_or(NetworkError::PrefixNotFound(prefix))
    }

    /// Returns the prefix handle for the textual representation
    pub fn get_prefix(&self, name: impl AsRef<str>) -> Result<Prefix, NetworkError> {
        self.prefix_lookup
            .get(name.as_ref())
            .copied()
            .ok_or_else(|| NetworkError::PrefixNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the AS that originates the prefix
    pub fn get_origin(&self, prefix: Prefix) -> Result<AsId, NetworkError> {
        self.prefixes
            .get(prefix.0 as usize)
            .map(|(_, origin)| *origin)
            .ok_or(NetworkError::PrefixNotFound(prefix))
    }

    /// Returns the advertisement selected by `as_id` for `prefix`, or `None` if the prefix is
    /// unreachable.
    pub fn get_route(
        &self,
        as_id: AsId,
        prefix: Prefix,
    ) -> Result<Option<&Advertisement>, NetworkError> {
        self.get_prefix_name(prefix)?;
        Ok(self.get_as(as_id)?.get_selected_route(prefix).map(|entry| entry.route()))
    }

    /// Returns the path `as_id` uses to reach `prefix` (nearest hop first), or `None` if the
    /// prefix is unreachable. The path of the own prefix is empty.
    pub fn get_path(&self, as_id: AsId, prefix: Prefix) -> Result<Option<Vec<AsId>>, NetworkError> {
        Ok(self.get_route(as_id, prefix)?.map(|route| route.as_path().to_vec()))
    }

    /// Returns the number of messages delivered so far
    pub fn num_msg_exchanged(&self) -> usize {
        self.num_msg
    }

    /// Checks if both networks have selected the same routes on all ASes. This function assumes
    /// that both networks are built from the same topology.
    pub fn weak_eq(&self, other: &Self) -> bool {
        if self.ases.len() != other.ases.len() {
            return false;
        }
        self.ases.iter().all(|(id, r)| match other.ases.get(id) {
            Some(o) => r.compare_route_table(o),
            None => false,
        })
    }

    /// Take over the state of the given prefixes from `other`, which must be a clone of `self`
    /// that simulated exactly these prefixes, exchanging `messages` messages while doing so.
    pub(crate) fn merge_prefixes(
        &mut self,
        other: &Self,
        prefixes: &[Prefix],
        messages: usize,
    ) -> Result<(), NetworkError> {
        for (as_id, r) in self.ases.iter_mut() {
            let o = other.ases.get(as_id).ok_or(NetworkError::DeviceNotFound(*as_id))?;
            for prefix in prefixes {
                r.import_prefix(o, *prefix);
            }
        }
        self.queue.extend(other.queue.iter().filter(|e| prefixes.contains(&e.prefix())).cloned());
        self.num_msg += messages;
        Ok(())
    }

    // *******************
    // * Local Functions *
    // *******************

    fn get_as_mut(&mut self, as_id: AsId) -> Result<&mut AutonomousSystem, TopologyError> {
        self.ases.get_mut(&as_id).ok_or(TopologyError::UnknownAs(as_id))
    }

    /// Store the relationship on both ends. `relationship` is what `b` is for `a`.
    fn add_relationship(
        &mut self,
        a: AsId,
        b: AsId,
        relationship: Relationship,
    ) -> Result<(), TopologyError> {
        let dup = |_| TopologyError::DuplicateRelationship(a, b);
        self.get_as_mut(a)?.add_neighbor(b, relationship).map_err(dup)?;
        self.get_as_mut(b)?.add_neighbor(a, relationship.reverse()).map_err(dup)?;
        Ok(())
    }

    fn check_new_relationship(&self, a: AsId, b: AsId) -> Result<(), TopologyError> {
        let r = self.ases.get(&a).ok_or(TopologyError::UnknownAs(a))?;
        if !self.ases.contains_key(&b) {
            return Err(TopologyError::UnknownAs(b));
        }
        if a == b {
            return Err(TopologyError::SelfRelationship(a));
        }
        match r.get_relationship(b) {
            Err(DeviceError::NotANeighbor(_)) => Ok(()),
            _ => Err(TopologyError::DuplicateRelationship(a, b)),
        }
    }

    /// Execute the queue, round by round.
    fn do_queue(&mut self) -> Result<SimulationOutcome, NetworkError> {
        let mut rng = match self.delivery_order {
            DeliveryOrder::Fifo => None,
            DeliveryOrder::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
        };
        let start_msg = self.num_msg;
        let mut rounds: usize = 0;

        while !self.queue.is_empty() {
            if let Some(limit) = self.round_limit {
                if rounds >= limit {
                    let unresolved: Vec<Prefix> =
                        self.queue.iter().map(|e| e.prefix()).unique().sorted().collect();
                    warn!(
                        "Network did not converge after {} rounds! {} prefixes unresolved",
                        rounds,
                        unresolved.len()
                    );
                    return Ok(SimulationOutcome {
                        convergence: Convergence::NoConvergence { unresolved },
                        rounds,
                        messages: self.num_msg - start_msg,
                    });
                }
            }

            let mut round: Vec<Event> = self.queue.drain(..).collect();
            if let Some(rng) = rng.as_mut() {
                round = shuffle_round(round, rng);
            }
            debug!("Round {}: delivering {} messages", rounds, round.len());

            for event in round {
                self.do_queue_step(event)?;
            }
            rounds += 1;
        }

        Ok(SimulationOutcome {
            convergence: Convergence::Converged,
            rounds,
            messages: self.num_msg - start_msg,
        })
    }

    /// Deliver a single message. Returns true if the route table of the receiver changed.
    fn do_queue_step(&mut self, event: Event) -> Result<bool, NetworkError> {
        self.log_event(&event)?;
        self.num_msg += 1;
        let to = event.to;
        let r = self.ases.get_mut(&to).ok_or(NetworkError::DeviceNotFound(to))?;
        Ok(r.handle_event(event, &mut self.queue))
    }

    fn log_event(&self, event: &Event) -> Result<(), NetworkError> {
        match &event.msg {
            BgpEvent::Update(route) => trace!(
                "AS {} -> AS {}: Update {} {:?}",
                event.from,
                event.to,
                self.get_prefix_name(route.prefix)?,
                route.as_path().iter().map(|x| x.0).collect::<Vec<u32>>()
            ),
            BgpEvent::Withdraw(prefix) => trace!(
                "AS {} -> AS {}: Withdraw {}",
                event.from,
                event.to,
                self.get_prefix_name(*prefix)?
            ),
        }
        Ok(())
    }
}

/// Shuffle the messages of a round, while keeping the order of all messages between the same pair
/// of ASes. Every position in the round is assigned to a random link, and the messages of each
/// link fill their positions in sending order.
pub(crate) fn shuffle_round(round: Vec<Event>, rng: &mut StdRng) -> Vec<Event> {
    let mut slots: Vec<(AsId, AsId)> = round.iter().map(|e| (e.from, e.to)).collect();
    slots.shuffle(rng);
    let mut links: HashMap<(AsId, AsId), VecDeque<Event>> = HashMap::new();
    for event in round {
        links.entry((event.from, event.to)).or_default().push_back(event);
    }
    slots.into_iter().filter_map(|link| links.get_mut(&link).and_then(|q| q.pop_front())).collect()
}
