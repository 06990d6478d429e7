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

//! # Running the simulation
//!
//! Advertisements for different prefixes never interact. Hence, the propagation can be split by
//! prefix, and every part can be computed on its own copy of the network.

use crate::network::{Convergence, Network, SimulationOutcome};
use crate::{Error, NetworkError, Prefix};

use log::*;
use std::thread;

/// # Simulate the network
///
/// Every AS advertises its prefix, and all advertisements are propagated until the network has
/// converged, or until the round limit configured on the network is reached. Non-convergence is
/// not an error; check the returned [`SimulationOutcome`].
///
/// ## Usage
///
/// ```
/// use routesim::{simulate, Error, AsId};
/// use routesim::example_networks::*;
///
/// fn main() -> Result<(), Error> {
///     let net = ProviderChain::net()?;
///     let (net, outcome) = simulate(net)?;
///     assert!(outcome.is_converged());
///
///     let prefix = net.get_as(AsId(3))?.prefix();
///     assert_eq!(net.get_path(AsId(1), prefix)?, Some(vec![AsId(2), AsId(3)]));
///     Ok(())
/// }
/// ```
pub fn simulate(mut net: Network) -> Result<(Network, SimulationOutcome), Error> {
    info!(
        "Simulating {} prefixes on {} ASes",
        net.get_known_prefixes().len(),
        net.get_ases().len()
    );
    let outcome = net.simulate()?;
    log_outcome(&outcome);
    Ok((net, outcome))
}

/// # Simulate the network using multiple parallel threads
///
/// The prefixes are split into `n_threads` groups (by default, the number of CPUs). Every thread
/// simulates its group on a clone of the network. Afterwards, the route tables of all groups are
/// merged back into a single network, which ends up in the same state as after [`simulate`].
///
/// The returned outcome reports the largest number of rounds of any thread, and the total number
/// of messages.
///
/// ## Usage
///
/// ```
/// use routesim::{simulate, simulate_parallel, Error};
/// use routesim::example_networks::*;
///
/// fn main() -> Result<(), Error> {
///     let (seq, _) = simulate(TwoTier::net()?)?;
///     let (par, outcome) = simulate_parallel(TwoTier::net()?, Some(3))?;
///     assert!(outcome.is_converged());
///     assert!(seq.weak_eq(&par));
///     Ok(())
/// }
/// ```
pub fn simulate_parallel(
    mut net: Network,
    n_threads: Option<usize>,
) -> Result<(Network, SimulationOutcome), Error> {
    let prefixes = net.get_known_prefixes();
    let n_threads = n_threads.unwrap_or_else(num_cpus::get).max(1).min(prefixes.len().max(1));
    let chunk_size = (prefixes.len() + n_threads - 1) / n_threads;
    info!(
        "Simulating {} prefixes on {} ASes, using {} threads",
        prefixes.len(),
        net.get_ases().len(),
        n_threads
    );

    let handles = prefixes
        .chunks(chunk_size.max(1))
        .map(|chunk| {
            let mut n = net.clone();
            let p: Vec<Prefix> = chunk.to_vec();
            thread::spawn(move || {
                let result = n.simulate_prefixes(&p);
                result.map(|outcome| (n, p, outcome))
            })
        })
        .collect::<Vec<_>>();

    let mut total: Option<SimulationOutcome> = None;

    // wait until all threads are done
    for handle in handles {
        let (n, p, outcome) = handle.join().map_err(|_| NetworkError::WorkerFailed)??;
        net.merge_prefixes(&n, &p, outcome.messages)?;
        total = Some(match total {
            Some(t) => t.merge(outcome),
            None => outcome,
        });
    }

    let outcome = total.unwrap_or(SimulationOutcome {
        convergence: Convergence::Converged,
        rounds: 0,
        messages: 0,
    });
    log_outcome(&outcome);
    Ok((net, outcome))
}

fn log_outcome(outcome: &SimulationOutcome) {
    if outcome.is_converged() {
        info!(
            "Converged after {} rounds, exchanging {} messages",
            outcome.rounds, outcome.messages
        );
    } else {
        warn!("Stopped after {} rounds without converging!", outcome.rounds);
    }
}
