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


use routesim::report::RoutingReport;
use routesim::{printer, simulate, simulate_parallel, topology, DeliveryOrder};

use clap::Parser;
use log::*;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();
    // run clap
    let args = CommandLineArguments::parse();

    // read the topology. An invalid topology is fatal.
    let mut net = match topology::load_file(&args.topology) {
        Ok(net) => net,
        Err(e) => {
            error!("Cannot load the topology from {}: {}", args.topology, e);
            return Err(e.into());
        }
    };

    net.set_round_limit(Some(args.max_rounds));
    if let Some(seed) = args.seed {
        net.set_delivery_order(DeliveryOrder::Shuffled { seed });
    }

    printer::print_topology(&net)?;

    let (net, outcome) = if args.parallel {
        simulate_parallel(net, args.num_threads)?
    } else {
        simulate(net)?
    };

    if !outcome.is_converged() {
        warn!(
            "The network did not converge within {} rounds! Unresolved prefixes are marked.",
            args.max_rounds
        );
    }

    printer::print_paths(&net, Some(&outcome))?;

    if let Some(filename) = args.json {
        let report = RoutingReport::new(&net, &outcome)?;
        fs::write(&filename, report.to_json()?)?;
        info!("Report written to {}", filename);
    }

    Ok(())
}

/// Simulate the propagation of routes between autonomous systems, following the Gao-Rexford
/// policy, and print the path every AS selects for every prefix.
#[derive(Parser, Debug)]
#[clap(name = "RouteSim", author = "Tibor Schneider", version)]
struct CommandLineArguments {
    /// JSON file describing the ASes and their relationships
    #[clap(short, long)]
    topology: String,
    /// Maximum number of rounds before the simulation is stopped
    #[clap(short = 'r', long, default_value = "10000")]
    max_rounds: usize,
    /// Deliver the messages of every round in a random order, generated from this seed
    #[clap(short, long)]
    seed: Option<u64>,
    /// Simulate the prefixes in parallel
    #[clap(short, long)]
    parallel: bool,
    /// Number of threads used with `--parallel`. Defaults to the number of CPUs.
    #[clap(long)]
    num_threads: Option<usize>,
    /// Write a JSON report of the result into this file
    #[clap(long)]
    json: Option<String>,
}
