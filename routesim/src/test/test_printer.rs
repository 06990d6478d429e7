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

//! Test the formatted output and the JSON report.

use crate::bgp::{Advertisement, BgpEvent};
use crate::event::Event;
use crate::example_networks::*;
use crate::printer;
use crate::report::RoutingReport;
use crate::topology::load;
use crate::{simulate, AsId};

#[test]
fn test_print_topology() {
    let net = Diamond::net().unwrap();
    assert_eq!(
        printer::topology(&net).unwrap(),
        vec![
            "***** Topology *****",
            "AS 1 (10.0.1.0/24): cust=[]; prov=[2, 3]; peer=[]",
            "AS 2 (10.0.2.0/24): cust=[1]; prov=[4]; peer=[]",
            "AS 3 (10.0.3.0/24): cust=[1]; prov=[4]; peer=[]",
            "AS 4 (10.0.4.0/24): cust=[2, 3]; prov=[]; peer=[]",
        ]
    );
}

#[test]
fn test_print_paths() {
    let (net, outcome) = simulate(PeerTriangle::net().unwrap()).unwrap();
    assert_eq!(
        printer::paths(&net, Some(&outcome)).unwrap(),
        vec![
            "***** Paths *****",
            "AS 1:",
            "    10.0.1.0/24: local",
            "    10.0.2.0/24: 2",
            "    10.0.3.0/24: unreachable",
            "AS 2:",
            "    10.0.1.0/24: 1",
            "    10.0.2.0/24: local",
            "    10.0.3.0/24: 3",
            "AS 3:",
            "    10.0.1.0/24: unreachable",
            "    10.0.2.0/24: 2",
            "    10.0.3.0/24: local",
        ]
    );
}

#[test]
fn test_print_unresolved() {
    let mut net = load(&ProviderChain::with_length(4)).unwrap();
    net.set_round_limit(Some(1));
    let outcome = net.simulate().unwrap();
    assert!(!outcome.is_converged());

    let p1 = net.get_prefix(prefix_name(1)).unwrap();
    assert_eq!(
        printer::path(&net, AsId(2), p1, Some(&outcome)).unwrap(),
        "10.0.1.0/24: 1 (unresolved)"
    );
    assert_eq!(
        printer::path(&net, AsId(4), p1, Some(&outcome)).unwrap(),
        "10.0.1.0/24: unreachable (unresolved)"
    );
    assert_eq!(printer::path(&net, AsId(4), p1, None).unwrap(), "10.0.1.0/24: unreachable");
}

#[test]
fn test_print_route_and_event() {
    let net = ProviderChain::net().unwrap();
    let p3 = net.get_prefix(prefix_name(3)).unwrap();
    let route = Advertisement::new(p3, vec![AsId(2), AsId(3)]);
    assert_eq!(printer::advertisement(&net, &route).unwrap(), "10.0.3.0/24: 2 -> 3");

    let event = Event { from: AsId(2), to: AsId(1), msg: BgpEvent::Update(route) };
    assert_eq!(printer::event(&net, &event).unwrap(), "AS 2 -> AS 1: Update 10.0.3.0/24: 2 -> 3");

    let event = Event { from: AsId(2), to: AsId(1), msg: BgpEvent::Withdraw(p3) };
    assert_eq!(printer::event(&net, &event).unwrap(), "AS 2 -> AS 1: Withdraw 10.0.3.0/24");
}

#[test]
fn test_report() {
    let (net, outcome) = simulate(PeerTriangle::net().unwrap()).unwrap();
    let report = RoutingReport::new(&net, &outcome).unwrap();

    assert!(report.converged);
    assert_eq!(report.messages, outcome.messages);
    assert!(report.unresolved.is_empty());
    assert_eq!(report.ases.len(), 3);

    let as1 = &report.ases[0];
    assert_eq!(as1.number, 1);
    assert_eq!(as1.prefix, "10.0.1.0/24");
    assert_eq!(as1.peers, vec![2]);
    assert_eq!(as1.paths[0].path, Some(vec![]));
    assert_eq!(as1.paths[1].path, Some(vec![2]));
    assert_eq!(as1.paths[2].path, None);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["converged"], serde_json::json!(true));
    assert_eq!(json["ases"][0]["paths"][2]["path"], serde_json::Value::Null);
    assert_eq!(json["ases"][2]["paths"][1]["path"], serde_json::json!([2]));
}

#[test]
fn test_report_unresolved() {
    let mut net = load(&ProviderChain::with_length(4)).unwrap();
    net.set_round_limit(Some(1));
    let outcome = net.simulate().unwrap();
    let report = RoutingReport::new(&net, &outcome).unwrap();

    assert!(!report.converged);
    assert_eq!(report.rounds, 1);
    assert!(report.unresolved.contains(&prefix_name(1)));
}
