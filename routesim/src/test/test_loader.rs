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

//! Test building the network from a topology description.

use crate::example_networks::*;
use crate::topology::{load, TopologyDescription, TopologyError};
use crate::{AsId, NetworkError, Relationship};

#[test]
fn test_load_relationships() {
    let net = TwoTier::net().unwrap();

    assert_eq!(
        net.get_ases(),
        vec![AsId(10), AsId(20), AsId(100), AsId(200), AsId(300), AsId(1000), AsId(2000)]
    );

    let r = net.get_as(AsId(10)).unwrap();
    assert_eq!(r.customers(), vec![AsId(100), AsId(300)]);
    assert!(r.providers().is_empty());
    assert_eq!(r.peers(), vec![AsId(20)]);

    let r = net.get_as(AsId(300)).unwrap();
    assert_eq!(r.providers(), vec![AsId(10), AsId(20)]);
    assert_eq!(r.get_relationship(AsId(10)), Ok(Relationship::Provider));

    let r = net.get_as(AsId(100)).unwrap();
    assert_eq!(r.get_relationship(AsId(10)), Ok(Relationship::Provider));
    assert_eq!(r.get_relationship(AsId(200)), Ok(Relationship::Peer));
    assert_eq!(r.get_relationship(AsId(1000)), Ok(Relationship::Customer));
}

#[test]
fn test_relationships_are_mirrored() {
    let net = TwoTier::net().unwrap();
    for as_id in net.get_ases() {
        for (neighbor, rel) in net.get_as(as_id).unwrap().get_neighbors() {
            let other = net.get_as(neighbor).unwrap();
            assert_eq!(other.get_relationship(as_id), Ok(rel.reverse()));
        }
    }
    assert_eq!(Relationship::Customer.reverse(), Relationship::Provider);
    assert_eq!(Relationship::Peer.reverse(), Relationship::Peer);
}

#[test]
fn test_load_prefixes() {
    let net = ProviderChain::net().unwrap();

    let p = net.get_prefix(prefix_name(2)).unwrap();
    assert_eq!(net.get_prefix_name(p), Ok(prefix_name(2).as_str()));
    assert_eq!(net.get_origin(p), Ok(AsId(2)));
    assert_eq!(net.get_as(AsId(2)).unwrap().prefix(), p);
    assert_eq!(net.get_known_prefixes().len(), 3);

    assert_eq!(
        net.get_prefix("192.168.0.0/16"),
        Err(NetworkError::PrefixNameNotFound("192.168.0.0/16".to_string()))
    );
    assert_eq!(net.get_as(AsId(4)).map(|_| ()), Err(NetworkError::DeviceNotFound(AsId(4))));
}

#[test]
fn test_unknown_as() {
    let mut topo = ProviderChain::topology();
    topo.add_customer_provider(3, 99);
    assert!(matches!(load(&topo), Err(TopologyError::UnknownAs(AsId(99)))));

    let mut topo = PeerTriangle::topology();
    topo.add_peering(99, 1);
    assert!(matches!(load(&topo), Err(TopologyError::UnknownAs(AsId(99)))));
}

#[test]
fn test_duplicate_as() {
    let mut topo = ProviderChain::topology();
    topo.add_as(2, "192.168.0.0/16");
    assert!(matches!(load(&topo), Err(TopologyError::DuplicateAs(AsId(2)))));
}

#[test]
fn test_duplicate_prefix() {
    let mut topo = ProviderChain::topology();
    topo.add_as(4, prefix_name(1));
    match load(&topo) {
        Err(TopologyError::DuplicatePrefix(p)) => assert_eq!(p, prefix_name(1)),
        r => panic!("Unexpected result: {:?}", r.map(|_| ())),
    }
}

#[test]
fn test_self_relationship() {
    let mut topo = PeerTriangle::topology();
    topo.add_peering(2, 2);
    assert!(matches!(load(&topo), Err(TopologyError::SelfRelationship(AsId(2)))));

    let mut topo = PeerTriangle::topology();
    topo.add_customer_provider(3, 3);
    assert!(matches!(load(&topo), Err(TopologyError::SelfRelationship(AsId(3)))));
}

#[test]
fn test_duplicate_relationship() {
    let mut topo = PeerTriangle::topology();
    topo.add_customer_provider(2, 1);
    assert!(matches!(load(&topo), Err(TopologyError::DuplicateRelationship(AsId(2), AsId(1)))));

    let mut topo = ProviderChain::topology();
    topo.add_customer_provider(2, 1);
    assert!(matches!(load(&topo), Err(TopologyError::DuplicateRelationship(AsId(2), AsId(1)))));

    let mut topo = ProviderChain::topology();
    topo.add_peering(1, 2);
    assert!(matches!(load(&topo), Err(TopologyError::DuplicateRelationship(AsId(1), AsId(2)))));
}

#[test]
fn test_provider_cycle() {
    let mut topo = ProviderChain::topology();
    topo.add_customer_provider(3, 1);
    assert!(matches!(load(&topo), Err(TopologyError::ProviderCycle(_))));

    // peerings never form a cycle
    let mut topo = ProviderChain::topology();
    topo.add_peering(3, 1);
    assert!(load(&topo).is_ok());
}

#[test]
fn test_empty_topology() {
    let net = load(&TopologyDescription::new()).unwrap();
    assert!(net.get_ases().is_empty());
    assert!(net.get_known_prefixes().is_empty());
}
