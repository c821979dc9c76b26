//! integration tests covering cold start, route learning, split horizon,
//! poison-on-silence, reactive poison reverse, and count-to-infinity
//! guarding, exercised directly against `RoutingTable`/`wire` without
//! opening real sockets — the same boundary drawn between codec-level
//! tests and behavioral end-to-end tests elsewhere in this style of crate.

use rip::table::RoutingTable;
use rip::wire;
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

const QUEEG: &str = "129.21.30.37";
const COMET: &str = "129.21.34.80";
const RHEA: &str = "129.21.27.49";
const GLADOS: &str = "129.21.22.196";

#[test]
fn scenario_1_cold_start_two_neighbors() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    let snap = table.snapshot_excluding(None);
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].cost, 0);

    // one cycle of silence: no neighbor entries exist yet, so the TTL
    // decay pass (which only ever touches neighbor-liveness entries)
    // reports nothing dead.
    let neighbors = [ip(COMET), ip(GLADOS)];
    assert!(table.decay_ttl(&neighbors).is_empty());

    // the broadcast to either neighbor carries exactly the self-route.
    let to_comet = wire::encode(&table.snapshot_excluding(Some(ip(COMET))));
    let decoded = wire::decode(&to_comet).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].cost, 0);
}

#[test]
fn scenario_2_learning_a_route() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    // B (comet) advertises its own self-route to A (queeg).
    table.relax(ip(COMET), 24, ip(COMET), 0);

    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(1));
    let snap = table.snapshot_excluding(None);
    let comet_route = snap.iter().find(|e| e.subnet() == ip("129.21.34.0")).unwrap();
    assert_eq!(comet_route.next_hop, ip(COMET));
}

#[test]
fn scenario_3_split_horizon_on_rebroadcast() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    table.relax(ip(COMET), 24, ip(COMET), 0);

    let to_comet = table.snapshot_excluding(Some(ip(COMET)));
    assert!(to_comet.iter().all(|e| e.subnet() != ip("129.21.34.0")));
    assert!(to_comet.iter().any(|e| e.subnet() == ip("129.21.30.0")));

    let to_glados = table.snapshot_excluding(Some(ip(GLADOS)));
    assert_eq!(to_glados.len(), 2);
}

#[test]
fn scenario_4_poison_on_silence() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    table.relax(ip(COMET), 24, ip(COMET), 0);

    let neighbors = [ip(COMET), ip(GLADOS)];
    // TTL = 5: B stops responding for five consecutive send cycles.
    for _ in 0..4 {
        assert!(table.decay_ttl(&neighbors).is_empty());
    }
    let dead = table.decay_ttl(&neighbors);
    assert_eq!(dead, vec![ip(COMET)]);
    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(16));

    // A's next broadcast to C advertises B/24 at cost 16.
    let to_rhea = wire::encode(&table.snapshot_excluding(Some(ip(RHEA))));
    let decoded = wire::decode(&to_rhea).unwrap();
    let comet_entry = decoded.iter().find(|e| e.subnet == ip("129.21.34.0")).unwrap();
    assert_eq!(comet_entry.cost, 16);
}

#[test]
fn scenario_5_reactive_poison_reverse() {
    // C (rhea) was using A (queeg) as next_hop for B/24 at cost 2.
    let table = RoutingTable::bootstrap(ip(RHEA), 24);
    table.relax(ip(COMET), 24, ip(QUEEG), 1); // C learns B/24 via A at cost 2

    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(2));

    // C receives from A an advertisement poisoning B/24.
    let newly_poisoned = table.relax(ip(COMET), 24, ip(QUEEG), 16);
    assert!(newly_poisoned);
    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(16));

    // the poison-reverse burst uses no split horizon: the full table,
    // including the just-poisoned route and the entry whose next_hop is A.
    let full = table.snapshot_excluding(None);
    assert!(full.iter().any(|e| e.subnet() == ip("129.21.34.0") && e.next_hop == ip(QUEEG)));
}

#[test]
fn scenario_6_count_to_infinity_guarded() {
    // A receives an advertisement from B claiming A/24 at cost 5.
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    let newly_poisoned = table.relax(ip(QUEEG), 24, ip(COMET), 5);
    assert!(!newly_poisoned);
    assert_eq!(table.cost_of(ip("129.21.30.0")), Some(0));

    let snap = table.snapshot_excluding(None);
    let self_route = snap.iter().find(|e| e.subnet() == ip("129.21.30.0")).unwrap();
    assert_eq!(self_route.next_hop, ip(QUEEG));
    assert_eq!(self_route.cost, 0);
}

#[test]
fn idempotence_receiving_same_advertisement_twice() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    table.relax(ip(COMET), 24, ip(COMET), 0);
    let before = table.cost_of(ip("129.21.34.0"));

    table.relax(ip(COMET), 24, ip(COMET), 0);
    let after = table.cost_of(ip("129.21.34.0"));

    assert_eq!(before, after);
}

#[test]
fn monotone_withdrawal_holds_until_strict_improvement() {
    let table = RoutingTable::bootstrap(ip(QUEEG), 24);
    table.relax(ip(COMET), 24, ip(COMET), 0);
    table.relax(ip(COMET), 24, ip(COMET), 16);
    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(16));

    // a tied, non-improving re-advertisement at the same (poisoned) cost
    // does not reset anything, but a strictly better advertisement does.
    table.relax(ip(COMET), 24, ip(COMET), 16);
    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(16));

    table.relax(ip(COMET), 24, ip(COMET), 0);
    assert_eq!(table.cost_of(ip("129.21.34.0")), Some(1));
}
