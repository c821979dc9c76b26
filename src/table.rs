use crate::config::{HOP_LIMIT, TTL};
use parking_lot::Mutex;
use std::net::IpAddr;

/// a single destination route.
///
/// equality of two entries is defined by equal `subnet`; the derive is
/// intentionally *not* used here so that comparisons always go through
/// [`RouteEntry::subnet`] rather than full structural equality.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub address: IpAddr,
    pub mask_bits: u8,
    pub next_hop: IpAddr,
    pub cost: u32,
    /// remaining allowed silent send-cycles; only meaningful for entries
    /// whose `address` is a direct neighbor's address.
    pub ttl: u32,
}

impl RouteEntry {
    pub fn new(address: IpAddr, mask_bits: u8, next_hop: IpAddr, cost: u32) -> Self {
        Self { address, mask_bits, next_hop, cost, ttl: TTL }
    }

    /// the canonical network address: `address` with its host bits zeroed.
    ///
    /// masks each octet by the top `k` bits where
    /// `k = max(0, min(8, mask_bits - 8*octet_index))`; idempotent —
    /// masking an already-masked address yields itself.
    pub fn subnet(&self) -> IpAddr {
        canonical_mask(self.address, self.mask_bits)
    }
}

/// masks `addr` to its network address under a `mask_bits`-wide prefix.
pub fn canonical_mask(addr: IpAddr, mask_bits: u8) -> IpAddr {
    let IpAddr::V4(v4) = addr else {
        // non-goal: IPv6. every address in this daemon's mesh is v4; a v6
        // address is returned unmasked rather than panicking.
        return addr;
    };

    let mut octets = v4.octets();
    for (i, octet) in octets.iter_mut().enumerate() {
        let bits = (mask_bits as i16 - 8 * i as i16).clamp(0, 8) as u32;
        let keep_mask = if bits == 0 { 0u8 } else { !0u8 << (8 - bits) };
        *octet &= keep_mask;
    }

    IpAddr::V4(octets.into())
}

/// shared, mutex-guarded collection of route entries.
///
/// every read or write of the entry sequence happens while holding the
/// lock; readers copy a snapshot out rather than returning a reference that
/// would outlive the critical section.
pub struct RoutingTable {
    entries: Mutex<Vec<RouteEntry>>,
}

impl RoutingTable {
    /// builds a table seeded with the self-route.
    pub fn bootstrap(self_ip: IpAddr, sub_bits: u8) -> Self {
        let mut self_route = RouteEntry::new(self_ip, sub_bits, self_ip, 0);
        self_route.ttl = TTL;
        Self { entries: Mutex::new(vec![self_route]) }
    }

    /// copies out every entry whose `next_hop` is not `exclude` — the
    /// split-horizon filter used when serializing an advertisement for a
    /// specific neighbor.
    pub fn snapshot_excluding(&self, exclude: Option<IpAddr>) -> Vec<RouteEntry> {
        let entries = self.entries.lock();
        match exclude {
            Some(addr) => entries.iter().filter(|e| e.next_hop != addr).cloned().collect(),
            None => entries.clone(),
        }
    }

    /// looks up the current cost for a subnet, if known.
    pub fn cost_of(&self, subnet: IpAddr) -> Option<u32> {
        self.entries.lock().iter().find(|e| e.subnet() == subnet).map(|e| e.cost)
    }

    /// applies one inbound entry's relaxation against this table. returns
    /// `true` if the route was newly poisoned by this call (i.e. a reactive
    /// poison-reverse advertisement is owed to the sender). the self-route
    /// (the unique entry with `cost == 0`) is immune: left unchanged, and
    /// this always returns `false` for it.
    pub fn relax(&self, address: IpAddr, mask_bits: u8, sender: IpAddr, advertised_cost: u32) -> bool {
        let mut entries = self.entries.lock();
        Self::relax_locked(&mut entries, address, mask_bits, sender, advertised_cost)
    }

    fn relax_locked(
        entries: &mut Vec<RouteEntry>,
        address: IpAddr,
        mask_bits: u8,
        sender: IpAddr,
        advertised_cost: u32,
    ) -> bool {
        let subnet = canonical_mask(address, mask_bits);
        let new_cost = if advertised_cost >= HOP_LIMIT {
            HOP_LIMIT
        } else {
            (advertised_cost + 1).min(HOP_LIMIT)
        };

        match entries.iter_mut().find(|e| e.subnet() == subnet) {
            None => {
                // previously-unknown subnet. the self-subnet is always
                // present from bootstrap, so this can never re-learn the
                // router's own network (the count-to-infinity guard).
                entries.push(RouteEntry::new(address, mask_bits, sender, new_cost));
                false
            },
            Some(entry) if entry.cost == 0 => {
                // self-route immunity: the unique cost-0 entry never
                // changes under any inbound advertisement.
                false
            },
            Some(entry) => {
                let was_poisoned = entry.cost >= HOP_LIMIT;
                let is_poison_advertisement = new_cost >= HOP_LIMIT;
                if new_cost < entry.cost || is_poison_advertisement {
                    entry.address = address;
                    entry.mask_bits = mask_bits;
                    entry.next_hop = sender;
                    entry.cost = new_cost;
                    is_poison_advertisement && !was_poisoned
                } else {
                    false
                }
            },
        }
    }

    /// resets the ttl of the neighbor-liveness entry whose `address` equals
    /// `source`, if one exists.
    pub fn reset_ttl(&self, source: IpAddr) {
        let mut entries = self.entries.lock();
        Self::reset_ttl_locked(&mut entries, source);
    }

    fn reset_ttl_locked(entries: &mut [RouteEntry], source: IpAddr) {
        if let Some(entry) = entries.iter_mut().find(|e| e.address == source) {
            entry.ttl = TTL;
        }
    }

    /// applies every entry of one inbound advertisement under a single lock
    /// acquisition, then resets the source's ttl if it is a neighbor —
    /// the relaxations and the ttl reset for one datagram happen as one
    /// atomic step. returns the subnets newly poisoned by this datagram.
    pub fn apply_advertisement(
        &self,
        incoming: &[(IpAddr, u8, u32)],
        source: IpAddr,
        source_is_neighbor: bool,
    ) -> Vec<IpAddr> {
        let mut newly_poisoned = Vec::new();
        let mut entries = self.entries.lock();
        for &(address, mask_bits, advertised_cost) in incoming {
            if Self::relax_locked(&mut entries, address, mask_bits, source, advertised_cost) {
                newly_poisoned.push(canonical_mask(address, mask_bits));
            }
        }
        if source_is_neighbor {
            Self::reset_ttl_locked(&mut entries, source);
        }
        newly_poisoned
    }

    /// runs one TTL decay pass: for every entry whose `address` is a
    /// configured neighbor and whose `cost != 0`, decrement its ttl, and
    /// poison it the moment the countdown is exhausted. with `TTL=5`, a
    /// neighbor silent for five consecutive send cycles is poisoned on the
    /// fifth decay pass.
    pub fn decay_ttl(&self, neighbors: &[IpAddr]) -> Vec<IpAddr> {
        let mut newly_dead = Vec::new();
        let mut entries = self.entries.lock();
        for entry in entries.iter_mut() {
            if entry.cost == 0 || !neighbors.contains(&entry.address) {
                continue;
            }
            if entry.ttl == 0 {
                // already exhausted by an earlier pass; stays poisoned.
                entry.cost = HOP_LIMIT;
                continue;
            }
            entry.ttl -= 1;
            if entry.ttl == 0 {
                entry.cost = HOP_LIMIT;
                newly_dead.push(entry.address);
            }
        }
        newly_dead
    }
}
