use crate::table::RouteEntry;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// the on-the-wire shape of one route entry.
///
/// `subnet` is carried on the wire even though it is always derivable from
/// `address`/`mask_bits`, because the wire format names it as a required
/// key; unknown keys are ignored by `serde`'s default behavior, missing
/// required keys fail deserialization of the whole array and the datagram
/// is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEntry {
    pub address: IpAddr,
    pub mask_bits: u8,
    pub next_hop: IpAddr,
    pub subnet: IpAddr,
    pub cost: u32,
}

impl From<&RouteEntry> for WireEntry {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            address: entry.address,
            mask_bits: entry.mask_bits,
            next_hop: entry.next_hop,
            subnet: entry.subnet(),
            cost: entry.cost,
        }
    }
}

/// serializes a snapshot of entries as a UDP-ready JSON payload.
pub fn encode(entries: &[RouteEntry]) -> Vec<u8> {
    let wire: Vec<WireEntry> = entries.iter().map(WireEntry::from).collect();
    serde_json::to_vec(&wire).expect("route entries always serialize")
}

/// decodes a received datagram into wire entries.
///
/// returns `None` on any malformed payload (bad UTF-8, invalid JSON, a
/// missing required key) — the caller discards the datagram without
/// partial application.
pub fn decode(payload: &[u8]) -> Option<Vec<WireEntry>> {
    serde_json::from_slice(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RouteEntry;

    #[test]
    fn round_trips_through_json() {
        let entry = RouteEntry::new(
            "129.21.30.37".parse().unwrap(),
            24,
            "129.21.30.37".parse().unwrap(),
            0,
        );
        let bytes = encode(std::slice::from_ref(&entry));
        let decoded = decode(&bytes).expect("valid payload decodes");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].subnet, "129.21.30.0".parse::<IpAddr>().unwrap());
        assert_eq!(decoded[0].cost, 0);
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let payload = br#"[{"address": "1.2.3.4", "mask_bits": 24, "cost": 0}]"#;
        assert!(decode(payload).is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let payload = br#"[{"address":"1.2.3.4","mask_bits":24,"next_hop":"1.2.3.4","subnet":"1.2.3.0","cost":0,"extra":"ignored"}]"#;
        let decoded = decode(payload).expect("unknown keys don't reject the datagram");
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(decode(b"not json").is_none());
    }
}
