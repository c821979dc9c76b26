use crate::config::DebugToggles;
use crate::table::RoutingTable;
use crate::wire;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// blocks on UDP receive, decodes one advertisement, relaxes the local
/// table against it, refreshes the sender's TTL if it is a neighbor, and
/// reactively re-advertises any route that was just poisoned.
pub async fn run(
    table: Arc<RoutingTable>,
    socket: Arc<UdpSocket>,
    neighbors: Vec<IpAddr>,
    debug: DebugToggles,
) -> anyhow::Result<()> {
    log::info!("receiver loop started");
    let mut buf = vec![0u8; 4096];

    loop {
        let (size, from) = match socket.recv_from(&mut buf).await {
            Ok(r) => r,
            Err(e) => {
                log::warn!("udp socket receive error: {e}");
                continue;
            },
        };

        if debug.recv {
            log::debug!("received {size} bytes from {from}");
        }

        let Some(incoming) = wire::decode(&buf[..size]) else {
            // malformed datagram: discarded, no partial application.
            log::debug!("discarding malformed datagram from {from}");
            continue;
        };

        let batch: Vec<(IpAddr, u8, u32)> = incoming
            .iter()
            .map(|entry| (entry.address, entry.mask_bits, entry.cost))
            .collect();
        let source_is_neighbor = neighbors.contains(&from.ip());
        let poisoned_subnets = table.apply_advertisement(&batch, from.ip(), source_is_neighbor);

        if debug.recv {
            for subnet in &poisoned_subnets {
                log::debug!("route to {subnet} poisoned by update from {from}");
            }
        }

        if !poisoned_subnets.is_empty() {
            // reactive poison reverse: no split horizon, full table.
            let full_table = table.snapshot_excluding(None);
            let payload = wire::encode(&full_table);
            if let Err(e) = socket.send_to(&payload, from).await {
                if debug.send {
                    log::warn!("poison-reverse send to {from} failed: {e}");
                }
            }
        }
    }
}
