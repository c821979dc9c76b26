use crate::config::{DebugToggles, SEND_CADENCE};
use crate::table::RoutingTable;
use crate::wire;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;

/// periodically emits per-neighbor advertisements with split horizon, then
/// runs the TTL decay pass.
///
/// the set of neighbor addresses is cached once at startup; the neighbor
/// list is static for the life of the process (non-goal: dynamic
/// reconfiguration).
pub async fn run(
    table: Arc<RoutingTable>,
    socket: Arc<UdpSocket>,
    neighbor_endpoints: Vec<SocketAddr>,
    neighbor_addrs: Vec<IpAddr>,
    debug: DebugToggles,
) -> anyhow::Result<()> {
    log::info!("sender loop started");

    loop {
        for neighbor in &neighbor_endpoints {
            let entries = table.snapshot_excluding(Some(neighbor.ip()));
            let payload = wire::encode(&entries);

            match socket.send_to(&payload, neighbor).await {
                Ok(sent) => {
                    if debug.send {
                        log::debug!("sent {sent} bytes to {neighbor}");
                    }
                },
                Err(e) => {
                    if debug.send {
                        log::warn!("udp socket send error to {neighbor}: {e}");
                    }
                    // transient loss is tolerated; the next cycle retries.
                },
            }
        }

        let dead = table.decay_ttl(&neighbor_addrs);
        for addr in dead {
            log::warn!("neighbor {addr} declared dead, route poisoned");
        }

        tokio::time::sleep(Duration::from_secs(SEND_CADENCE)).await;
    }
}
