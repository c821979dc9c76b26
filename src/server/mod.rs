pub mod printer;
pub mod receiver;
pub mod sender;

use crate::config::{self, DebugToggles, RouterIdentity, SUB_BITS};
use crate::table::RoutingTable;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// resolves this process's identity, seeds the table with the self-route,
/// opens the shared socket, and starts the three loops.
///
/// the three loops and this function all run for the lifetime of the
/// process; there is no cancellation or graceful shutdown (non-goal).
pub async fn bootstrap(local_address: &str, debug: DebugToggles) -> anyhow::Result<()> {
    let identity = config::resolve(local_address).ok_or_else(|| {
        anyhow::anyhow!("ip address not associated with any configuration: {local_address}")
    })?;

    log::info!(
        "starting router {:?}: listen={} neighbors={:?}",
        identity.name,
        identity.endpoint,
        identity.neighbors,
    );

    let self_ip = identity.endpoint.ip();
    let table = Arc::new(RoutingTable::bootstrap(self_ip, SUB_BITS));
    let socket = Arc::new(UdpSocket::bind(identity.endpoint).await?);

    run(identity, table, socket, debug).await
}

async fn run(
    identity: RouterIdentity,
    table: Arc<RoutingTable>,
    socket: Arc<UdpSocket>,
    debug: DebugToggles,
) -> anyhow::Result<()> {
    let neighbors: Vec<IpAddr> = identity.neighbors.iter().map(|n| n.ip()).collect();

    let sender = tokio::spawn(sender::run(
        table.clone(),
        socket.clone(),
        identity.neighbors.clone(),
        neighbors.clone(),
        debug,
    ));

    let receiver = tokio::spawn(receiver::run(table.clone(), socket, neighbors, debug));

    let printer = tokio::spawn(printer::run(table, debug));

    let (sender, receiver, printer) = tokio::join!(sender, receiver, printer);
    sender??;
    receiver??;
    printer??;
    Ok(())
}
