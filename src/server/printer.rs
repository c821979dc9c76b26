use crate::config::{DebugToggles, PRINT_CADENCE};
use crate::table::RoutingTable;
use std::sync::Arc;
use std::time::Duration;

/// periodically renders a snapshot of the table to standard output. a pure
/// observer: it never mutates the table.
pub async fn run(table: Arc<RoutingTable>, debug: DebugToggles) -> anyhow::Result<()> {
    log::info!("printer loop started");

    loop {
        let entries = table.snapshot_excluding(None);
        print_table(&entries);
        if debug.print {
            log::debug!("printed {} entries", entries.len());
        }
        tokio::time::sleep(Duration::from_secs(PRINT_CADENCE)).await;
    }
}

fn print_table(entries: &[crate::table::RouteEntry]) {
    println!(
        "{:_<18}{:_<19}{:_<17}",
        "subnet/mask", "next_hop", "cost"
    );
    for entry in entries {
        let subnet = format!("{}/{}", entry.subnet(), entry.mask_bits);
        println!("{:_<18}{:_<19}{:_<17}", subnet, entry.next_hop.to_string(), entry.cost);
    }
}
